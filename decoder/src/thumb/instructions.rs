//! The Thumb-1 instruction-class decoders.
//!
//! Thumb data-processing instructions set flags implicitly, so most
//! mnemonics carry a hardwired `S`. Memory-offset immediates are scaled
//! by the transfer size of the class before rendering.

use crate::bitwise::Bits;
use crate::condition::Condition;

/// Opcode field of a register-to-register ALU operation (bits 6-9).
const ALU_MNEMONICS: [&str; 16] = [
    "ANDS", "EORS", "LSLS", "LSRS", "ASRS", "ADCS", "SBCS", "RORS", "TST", "NEGS", "CMP", "CMN",
    "ORRS", "MULS", "BICS", "MVNS",
];

/// Mnemonics of the register-offset load-store class, by bits 9-11.
const REGISTER_OFFSET_MNEMONICS: [&str; 8] = [
    "STR", "STRH", "STRB", "LDRSB", "LDR", "LDRH", "LDRB", "LDRSH",
];

pub(super) fn add_sub_register(word: u16) -> Option<String> {
    let immediate = word.get_bit(10);
    let mnemonic = if word.get_bit(9) { "SUB" } else { "ADD" };
    let rm_or_imm = word.get_bits(6..=8);
    let rn = word.get_bits(3..=5);
    let rd = word.get_bits(0..=2);

    Some(if immediate {
        format!("{mnemonic}S r{rd}, r{rn}, #{rm_or_imm}")
    } else {
        format!("{mnemonic}S r{rd}, r{rn}, r{rm_or_imm}")
    })
}

pub(super) fn shift_by_immediate(word: u16) -> Option<String> {
    let mnemonic = match word.get_bits(11..=12) {
        0 => "LSL",
        1 => "LSR",
        2 => "ASR",
        // 0b11 is the add-sub-register class, dispatched before this one.
        _ => unreachable!("opcode 0b11 never reaches the shift class"),
    };
    let offset = word.get_bits(6..=10);
    let rm = word.get_bits(3..=5);
    let rd = word.get_bits(0..=2);
    Some(format!("{mnemonic}S r{rd}, r{rm}, #{offset}"))
}

pub(super) fn immediate_op(word: u16) -> Option<String> {
    let mnemonic = match word.get_bits(11..=12) {
        0 => "MOVS",
        1 => "CMP",
        2 => "ADDS",
        3 => "SUBS",
        _ => unreachable!("opcode is a 2-bit field"),
    };
    let rd = word.get_bits(8..=10);
    let immediate = word.get_bits(0..=7);
    Some(format!("{mnemonic} r{rd}, #0x{immediate:x}"))
}

pub(super) fn data_processing_register(word: u16) -> Option<String> {
    let mnemonic = ALU_MNEMONICS[word.get_bits(6..=9) as usize];
    let rm = word.get_bits(3..=5);
    let rd = word.get_bits(0..=2);
    Some(format!("{mnemonic} r{rd}, r{rm}"))
}

/// High-register operations and branch-exchange. The H bits extend the
/// 3-bit register fields into r8-r15.
pub(super) fn special_data_processing(word: u16) -> Option<String> {
    let opcode = word.get_bits(8..=9);
    let h1 = word.get_bit(7);
    let h2 = word.get_bit(6);
    let rm = word.get_bits(3..=5) + if h2 { 8 } else { 0 };

    if opcode == 3 {
        // BX: H1 and the destination field are should-be-zero.
        if h1 || word.get_bits(0..=2) != 0 {
            return None;
        }
        return Some(format!("BX r{rm}"));
    }

    let mnemonic = match opcode {
        0 => "ADDS",
        1 => "CMP",
        2 => "MOVS",
        _ => unreachable!("opcode 0b11 handled above"),
    };
    let rd = word.get_bits(0..=2) + if h1 { 8 } else { 0 };
    Some(format!("{mnemonic} r{rd}, r{rm}"))
}

pub(super) fn load_literal_pool(word: u16) -> Option<String> {
    let rd = word.get_bits(8..=10);
    let offset = word.get_bits(0..=7) * 4;
    Some(format!("LDR r{rd}, [r15, #0x{offset:x}]"))
}

pub(super) fn load_store_register_offset(word: u16) -> Option<String> {
    let mnemonic = REGISTER_OFFSET_MNEMONICS[word.get_bits(9..=11) as usize];
    let rm = word.get_bits(6..=8);
    let rn = word.get_bits(3..=5);
    let rd = word.get_bits(0..=2);
    Some(format!("{mnemonic} r{rd}, [r{rn}, r{rm}]"))
}

/// Word and byte immediate-offset transfers. The word form scales its
/// 5-bit immediate by four, the byte form by one.
pub(super) fn load_store_word_byte(word: u16) -> Option<String> {
    let byte = word.get_bit(12);
    let mnemonic = if word.get_bit(11) { "LDR" } else { "STR" };
    let suffix = if byte { "B" } else { "" };
    let scale = if byte { 1 } else { 4 };
    let offset = word.get_bits(6..=10) * scale;
    let rn = word.get_bits(3..=5);
    let rd = word.get_bits(0..=2);
    Some(format!(
        "{mnemonic}{suffix} r{rd}, [r{rn}, #0x{offset:x}]"
    ))
}

pub(super) fn load_store_halfword(word: u16) -> Option<String> {
    let mnemonic = if word.get_bit(11) { "LDR" } else { "STR" };
    let offset = word.get_bits(6..=10) * 2;
    let rn = word.get_bits(3..=5);
    let rd = word.get_bits(0..=2);
    Some(format!("{mnemonic}H r{rd}, [r{rn}, #0x{offset:x}]"))
}

pub(super) fn load_store_stack(word: u16) -> Option<String> {
    let mnemonic = if word.get_bit(11) { "LDR" } else { "STR" };
    let rd = word.get_bits(8..=10);
    let offset = word.get_bits(0..=7) * 4;
    Some(format!("{mnemonic} r{rd}, [r13, #0x{offset:x}]"))
}

pub(super) fn add_sp_or_pc(word: u16) -> Option<String> {
    let base = if word.get_bit(11) { "r13" } else { "r15" };
    let rd = word.get_bits(8..=10);
    let offset = word.get_bits(0..=7) * 4;
    Some(format!("ADDS r{rd}, {base}, #0x{offset:x}"))
}

pub(super) fn adjust_stack_pointer(word: u16) -> Option<String> {
    let offset = word.get_bits(0..=6) * 4;
    Some(format!("ADDS r13, r13, #0x{offset:x}"))
}

/// Push / pop. The R bit adds the link register to a push and the
/// program counter to a pop; without it an empty list is rejected.
pub(super) fn push_pop_register_list(word: u16) -> Option<String> {
    let load = word.get_bit(11);
    let extra = word.get_bit(8);
    let register_list = word.get_bits(0..=7);

    if !extra && register_list == 0 {
        return None;
    }

    let mut registers: Vec<String> = (0..8)
        .filter(|i| register_list.get_bit(*i))
        .map(|i| format!("r{i}"))
        .collect();
    if extra {
        registers.push(if load { "r15" } else { "r14" }.to_owned());
    }

    let mnemonic = if load { "POP" } else { "PUSH" };
    Some(format!("{mnemonic} {{{}}}", registers.join(", ")))
}

pub(super) fn load_store_multiple(word: u16) -> Option<String> {
    let mnemonic = if word.get_bit(11) { "LDM" } else { "STM" };
    let rn = word.get_bits(8..=10);
    let register_list = word.get_bits(0..=7);

    if register_list == 0 {
        return None;
    }

    let registers = (0..8)
        .filter(|i| register_list.get_bit(*i))
        .map(|i| format!("r{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!("{mnemonic}IA r{rn}, {{{registers}}}"))
}

#[allow(clippy::cast_possible_truncation)]
pub(super) fn conditional_branch(word: u16) -> Option<String> {
    let cond = Condition::from(word.get_bits(8..=11) as u8);
    let offset = word.get_bits(0..=7) << 1;
    let target = offset.sign_extended(9).wrapping_add(4);
    Some(format!("B{cond} #0x{target:x}"))
}

pub(super) fn software_interrupt(word: u16) -> Option<String> {
    let number = word.get_bits(0..=7);
    Some(format!("SWI 0x{number:x}"))
}

pub(super) fn unconditional_branch(word: u16) -> Option<String> {
    let offset = word.get_bits(0..=10) << 1;
    let target = offset.sign_extended(12).wrapping_add(4);
    Some(format!("B 0x{target:x}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn high_register_operations() {
        assert_eq!(
            special_data_processing(0x4448),
            Some("ADDS r0, r9".to_owned())
        );
        assert_eq!(
            special_data_processing(0x4680),
            Some("MOVS r8, r0".to_owned())
        );
    }

    #[test]
    fn branch_exchange_should_be_zero_fields() {
        assert_eq!(special_data_processing(0x4770), Some("BX r14".to_owned()));
        // H1 set.
        assert_eq!(special_data_processing(0x47F0), None);
        // Nonzero destination field.
        assert_eq!(special_data_processing(0x4771), None);
    }

    #[test]
    fn push_extra_register_is_the_link_register() {
        assert_eq!(
            push_pop_register_list(0xB510),
            Some("PUSH {r4, r14}".to_owned())
        );
        assert_eq!(
            push_pop_register_list(0xBD10),
            Some("POP {r4, r15}".to_owned())
        );
        assert_eq!(push_pop_register_list(0xB400), None);
    }
}
