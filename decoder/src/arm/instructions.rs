//! The fourteen A32 instruction-class decoders.
//!
//! Every decoder receives a word already matched against its class
//! pattern and renders the full mnemonic line, or returns `None` when a
//! should-be-zero / should-be-one field is violated.

use super::address_mode;
use crate::bitwise::Bits;
use crate::condition::Condition;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opcode field of a data-processing instruction (bits 21-24).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AluOp {
    And = 0x0,
    Eor = 0x1,
    Sub = 0x2,
    Rsb = 0x3,
    Add = 0x4,
    Adc = 0x5,
    Sbc = 0x6,
    Rsc = 0x7,
    Tst = 0x8,
    Teq = 0x9,
    Cmp = 0xA,
    Cmn = 0xB,
    Orr = 0xC,
    Mov = 0xD,
    Bic = 0xE,
    Mvn = 0xF,
}

impl From<u32> for AluOp {
    fn from(opcode: u32) -> Self {
        match opcode {
            0x0 => Self::And,
            0x1 => Self::Eor,
            0x2 => Self::Sub,
            0x3 => Self::Rsb,
            0x4 => Self::Add,
            0x5 => Self::Adc,
            0x6 => Self::Sbc,
            0x7 => Self::Rsc,
            0x8 => Self::Tst,
            0x9 => Self::Teq,
            0xA => Self::Cmp,
            0xB => Self::Cmn,
            0xC => Self::Orr,
            0xD => Self::Mov,
            0xE => Self::Bic,
            0xF => Self::Mvn,
            _ => unreachable!("alu opcode is a 4-bit field"),
        }
    }
}

impl Display for AluOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Eor => f.write_str("EOR"),
            Self::Sub => f.write_str("SUB"),
            Self::Rsb => f.write_str("RSB"),
            Self::Add => f.write_str("ADD"),
            Self::Adc => f.write_str("ADC"),
            Self::Sbc => f.write_str("SBC"),
            Self::Rsc => f.write_str("RSC"),
            Self::Tst => f.write_str("TST"),
            Self::Teq => f.write_str("TEQ"),
            Self::Cmp => f.write_str("CMP"),
            Self::Cmn => f.write_str("CMN"),
            Self::Orr => f.write_str("ORR"),
            Self::Mov => f.write_str("MOV"),
            Self::Bic => f.write_str("BIC"),
            Self::Mvn => f.write_str("MVN"),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn condition(word: u32) -> Condition {
    Condition::from(word.get_bits(28..=31) as u8)
}

pub(super) fn software_interrupt(word: u32) -> Option<String> {
    let number = word.get_bits(0..=23);
    Some(format!("SWI{} #0x{number:x}", condition(word)))
}

/// Branch-and-exchange. Bits 8-19 are should-be-one.
pub(super) fn branch_exchange(word: u32) -> Option<String> {
    if word.get_bits(8..=19) != 0xFFF {
        return None;
    }
    let rm = word.get_bits(0..=3);
    Some(format!("BX{} r{rm}", condition(word)))
}

/// Branch / branch-with-link. The 24-bit offset is a word offset,
/// sign-extended from 26 bits after shifting, plus the 8-byte fetch
/// pipeline bias.
pub(super) fn branch(word: u32) -> Option<String> {
    let link = if word.get_bit(24) { "L" } else { "" };
    let offset = word.get_bits(0..=23) << 2;
    let target = offset.sign_extended(26).wrapping_add(8);
    Some(format!("B{link}{} #0x{target:x}", condition(word)))
}

pub(super) fn coprocessor_register_transfer(word: u32) -> Option<String> {
    let opcode1 = word.get_bits(21..=23);
    let mnemonic = if word.get_bit(20) { "MRC" } else { "MCR" };
    let crn = word.get_bits(16..=19);
    let rd = word.get_bits(12..=15);
    let cp_num = word.get_bits(8..=11);
    let opcode2 = word.get_bits(5..=7);
    let crm = word.get_bits(0..=3);
    Some(format!(
        "{mnemonic}{} p{cp_num}, #{opcode1}, r{rd}, c{crn}, c{crm}, #{opcode2}",
        condition(word)
    ))
}

pub(super) fn coprocessor_data_processing(word: u32) -> Option<String> {
    let opcode1 = word.get_bits(20..=23);
    let crn = word.get_bits(16..=19);
    let crd = word.get_bits(12..=15);
    let cp_num = word.get_bits(8..=11);
    let opcode2 = word.get_bits(5..=7);
    let crm = word.get_bits(0..=3);
    Some(format!(
        "CDP{} p{cp_num}, #{opcode1}, c{crd}, c{crn}, c{crm}, #{opcode2}",
        condition(word)
    ))
}

pub(super) fn coprocessor_load_store(word: u32) -> Option<String> {
    let mnemonic = if word.get_bit(20) { "LDC" } else { "STC" };
    let crd = word.get_bits(12..=15);
    let cp_num = word.get_bits(8..=11);
    let address = address_mode::coprocessor_offset(word)?;
    Some(format!(
        "{mnemonic}{} p{cp_num}, c{crd}, {address}",
        condition(word)
    ))
}

/// Load-store multiple. Rejects an empty register list, `r15` as the
/// base, and the S bit together with writeback.
pub(super) fn load_store_multiple(word: u32) -> Option<String> {
    let psr = word.get_bit(22);
    let write_back = word.get_bit(21);
    let mnemonic = if word.get_bit(20) { "LDM" } else { "STM" };
    let rn = word.get_bits(16..=19);
    let register_list = word.get_bits(0..=15);

    if (psr && write_back) || register_list == 0 || rn == 15 {
        return None;
    }

    let registers = register_range(register_list, 0..16);
    let bang = if write_back { "!" } else { "" };
    let caret = if psr { " ^" } else { "" };
    Some(format!(
        "{mnemonic}{}{} r{rn}{bang}, {{{registers}}}{caret}",
        address_mode::multiple_suffix(word),
        condition(word)
    ))
}

/// Word / unsigned byte load-store. Post-indexing with the W bit set is
/// the user-mode translation form, spelled with a `T` suffix.
pub(super) fn load_store(word: u32) -> Option<String> {
    let post_indexed = !word.get_bit(24);
    let byte = if word.get_bit(22) { "B" } else { "" };
    let translate = if post_indexed && word.get_bit(21) {
        "T"
    } else {
        ""
    };
    let mnemonic = if word.get_bit(20) { "LDR" } else { "STR" };
    let rd = word.get_bits(12..=15);
    let address = address_mode::word_or_byte_offset(word)?;
    Some(format!(
        "{mnemonic}{byte}{translate}{} r{rd}, {address}",
        condition(word)
    ))
}

/// Multiply / multiply-accumulate. Bits 12-15 are should-be-zero in the
/// plain multiply form.
pub(super) fn multiply(word: u32) -> Option<String> {
    let set_flags = if word.get_bit(20) { "S" } else { "" };
    let rd = word.get_bits(16..=19);
    let rs = word.get_bits(8..=11);
    let rm = word.get_bits(0..=3);

    if word.get_bit(21) {
        let rn = word.get_bits(12..=15);
        return Some(format!(
            "MLA{set_flags}{} r{rd}, r{rm}, r{rs}, r{rn}",
            condition(word)
        ));
    }

    if word.get_bits(12..=15) != 0 {
        return None;
    }
    Some(format!(
        "MUL{set_flags}{} r{rd}, r{rm}, r{rs}",
        condition(word)
    ))
}

pub(super) fn multiply_long(word: u32) -> Option<String> {
    let mnemonic = match (word.get_bit(22), word.get_bit(21)) {
        (true, true) => "SMLAL",
        (true, false) => "SMULL",
        (false, true) => "UMLAL",
        (false, false) => "UMULL",
    };
    let set_flags = if word.get_bit(20) { "S" } else { "" };
    let rd_hi = word.get_bits(16..=19);
    let rd_lo = word.get_bits(12..=15);
    let rs = word.get_bits(8..=11);
    let rm = word.get_bits(0..=3);
    Some(format!(
        "{mnemonic}{set_flags}{} r{rd_lo}, r{rd_hi}, r{rm}, r{rs}",
        condition(word)
    ))
}

/// Single data swap. Bits 8-11 and 20-21 are should-be-zero.
pub(super) fn swap(word: u32) -> Option<String> {
    if word.get_bits(8..=11) != 0 || word.get_bits(20..=21) != 0 {
        return None;
    }
    let byte = if word.get_bit(22) { "B" } else { "" };
    let rn = word.get_bits(16..=19);
    let rd = word.get_bits(12..=15);
    let rm = word.get_bits(0..=3);
    Some(format!(
        "SWP{byte}{} r{rd}, r{rm}, [r{rn}]",
        condition(word)
    ))
}

/// MRS / MSR status-register transfers.
pub(super) fn status_register_transfer(word: u32) -> Option<String> {
    let psr = if word.get_bit(22) { "SPSR" } else { "CPSR" };

    if !word.get_bit(21) {
        // MRS: bits 0-11 should-be-zero, bits 16-19 should-be-one.
        if word.get_bits(0..=11) != 0 || word.get_bits(16..=19) != 0xF {
            return None;
        }
        let rd = word.get_bits(12..=15);
        return Some(format!("MRS{} r{rd}, {psr}", condition(word)));
    }

    // MSR: bits 12-15 should-be-one, at least one target field.
    if word.get_bits(12..=15) != 0xF {
        return None;
    }
    let field_mask = word.get_bits(16..=19);
    if field_mask == 0 {
        return None;
    }

    let mut fields = String::new();
    for (bit, letter) in [(3, 'f'), (2, 's'), (1, 'x'), (0, 'c')] {
        if field_mask.get_bit(bit) {
            fields.push(letter);
        }
    }

    if word.get_bit(25) {
        if word.get_bits(4..=11) != 0 {
            return None;
        }
        let immediate = word.get_bits(0..=7);
        return Some(format!(
            "MSR{} {psr}_{fields}, #0x{immediate:x}",
            condition(word)
        ));
    }
    let rm = word.get_bits(0..=3);
    Some(format!("MSR{} {psr}_{fields}, r{rm}", condition(word)))
}

/// Halfword and signed-byte load-store. The S and H bits select the
/// transfer size; stores only exist for the plain halfword.
pub(super) fn load_store_halfword_signed_byte(word: u32) -> Option<String> {
    let sh = word.get_bits(5..=6);
    if sh == 0 {
        return None;
    }
    let rd = word.get_bits(12..=15);
    let address = address_mode::halfword_offset(word)?;

    if word.get_bit(20) {
        let suffix = match sh {
            1 => "H",
            2 => "SB",
            3 => "SH",
            _ => unreachable!("sh is a 2-bit field and 0 was rejected"),
        };
        return Some(format!("LDR{suffix}{} r{rd}, {address}", condition(word)));
    }

    if sh != 1 {
        return None;
    }
    Some(format!("STRH{} r{rd}, {address}", condition(word)))
}

pub(super) fn data_processing(word: u32) -> Option<String> {
    let opcode = AluOp::from(word.get_bits(21..=24));
    let set_flags = if word.get_bit(20) { "S" } else { "" };
    let rn = word.get_bits(16..=19);
    let rd = word.get_bits(12..=15);
    let operand2 = address_mode::shifter_operand(word)?;
    let cond = condition(word);

    Some(match opcode {
        AluOp::Mov | AluOp::Mvn => format!("{opcode}{set_flags}{cond} r{rd}, {operand2}"),
        // Comparison opcodes always set flags and have no destination.
        AluOp::Tst | AluOp::Teq | AluOp::Cmp | AluOp::Cmn => {
            format!("{opcode}{cond} r{rn}, {operand2}")
        }
        _ => format!("{opcode}{set_flags}{cond} r{rd}, r{rn}, {operand2}"),
    })
}

/// Comma-separated `rN` list of the registers whose bit is set.
fn register_range(register_list: u32, bits: std::ops::Range<u8>) -> String {
    bits.filter(|i| register_list.get_bit(*i))
        .map(|i| format!("r{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn multiply_rejects_nonzero_accumulate_field() {
        assert_eq!(multiply(0xE000_0090), Some("MUL r0, r0, r0".to_owned()));
        assert_eq!(multiply(0xE000_1090), None);
    }

    #[test]
    fn status_transfer_field_mask_letters() {
        assert_eq!(
            status_register_transfer(0xE129_F001),
            Some("MSR CPSR_fc, r1".to_owned())
        );
        assert_eq!(
            status_register_transfer(0xE16F_F002),
            Some("MSR SPSR_fsxc, r2".to_owned())
        );
        // No target field at all.
        assert_eq!(status_register_transfer(0xE120_F001), None);
    }

    #[test]
    fn register_ranges_render_in_ascending_order() {
        assert_eq!(register_range(0b1000_0000_0001_0110, 0..16), "r1, r2, r4, r15");
        assert_eq!(register_range(0, 0..16), "");
    }
}
