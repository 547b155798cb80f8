//! The five A32 addressing-mode operand formatters.
//!
//! Each one renders the operand portion of an instruction (everything
//! after the register operands) and returns `None` when a reserved
//! field of the encoding is violated.

use crate::bitwise::Bits;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Barrel shifter operation, bits 5-6 of a shifted register operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftKind {
    Lsl = 0,
    Lsr = 1,
    Asr = 2,
    Ror = 3,
}

impl From<u32> for ShiftKind {
    fn from(shift_type: u32) -> Self {
        match shift_type {
            0 => Self::Lsl,
            1 => Self::Lsr,
            2 => Self::Asr,
            3 => Self::Ror,
            _ => unreachable!("shift type is a 2-bit field"),
        }
    }
}

impl Display for ShiftKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lsl => f.write_str("LSL"),
            Self::Lsr => f.write_str("LSR"),
            Self::Asr => f.write_str("ASR"),
            Self::Ror => f.write_str("ROR"),
        }
    }
}

/// Mode 1: the shifter operand of a data-processing instruction.
///
/// Immediate form rotates an 8-bit value right by twice the rotate
/// field. Register forms apply the `LSL #0` and `ROR #0` (RRX) textual
/// shortcuts before splitting on bit 4, and reject a register-specified
/// shift whose bit 7 is not zero.
pub(super) fn shifter_operand(word: u32) -> Option<String> {
    if word.get_bit(25) {
        let rotate = word.get_bits(8..=11) * 2;
        let immediate = word.get_bits(0..=7).rotate_right(rotate);
        return Some(format!("#0x{immediate:x}"));
    }

    let shift_imm = word.get_bits(7..=11);
    let kind = ShiftKind::from(word.get_bits(5..=6));
    let rm = word.get_bits(0..=3);

    if kind == ShiftKind::Lsl && shift_imm == 0 {
        return Some(format!("r{rm}"));
    }
    if kind == ShiftKind::Ror && shift_imm == 0 {
        return Some(format!("r{rm}, RRX"));
    }

    if word.get_bit(4) {
        // Register-specified shift amount.
        if word.get_bit(7) {
            return None;
        }
        let rs = word.get_bits(8..=11);
        return Some(format!("r{rm}, {kind} r{rs}"));
    }

    Some(format!("r{rm}, {kind} #{shift_imm}"))
}

/// Mode 2: word / unsigned byte load-store operand.
pub(super) fn word_or_byte_offset(word: u32) -> Option<String> {
    let pre_indexed = word.get_bit(24);
    let rn = word.get_bits(16..=19);
    let sign = if word.get_bit(23) { "" } else { "-" };
    let bang = if word.get_bit(21) { "!" } else { "" };

    if !word.get_bit(25) {
        let offset = word.get_bits(0..=11);
        return Some(if pre_indexed {
            format!("[r{rn}, #{sign}0x{offset:x}]{bang}")
        } else {
            format!("[r{rn}], #{sign}0x{offset:x}")
        });
    }

    if word.get_bit(4) {
        return None;
    }

    let shift_imm = word.get_bits(7..=11);
    let kind = ShiftKind::from(word.get_bits(5..=6));
    let rm = word.get_bits(0..=3);

    let index = if kind == ShiftKind::Lsl && shift_imm == 0 {
        format!("{sign}r{rm}")
    } else if kind == ShiftKind::Ror && shift_imm == 0 {
        format!("{sign}r{rm}, RRX")
    } else {
        format!("{sign}r{rm}, {kind} #{shift_imm}")
    };

    Some(if pre_indexed {
        format!("[r{rn}, {index}]{bang}")
    } else {
        format!("[r{rn}], {index}")
    })
}

/// Mode 3: halfword / signed-byte load-store operand. The 8-bit
/// immediate is split across bits 8-11 and 0-3; the register form
/// requires bits 8-11 zero. Post-indexing with writeback does not
/// exist in this mode.
pub(super) fn halfword_offset(word: u32) -> Option<String> {
    let pre_indexed = word.get_bit(24);
    let write_back = word.get_bit(21);
    let rn = word.get_bits(16..=19);
    let sign = if word.get_bit(23) { "" } else { "-" };
    let bang = if write_back { "!" } else { "" };

    if word.get_bit(22) {
        let offset = word.get_bits(8..=11) << 4 | word.get_bits(0..=3);
        if pre_indexed {
            Some(format!("[r{rn}, #{sign}0x{offset:x}]{bang}"))
        } else if write_back {
            None
        } else {
            Some(format!("[r{rn}], #{sign}0x{offset:x}"))
        }
    } else {
        if word.get_bits(8..=11) != 0 {
            return None;
        }
        let rm = word.get_bits(0..=3);
        if pre_indexed {
            Some(format!("[r{rn}, {sign}r{rm}]{bang}"))
        } else if write_back {
            None
        } else {
            Some(format!("[r{rn}], {sign}r{rm}"))
        }
    }
}

/// Mode 4: mnemonic suffix of a load-store multiple, from the P and U
/// bits.
pub(super) fn multiple_suffix(word: u32) -> &'static str {
    match (word.get_bit(24), word.get_bit(23)) {
        (false, false) => "DA",
        (false, true) => "IA",
        (true, false) => "DB",
        (true, true) => "IB",
    }
}

/// Mode 5: coprocessor load-store operand. The 8-bit immediate counts
/// words. Post-indexing with writeback does not exist in this mode.
pub(super) fn coprocessor_offset(word: u32) -> Option<String> {
    let pre_indexed = word.get_bit(24);
    let write_back = word.get_bit(21);
    let rn = word.get_bits(16..=19);
    let sign = if word.get_bit(23) { "" } else { "-" };
    let bang = if write_back { "!" } else { "" };

    let offset = word.get_bits(0..=7) * 4;
    if pre_indexed {
        Some(format!("[r{rn}, #{sign}0x{offset:x}]{bang}"))
    } else if write_back {
        None
    } else {
        Some(format!("[r{rn}], #{sign}0x{offset:x}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn shifter_operand_rotated_immediate() {
        // imm 0x1 rotated right by 2 * 0x2 -> 0x10000000
        assert_eq!(
            shifter_operand(0xE3A0_0201),
            Some("#0x10000000".to_owned())
        );
        assert_eq!(shifter_operand(0xE3A0_00FF), Some("#0xff".to_owned()));
    }

    #[test]
    fn shifter_operand_register_shortcuts() {
        // LSL #0 renders as the bare register.
        assert_eq!(shifter_operand(0xE1A0_0001), Some("r1".to_owned()));
        // ROR #0 is the rotate-with-extend shorthand.
        assert_eq!(shifter_operand(0xE1A0_0061), Some("r1, RRX".to_owned()));
    }

    #[test]
    fn shifter_operand_immediate_shift() {
        assert_eq!(
            shifter_operand(0xE1A0_0221),
            Some("r1, LSR #4".to_owned())
        );
        assert_eq!(
            shifter_operand(0xE1A0_0FC1),
            Some("r1, ASR #31".to_owned())
        );
    }

    #[test]
    fn shifter_operand_register_shift() {
        assert_eq!(
            shifter_operand(0xE1A0_0311),
            Some("r1, LSL r3".to_owned())
        );
        // Bit 7 must be zero in the register-shift form.
        assert_eq!(shifter_operand(0xE1A0_03B1), None);
    }

    #[test]
    fn word_or_byte_immediate_forms() {
        // Pre-indexed, negative, with writeback.
        assert_eq!(
            word_or_byte_offset(0xE531_2004),
            Some("[r1, #-0x4]!".to_owned())
        );
        // Post-indexed.
        assert_eq!(
            word_or_byte_offset(0xE491_2004),
            Some("[r1], #0x4".to_owned())
        );
    }

    #[test]
    fn word_or_byte_register_forms() {
        assert_eq!(
            word_or_byte_offset(0xE791_0002),
            Some("[r1, r2]".to_owned())
        );
        assert_eq!(
            word_or_byte_offset(0xE791_0222),
            Some("[r1, r2, LSR #4]".to_owned())
        );
        assert_eq!(
            word_or_byte_offset(0xE791_0062),
            Some("[r1, r2, RRX]".to_owned())
        );
        // Bit 4 must be zero in the register form.
        assert_eq!(word_or_byte_offset(0xE791_0012), None);
    }

    #[test]
    fn halfword_forms() {
        assert_eq!(
            halfword_offset(0xE1D1_00B2),
            Some("[r1, #0x2]".to_owned())
        );
        assert_eq!(halfword_offset(0xE191_00B2), Some("[r1, r2]".to_owned()));
        // Register form with nonzero bits 8-11.
        assert_eq!(halfword_offset(0xE191_01B2), None);
        // Post-indexed with writeback does not exist.
        assert_eq!(halfword_offset(0xE0F1_00B2), None);
    }

    #[test]
    fn multiple_suffixes() {
        assert_eq!(multiple_suffix(0xE810_0000), "DA");
        assert_eq!(multiple_suffix(0xE890_0000), "IA");
        assert_eq!(multiple_suffix(0xE910_0000), "DB");
        assert_eq!(multiple_suffix(0xE990_0000), "IB");
    }

    #[test]
    fn coprocessor_offsets_count_words() {
        assert_eq!(
            coprocessor_offset(0xED91_5101),
            Some("[r1, #0x4]".to_owned())
        );
        assert_eq!(
            coprocessor_offset(0xED11_5101),
            Some("[r1, #-0x4]".to_owned())
        );
        // Post-indexed with writeback does not exist.
        assert_eq!(coprocessor_offset(0xECB1_5101), None);
    }
}
