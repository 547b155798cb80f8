//! A32 (32-bit ARM) instruction decoding.
//!
//! Dispatch walks [`PATTERNS`] top to bottom and hands the word to the
//! first class whose masked bits match. The order is load-bearing: the
//! class encodings overlap (every word matches the trailing
//! data-processing catch-all), so more specific patterns must come
//! first.

mod address_mode;
mod instructions;

use crate::{Case, UNKNOWN};

type ClassDecoder = fn(u32) -> Option<String>;

/// `(mask, expected, decoder)` triples, most specific first.
const PATTERNS: [(u32, u32, ClassDecoder); 14] = [
    (0x0F00_0000, 0x0F00_0000, instructions::software_interrupt),
    (0x0FFF_FFF0, 0x012F_FF10, instructions::branch_exchange),
    (0x0E00_0000, 0x0A00_0000, instructions::branch),
    (
        0x0F00_0010,
        0x0E00_0010,
        instructions::coprocessor_register_transfer,
    ),
    (
        0x0F00_0010,
        0x0E00_0000,
        instructions::coprocessor_data_processing,
    ),
    (0x0E00_0000, 0x0C00_0000, instructions::coprocessor_load_store),
    (0x0E00_0000, 0x0800_0000, instructions::load_store_multiple),
    (0x0C00_0000, 0x0400_0000, instructions::load_store),
    (0x0FC0_00F0, 0x0000_0090, instructions::multiply),
    (0x0F80_00F0, 0x0080_0090, instructions::multiply_long),
    (0x0FB0_00F0, 0x0100_0090, instructions::swap),
    (0x0D90_0000, 0x0100_0000, instructions::status_register_transfer),
    (
        0x0E00_0090,
        0x0000_0090,
        instructions::load_store_halfword_signed_byte,
    ),
    (0x0C00_0000, 0x0000_0000, instructions::data_processing),
];

/// Decodes one A32 word into its mnemonic line.
#[must_use]
pub fn disassemble(word: u32, case: Case) -> String {
    let class = PATTERNS
        .iter()
        .find(|(mask, expected, _)| word & mask == *expected);

    let text = match class {
        Some((_, _, decode)) => decode(word).unwrap_or_else(|| {
            tracing::debug!("reserved field violation in 0x{word:08X}");
            UNKNOWN.to_owned()
        }),
        None => {
            tracing::debug!("no instruction class matches 0x{word:08X}");
            UNKNOWN.to_owned()
        }
    };

    case.apply(text)
}
