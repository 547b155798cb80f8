//! Thumb-1 (16-bit) instruction decoding.
//!
//! Same dispatch scheme as the A32 side: first pattern whose masked
//! bits match wins, so specific classes sit above the wide ones they
//! carve encodings out of. Unlike A32 the table is not total; the
//! `0xF000` space belongs to the long branch-with-link pair, which
//! needs two halfwords and is out of scope here.

mod instructions;

use crate::{Case, UNKNOWN};

type ClassDecoder = fn(u16) -> Option<String>;

/// `(mask, expected, decoder)` triples, most specific first.
///
/// The software-interrupt entry sits below conditional-branch, whose
/// mask covers it; `0xDFxx` therefore renders as `BNV`.
const PATTERNS: [(u16, u16, ClassDecoder); 17] = [
    (0xF800, 0x1800, instructions::add_sub_register),
    (0xE000, 0x0000, instructions::shift_by_immediate),
    (0xE000, 0x2000, instructions::immediate_op),
    (0xFC00, 0x4000, instructions::data_processing_register),
    (0xFC00, 0x4400, instructions::special_data_processing),
    (0xF800, 0x4800, instructions::load_literal_pool),
    (0xF000, 0x5000, instructions::load_store_register_offset),
    (0xE000, 0x6000, instructions::load_store_word_byte),
    (0xF000, 0x8000, instructions::load_store_halfword),
    (0xF000, 0x9000, instructions::load_store_stack),
    (0xF000, 0xA000, instructions::add_sp_or_pc),
    (0xFF00, 0xB000, instructions::adjust_stack_pointer),
    (0xF600, 0xB400, instructions::push_pop_register_list),
    (0xF000, 0xC000, instructions::load_store_multiple),
    (0xF000, 0xD000, instructions::conditional_branch),
    (0xFF00, 0xDF00, instructions::software_interrupt),
    (0xF800, 0xE000, instructions::unconditional_branch),
];

/// Decodes one Thumb halfword into its mnemonic line.
#[must_use]
pub fn disassemble(word: u16, case: Case) -> String {
    let class = PATTERNS
        .iter()
        .find(|(mask, expected, _)| word & mask == *expected);

    let text = match class {
        Some((_, _, decode)) => decode(word).unwrap_or_else(|| {
            tracing::debug!("reserved field violation in 0x{word:04X}");
            UNKNOWN.to_owned()
        }),
        None => {
            tracing::debug!("no instruction class matches 0x{word:04X}");
            UNKNOWN.to_owned()
        }
    };

    case.apply(text)
}
