//! Decoders for the two ARMv4T instruction sets.
//!
//! [`arm::disassemble`] turns a raw 32-bit A32 word into its assembly
//! mnemonic, [`thumb::disassemble`] does the same for a 16-bit Thumb-1
//! halfword. Both are pure functions over the word: no cpu state, no
//! symbol resolution, branch targets are pipeline-relative offsets.
//!
//! Words that hit no encoding, or that violate a should-be-zero /
//! should-be-one constraint of the encoding they hit, come back as the
//! literal [`UNKNOWN`].

pub mod arm;
mod bitwise;
mod condition;
pub mod thumb;

use serde::{Deserialize, Serialize};

/// Rendering of every word the decoders cannot express.
pub const UNKNOWN: &str = "UNKNOWN";

/// Letter case of the produced mnemonic. Presentation only: applied to
/// the finished line (including [`UNKNOWN`]), never during decoding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Case {
    #[default]
    Upper,
    Lower,
}

impl Case {
    pub(crate) fn apply(self, text: String) -> String {
        match self {
            Self::Upper => text,
            Self::Lower => text.to_lowercase(),
        }
    }
}
