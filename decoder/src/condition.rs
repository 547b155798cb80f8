use serde::{Deserialize, Serialize};

use std::fmt::{Display, Formatter};

/// Condition field of an ARM instruction (bits 28-31) and of a Thumb
/// conditional branch (bits 8-11).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// Equal (Z set)
    EQ = 0x0,
    /// Not equal (Z clear)
    NE = 0x1,
    /// Carry set / unsigned higher or same
    CS = 0x2,
    /// Carry clear / unsigned lower
    CC = 0x3,
    /// Minus / negative (N set)
    MI = 0x4,
    /// Plus / positive or zero (N clear)
    PL = 0x5,
    /// Overflow (V set)
    VS = 0x6,
    /// No overflow (V clear)
    VC = 0x7,
    /// Unsigned higher (C set and Z clear)
    HI = 0x8,
    /// Unsigned lower or same (C clear or Z set)
    LS = 0x9,
    /// Signed greater than or equal (N == V)
    GE = 0xA,
    /// Signed less than (N != V)
    LT = 0xB,
    /// Signed greater than (Z clear and N == V)
    GT = 0xC,
    /// Signed less than or equal (Z set or N != V)
    LE = 0xD,
    /// Always (unconditional)
    AL = 0xE,
    /// Never (obsolete, unpredictable on ARMv4T)
    NV = 0xF,
}

impl From<u8> for Condition {
    fn from(cond: u8) -> Self {
        match cond {
            0x0 => Self::EQ,
            0x1 => Self::NE,
            0x2 => Self::CS,
            0x3 => Self::CC,
            0x4 => Self::MI,
            0x5 => Self::PL,
            0x6 => Self::VS,
            0x7 => Self::VC,
            0x8 => Self::HI,
            0x9 => Self::LS,
            0xA => Self::GE,
            0xB => Self::LT,
            0xC => Self::GT,
            0xD => Self::LE,
            0xE => Self::AL,
            0xF => Self::NV,
            _ => unreachable!("condition is a 4-bit field"),
        }
    }
}

impl Display for Condition {
    /// Mnemonic suffix of the condition. `AL` renders as the empty
    /// string since unconditional instructions never spell it.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EQ => f.write_str("EQ"),
            Self::NE => f.write_str("NE"),
            Self::CS => f.write_str("CS"),
            Self::CC => f.write_str("CC"),
            Self::MI => f.write_str("MI"),
            Self::PL => f.write_str("PL"),
            Self::VS => f.write_str("VS"),
            Self::VC => f.write_str("VC"),
            Self::HI => f.write_str("HI"),
            Self::LS => f.write_str("LS"),
            Self::GE => f.write_str("GE"),
            Self::LT => f.write_str("LT"),
            Self::GT => f.write_str("GT"),
            Self::LE => f.write_str("LE"),
            Self::AL => Ok(()),
            Self::NV => f.write_str("NV"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_4_bit_field() {
        assert_eq!(Condition::from(0x0), Condition::EQ);
        assert_eq!(Condition::from(0xB), Condition::LT);
        assert_eq!(Condition::from(0xE), Condition::AL);
        assert_eq!(Condition::from(0xF), Condition::NV);
    }

    #[test]
    fn always_has_no_suffix() {
        assert_eq!(Condition::AL.to_string(), "");
    }

    #[test]
    fn display() {
        assert_eq!(Condition::EQ.to_string(), "EQ");
        assert_eq!(Condition::LS.to_string(), "LS");
        assert_eq!(Condition::NV.to_string(), "NV");
    }
}
