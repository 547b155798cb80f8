use std::mem::size_of;
use std::ops::RangeInclusive;

/// Read-only bit accessors over an instruction word, indexed from lsb
/// (bit 0) to msb.
///
/// Field positions come straight out of the ARM Architecture Reference
/// Manual encoding tables, so every extraction site spells the inclusive
/// bit range of the field it reads.
pub trait Bits: Copy + Into<u32> {
    fn get_bit(self, bit_idx: u8) -> bool {
        debug_assert!((bit_idx as usize) < size_of::<Self>() * 8);
        let word: u32 = self.into();
        (word >> bit_idx) & 1 != 0
    }

    /// Unsigned value of the inclusive bit range `bits_range`.
    fn get_bits(self, bits_range: RangeInclusive<u8>) -> u32 {
        let start = *bits_range.start();
        let end = *bits_range.end();
        debug_assert!(start <= end && (end as usize) < size_of::<Self>() * 8);

        let word: u32 = self.into();
        let mask = ((1_u64 << (end - start + 1)) - 1) as u32;
        (word >> start) & mask
    }

    /// Returns a copy of the value sign-extended to 32 bits, treating it
    /// as a two's complement number `number_of_bits` long.
    fn sign_extended(self, number_of_bits: u8) -> u32 {
        let value: u32 = self.into();

        // XOR places the sign bit where the subtraction borrows through
        // the high bits exactly when the sign bit was set.
        let mask = 1_u32 << (number_of_bits - 1);
        (value ^ mask).wrapping_sub(mask)
    }
}

impl Bits for u32 {}
impl Bits for u16 {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::Rng;

    #[test]
    fn get_bit() {
        let b = 0b1011_0011_10_u32;
        assert!(b.get_bit(1));
        assert!(!b.get_bit(0));
        assert!(b.get_bit(2));
        assert!(!b.get_bit(31));
    }

    #[test]
    fn get_bits() {
        let b = 0b10_1100_1110_u32;
        assert_eq!(b.get_bits(0..=3), 0b1110);
        assert_eq!(b.get_bits(1..=1), 0b1);
        assert_eq!(b.get_bits(4..=7), 0b1100);
        assert_eq!(b.get_bits(8..=9), 0b10);
        assert_eq!(b.get_bits(0..=31), 0b10_1100_1110);
        assert_eq!(b.get_bits(28..=31), 0b0);
    }

    #[test]
    fn get_bits_on_halfwords() {
        let h = 0b0100_0111_0111_0000_u16;
        assert_eq!(h.get_bits(8..=15), 0b0100_0111);
        assert_eq!(h.get_bits(3..=5), 0b110);
        assert_eq!(h.get_bits(0..=2), 0);
    }

    #[test]
    fn full_width_range_matches_identity() {
        let value = rand::thread_rng().gen_range(1..=u32::MAX - 1);
        assert_eq!(value.get_bits(0..=31), value);
    }

    #[test]
    fn bits_agree_with_single_bit_reads() {
        let value: u32 = rand::thread_rng().gen_range(1..=u32::MAX - 1);
        for i in 0..32 {
            assert_eq!(value.get_bits(i..=i), u32::from(value.get_bit(i)));
        }
    }

    #[test]
    fn sign_extended() {
        let a: u32 = 0b1001; // -7 in i4
        assert_eq!(a.sign_extended(4) as i32, -7);

        let b: u32 = 0b0111; // positive values are untouched
        assert_eq!(b.sign_extended(4), 0b0111);

        // 26-bit branch offset of -8, as found in a branch-to-self.
        let offset: u32 = 0x3FF_FFF8;
        assert_eq!(offset.sign_extended(26) as i32, -8);
    }
}
