//! Bit-field primitives for single register bytes.

/// Location of a bit field inside a register byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Bits covered by the field, in register position
    pub mask: u8,
    /// Position of the field's least significant bit
    pub shift: u8,
}

impl Field {
    /// Describe a field by its in-register mask and LSB position
    #[must_use]
    pub const fn new(mask: u8, shift: u8) -> Self {
        Self { mask, shift }
    }

    /// Read this field out of `byte`
    #[must_use]
    #[inline(always)]
    pub const fn extract(self, byte: u8) -> u8 {
        extract_bits(byte, self.mask, self.shift)
    }

    /// Place `value` at this field's position
    ///
    /// Only the field's bits can be set in the result. Every other bit is
    /// zero, so the caller ORs it into a previously read register byte.
    #[must_use]
    #[inline(always)]
    pub const fn insert(self, value: u8) -> u8 {
        insert_bits(value, self.mask, self.shift)
    }

    /// Clear this field in `byte`, keeping every other bit
    #[must_use]
    #[inline(always)]
    pub const fn clear(self, byte: u8) -> u8 {
        byte & !self.mask
    }
}

/// `(byte & mask) >> shift`
#[must_use]
#[inline(always)]
pub const fn extract_bits(byte: u8, mask: u8, shift: u8) -> u8 {
    (byte & mask) >> shift
}

/// `(value << shift) & mask`
#[must_use]
#[inline(always)]
pub const fn insert_bits(value: u8, mask: u8, shift: u8) -> u8 {
    (value << shift) & mask
}

#[cfg(test)]
mod tests {
    use super::*;

    const MID: Field = Field::new(0b0001_1100, 2);

    #[test]
    fn extracts_field_ignoring_neighbours() {
        assert_eq!(MID.extract(0b1110_0011), 0);
        assert_eq!(MID.extract(0b0001_1100), 0b111);
        assert_eq!(MID.extract(0b1111_0111), 0b101);
    }

    #[test]
    fn insert_only_touches_field_bits() {
        assert_eq!(MID.insert(0b101), 0b0001_0100);
        // Bits shifted past the mask are dropped
        assert_eq!(MID.insert(0xFF), 0b0001_1100);
        assert_eq!(MID.insert(0) | 0b1110_0011, 0b1110_0011);
    }

    #[test]
    fn clear_keeps_other_bits() {
        assert_eq!(MID.clear(0xFF), 0b1110_0011);
    }

    #[test]
    fn insert_then_extract_is_identity_within_width() {
        for value in 0..=0b111 {
            assert_eq!(MID.extract(MID.insert(value)), value);
        }
    }
}
