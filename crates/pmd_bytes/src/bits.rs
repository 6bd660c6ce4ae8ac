//! Bit-granular positions inside a byte buffer.

/// A position in a byte buffer tracked at bit granularity
///
/// Bits are numbered most-significant first inside each byte, which is the order the PX
/// command bytes are consumed in. The bit offset is always kept in `0..8`: moving past the
/// last bit of a byte carries into the byte index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitCursor {
    byte: usize,
    bit: u8,
}

impl BitCursor {
    /// Create a cursor, normalizing a bit offset of 8 or more into the byte index
    pub const fn new(byte: usize, bit: u8) -> Self {
        BitCursor {
            byte: byte + (bit / 8) as usize,
            bit: bit % 8,
        }
    }

    /// Create a cursor from an absolute bit index
    pub const fn from_bit_index(index: usize) -> Self {
        BitCursor {
            byte: index / 8,
            bit: (index % 8) as u8,
        }
    }

    /// Byte index
    pub const fn byte(&self) -> usize {
        self.byte
    }

    /// Bit offset inside the byte, in `0..8`
    pub const fn bit(&self) -> u8 {
        self.bit
    }

    /// Absolute bit index from the start of the buffer
    pub const fn bit_index(&self) -> usize {
        self.byte * 8 + self.bit as usize
    }

    /// Whether the cursor sits on the first bit of a byte
    pub const fn is_byte_aligned(&self) -> bool {
        self.bit == 0
    }

    /// Mask selecting the current bit inside its byte
    pub const fn mask(&self) -> u8 {
        0x80 >> self.bit
    }

    /// Move forward by `bits`
    pub fn advance(&mut self, bits: usize) {
        *self = Self::from_bit_index(self.bit_index() + bits);
    }

    /// Move backward by `bits`, returning `false` and leaving the cursor untouched if that
    /// would go before the start of the buffer
    pub fn retreat(&mut self, bits: usize) -> bool {
        match self.bit_index().checked_sub(bits) {
            Some(index) => {
                *self = Self::from_bit_index(index);
                true
            }
            None => false,
        }
    }

    /// Read the current bit of `data`, `None` when the byte is past its end
    pub fn get(&self, data: &[u8]) -> Option<bool> {
        data.get(self.byte).map(|byte| byte & self.mask() != 0)
    }

    /// Set or clear the current bit of `data`, `false` when the byte is past its end
    pub fn set(&self, data: &mut [u8], value: bool) -> bool {
        match data.get_mut(self.byte) {
            Some(byte) => {
                if value {
                    *byte |= self.mask();
                } else {
                    *byte &= !self.mask();
                }
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::bits::BitCursor;

    #[test]
    fn normalizes_on_creation() {
        let cursor = BitCursor::new(2, 11);
        assert_eq!(cursor.byte(), 3);
        assert_eq!(cursor.bit(), 3);
        assert_eq!(cursor.bit_index(), 27);
    }

    #[test]
    fn advance_carries_into_next_byte() {
        let mut cursor = BitCursor::new(0, 6);
        cursor.advance(1);
        assert_eq!((cursor.byte(), cursor.bit()), (0, 7));
        cursor.advance(1);
        assert_eq!((cursor.byte(), cursor.bit()), (1, 0));
        assert!(cursor.is_byte_aligned());
        cursor.advance(17);
        assert_eq!((cursor.byte(), cursor.bit()), (3, 1));
    }

    #[test]
    fn retreat_borrows_from_previous_byte() {
        let mut cursor = BitCursor::new(1, 0);
        assert!(cursor.retreat(1));
        assert_eq!((cursor.byte(), cursor.bit()), (0, 7));
        assert!(!cursor.retreat(8));
        assert_eq!((cursor.byte(), cursor.bit()), (0, 7));
        assert!(cursor.retreat(7));
        assert_eq!(cursor, BitCursor::default());
    }

    #[test]
    fn bits_are_most_significant_first() {
        let mut data = [0b1000_0001u8, 0x00];

        assert_eq!(BitCursor::new(0, 0).get(&data), Some(true));
        assert_eq!(BitCursor::new(0, 1).get(&data), Some(false));
        assert_eq!(BitCursor::new(0, 7).get(&data), Some(true));
        assert_eq!(BitCursor::new(2, 0).get(&data), None);

        assert!(BitCursor::new(1, 2).set(&mut data, true));
        assert!(BitCursor::new(0, 0).set(&mut data, false));
        assert!(!BitCursor::new(5, 0).set(&mut data, true));
        assert_eq!(data, [0b0000_0001, 0b0010_0000]);
    }
}
