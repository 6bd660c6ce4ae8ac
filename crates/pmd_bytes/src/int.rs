//! Endian-aware fixed-width integer access over byte buffers.

use std::ops::Range;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{Error, Result};

mod private {
    pub trait Sealed {}
}

/// A fixed-width integer that can be read from and written to a byte buffer.
///
/// Implemented for the 8, 16, 32 and 64 bit signed and unsigned integers.
pub trait Integer: private::Sealed + Copy {
    /// Width of the integer in bytes
    const WIDTH: usize;

    #[doc(hidden)]
    fn decode<B: ByteOrder>(bytes: &[u8]) -> Self;

    #[doc(hidden)]
    fn encode<B: ByteOrder>(self, bytes: &mut [u8]);
}

impl private::Sealed for u8 {}
impl Integer for u8 {
    const WIDTH: usize = 1;

    #[inline]
    fn decode<B: ByteOrder>(bytes: &[u8]) -> Self {
        bytes[0]
    }

    #[inline]
    fn encode<B: ByteOrder>(self, bytes: &mut [u8]) {
        bytes[0] = self;
    }
}

impl private::Sealed for i8 {}
impl Integer for i8 {
    const WIDTH: usize = 1;

    #[inline]
    fn decode<B: ByteOrder>(bytes: &[u8]) -> Self {
        bytes[0] as i8
    }

    #[inline]
    fn encode<B: ByteOrder>(self, bytes: &mut [u8]) {
        bytes[0] = self as u8;
    }
}

macro_rules! impl_integer {
    ($ty:ty, $read:ident, $write:ident) => {
        impl private::Sealed for $ty {}
        impl Integer for $ty {
            const WIDTH: usize = std::mem::size_of::<$ty>();

            #[inline]
            fn decode<B: ByteOrder>(bytes: &[u8]) -> Self {
                B::$read(bytes)
            }

            #[inline]
            fn encode<B: ByteOrder>(self, bytes: &mut [u8]) {
                B::$write(bytes, self)
            }
        }
    };
}

impl_integer!(u16, read_u16, write_u16);
impl_integer!(i16, read_i16, write_i16);
impl_integer!(u32, read_u32, write_u32);
impl_integer!(i32, read_i32, write_i32);
impl_integer!(u64, read_u64, write_u64);
impl_integer!(i64, read_i64, write_i64);

/// Range covering `width` bytes at `offset`, if it fits in a buffer of `len` bytes.
#[inline]
pub(crate) fn checked_range(len: usize, offset: usize, width: usize) -> Result<Range<usize>> {
    offset
        .checked_add(width)
        .filter(|end| *end <= len)
        .map(|end| offset..end)
        .ok_or(Error::OutOfBounds { offset, width, len })
}

/// Read an integer of type `T` at `offset`.
///
/// ```
/// use pmd_bytes::read_int;
///
/// let data = [0x34, 0x12, 0xFF];
/// assert_eq!(read_int::<u16>(&data, 0, false).unwrap(), 0x1234);
/// assert_eq!(read_int::<i8>(&data, 2, false).unwrap(), -1);
/// assert!(read_int::<u16>(&data, 2, false).is_err());
/// ```
#[inline]
pub fn read_int<T: Integer>(buffer: &[u8], offset: usize, big_endian: bool) -> Result<T> {
    let bytes = &buffer[checked_range(buffer.len(), offset, T::WIDTH)?];
    Ok(if big_endian {
        T::decode::<BigEndian>(bytes)
    } else {
        T::decode::<LittleEndian>(bytes)
    })
}

/// Write `value` at `offset`, overwriting the bytes that are there.
///
/// The buffer is never grown; writing past its end fails with [`Error::OutOfBounds`].
#[inline]
pub fn write_int<T: Integer>(
    value: T,
    buffer: &mut [u8],
    offset: usize,
    big_endian: bool,
) -> Result<()> {
    let range = checked_range(buffer.len(), offset, T::WIDTH)?;
    let bytes = &mut buffer[range];
    if big_endian {
        value.encode::<BigEndian>(bytes)
    } else {
        value.encode::<LittleEndian>(bytes)
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::int::{read_int, write_int};

    #[test]
    fn read_widths() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x01, 0x02, 0x03, 0x04,
            0x05, 0x06, 0x07, 0x08,
        ];

        assert_eq!(read_int::<u8>(&input, 3, false)?, 0x04);
        assert_eq!(read_int::<u16>(&input, 0, false)?, 0x0201);
        assert_eq!(read_int::<u16>(&input, 0, true)?, 0x0102);
        assert_eq!(read_int::<u32>(&input, 4, false)?, 0x08070605);
        assert_eq!(read_int::<u32>(&input, 4, true)?, 0x05060708);
        assert_eq!(read_int::<u64>(&input, 0, false)?, 0x0807060504030201);
        assert_eq!(read_int::<u64>(&input, 0, true)?, 0x0102030405060708);

        Ok(())
    }

    #[test]
    fn read_signed_keeps_twos_complement() -> Result<()> {
        let input = [0xFE, 0xFF, 0xFF, 0xFF];

        assert_eq!(read_int::<i8>(&input, 0, false)?, -2);
        assert_eq!(read_int::<i16>(&input, 0, false)?, -2);
        assert_eq!(read_int::<i32>(&input, 0, false)?, -2);
        assert_eq!(read_int::<u16>(&input, 0, false)?, 0xFFFE);
        assert_eq!(read_int::<i16>(&input, 0, true)?, -257);

        Ok(())
    }

    #[test]
    fn read_past_end() {
        let input = [0x00, 0x01, 0x02];

        assert_eq!(
            read_int::<u32>(&input, 0, false),
            Err(Error::OutOfBounds {
                offset: 0,
                width: 4,
                len: 3
            })
        );
        assert!(read_int::<u8>(&input, 3, false).is_err());
        assert!(read_int::<u64>(&input, usize::MAX, true).is_err());
    }

    #[test]
    fn write_in_place() -> Result<()> {
        let mut buffer = vec![0u8; 8];

        write_int(0x1234u16, &mut buffer, 0, false)?;
        write_int(0x1234u16, &mut buffer, 2, true)?;
        write_int(-1i32, &mut buffer, 4, false)?;

        assert_eq!(buffer, vec![0x34, 0x12, 0x12, 0x34, 0xFF, 0xFF, 0xFF, 0xFF]);

        Ok(())
    }

    #[test]
    fn write_past_end_leaves_buffer_untouched() {
        let mut buffer = vec![0u8; 6];

        assert!(write_int(0xAABBCCDDu32, &mut buffer, 4, false).is_err());
        assert_eq!(buffer, vec![0u8; 6]);
    }
}
