//! Read and write cursors over byte buffers.
//!
//! Reading and writing are split into two types: [`ByteReader`] borrows the buffer it walks,
//! [`ByteWriter`] owns the buffer it grows.

use crate::error::{Error, Result};
use crate::int::{read_int, Integer};

/// Forward cursor over a borrowed byte slice
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a cursor positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, position: 0 }
    }

    /// Current offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes left after the cursor
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Move the cursor to an absolute offset. Seeking to the end of the buffer is allowed.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(Error::OutOfBounds {
                offset: position,
                width: 0,
                len: self.data.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Read an integer and advance past it
    #[inline]
    pub fn read<T: Integer>(&mut self, big_endian: bool) -> Result<T> {
        let value = read_int::<T>(self.data, self.position, big_endian)?;
        self.position += T::WIDTH;
        Ok(value)
    }

    /// Read one byte
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read::<u8>(false)
    }

    /// Read a little-endian `u32`
    #[inline]
    pub fn read_u32_le(&mut self) -> Result<u32> {
        self.read::<u32>(false)
    }

    /// Read a big-endian `u32`
    #[inline]
    pub fn read_u32_be(&mut self) -> Result<u32> {
        self.read::<u32>(true)
    }
}

/// Growing cursor over an owned byte buffer
///
/// Writes always append.
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    data: Vec<u8>,
}

impl ByteWriter {
    /// Create an empty writer with room for `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Continue writing after the contents of `data`
    pub fn from_vec(data: Vec<u8>) -> Self {
        ByteWriter { data }
    }

    /// Offset the next write will land at
    pub fn position(&self) -> usize {
        self.data.len()
    }

    /// Append one byte
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.data.push(value);
    }

    /// Append raw bytes
    pub fn write_all(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Append `fill` until the length is a multiple of `alignment`.
    ///
    /// Alignments of 0 and 1 leave the buffer as it is. Returns the number of bytes added.
    pub fn pad_to(&mut self, alignment: usize, fill: u8) -> usize {
        let target = crate::integer_encoding::align_up(self.data.len(), alignment);
        let added = target - self.data.len();
        self.data.resize(target, fill);
        added
    }

    /// Mutable access to the bytes written so far
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Unwrap and return the written buffer
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::cursor::{ByteReader, ByteWriter};
    use crate::error::{Error, Result};

    #[test]
    fn reader_walks_forward() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x73, 0x77, 0x64, 0x6C,  // Tag
            0x10, 0x00, 0x00, 0x00,  // LE u32
            0x00, 0x00, 0x00, 0x20,  // BE u32
            0xAA,
        ];

        let mut reader = ByteReader::new(&input);
        assert_eq!(reader.read_u32_be()?, u32::from_be_bytes(*b"swdl"));
        assert_eq!(reader.read_u32_le()?, 0x10);
        assert_eq!(reader.read_u32_be()?, 0x20);
        assert_eq!(reader.remaining(), 1);
        assert_eq!(reader.read_u8()?, 0xAA);
        assert_eq!(reader.remaining(), 0);

        Ok(())
    }

    #[test]
    fn reader_stays_put_on_failure() -> Result<()> {
        let input = [0x01, 0x02, 0x03];

        let mut reader = ByteReader::new(&input);
        reader.seek(1)?;
        assert!(matches!(
            reader.read_u32_le(),
            Err(Error::OutOfBounds { offset: 1, .. })
        ));
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read_u8()?, 0x02);
        reader.seek(3)?;
        assert!(reader.read_u8().is_err());
        assert!(reader.seek(4).is_err());

        Ok(())
    }

    #[test]
    fn writer_appends() {
        let mut writer = ByteWriter::with_capacity(8);
        writer.write_all(b"PKDPX");
        writer.write_u8(0xFF);
        writer.as_mut_slice()[5] = 0x01;

        assert_eq!(writer.position(), 6);
        assert_eq!(
            writer.into_inner(),
            vec![0x50, 0x4B, 0x44, 0x50, 0x58, 0x01]
        );
    }

    #[test]
    fn writer_pads_to_alignment() {
        let mut writer = ByteWriter::from_vec(vec![0x00; 5]);

        assert_eq!(writer.pad_to(4, 0xAA), 3);
        assert_eq!(writer.pad_to(4, 0xAA), 0);
        assert_eq!(writer.pad_to(0, 0xAA), 0);
        assert_eq!(
            writer.into_inner(),
            vec![0x00, 0x00, 0x00, 0x00, 0x00, 0xAA, 0xAA, 0xAA]
        );
    }
}
