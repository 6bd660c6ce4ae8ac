//! Base types for PX streams and the containers holding them.

use binrw::{BinRead, BinWrite};
use bon::Builder;
use std::fmt;

/// Number of control flags stored in a container header
pub const CONTROL_FLAG_COUNT: usize = 9;

/// Shortest back-reference
pub const MIN_MATCH: usize = 3;

/// Longest back-reference
pub const MAX_MATCH: usize = 18;

/// Furthest a back-reference can reach
pub const MAX_DISTANCE: usize = 0x1000;

/// Number of high nibbles left for back-reference lengths once the control flags are taken
pub const MAX_LENGTH_NIBBLES: usize = 16 - CONTROL_FLAG_COUNT;

/// The nine high nibble values that select a pattern command instead of a back-reference
pub type ControlFlags = [u8; CONTROL_FLAG_COUNT];

/// A single command of a PX stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Copy one byte as it is
    Literal(u8),

    /// Copy `length` bytes from `distance` bytes back in the output
    BackReference {
        /// How far back the copy starts, `1..=0x1000`
        distance: u16,
        /// Number of bytes to copy, `3..=18`
        length: u8,
    },

    /// Two bytes rebuilt from a nibble, see [`crate::decode::pattern_bytes`]
    Pattern {
        /// Index of the control flag selecting the pattern
        index: u8,
        /// Nibble the pattern is built from
        nibble: u8,
    },
}

impl Token {
    /// Number of output bytes this command produces
    pub const fn output_len(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::BackReference { length, .. } => *length as usize,
            Token::Pattern { .. } => 2,
        }
    }
}

/// How hard the encoder looks for back-references
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Only literals, the stream is bigger than the input
    Store,

    /// Look at a bounded number of candidates per position
    Fast,

    /// Look at every candidate in the window
    #[default]
    Best,
}

impl CompressionLevel {
    pub(crate) const fn max_candidates(self) -> usize {
        match self {
            CompressionLevel::Store => 0,
            CompressionLevel::Fast => 32,
            CompressionLevel::Best => usize::MAX,
        }
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressionLevel::Store => f.write_str("store"),
            CompressionLevel::Fast => f.write_str("fast"),
            CompressionLevel::Best => f.write_str("best"),
        }
    }
}

/// Options for how data should be compressed
#[derive(Debug, Clone, Copy, Builder)]
pub struct PxOptions {
    /// The amount of effort spent searching for back-references
    #[builder(default)]
    pub level: CompressionLevel,

    /// Whether pattern commands may be emitted
    #[builder(default = true)]
    pub patterns: bool,
}

impl Default for PxOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A compressed PX stream together with what a container header needs to decode it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PxStream {
    /// High nibbles that select pattern commands
    pub control_flags: ControlFlags,

    /// Number of bytes the stream decodes to
    pub decompressed_len: usize,

    /// The command and data bytes
    pub data: Vec<u8>,
}

/// PKDPX container header
///
/// All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(magic = b"PKDPX", little)]
pub struct PkdpxHeader {
    /// Length of the whole container, header included
    pub container_length: u16,

    /// Control flags of the stream
    pub control_flags: ControlFlags,

    /// Length of the data once decompressed
    pub decompressed_length: u32,
}

/// AT4PX container header
///
/// Same as [`PkdpxHeader`], with a 16-bit decompressed length.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(magic = b"AT4PX", little)]
pub struct At4pxHeader {
    /// Length of the whole container, header included
    pub container_length: u16,

    /// Control flags of the stream
    pub control_flags: ControlFlags,

    /// Length of the data once decompressed
    pub decompressed_length: u16,
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::{BinRead, BinWrite};
    use pretty_assertions::assert_eq;

    use crate::error::Result;
    use crate::types::{At4pxHeader, CompressionLevel, PkdpxHeader, PxOptions, Token};

    #[test]
    fn read_pkdpx_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x50, 0x4B, 0x44, 0x50, 0x58,  // Magic
            0x1A, 0x00,                    // Container length
            0x00, 0x01, 0x02, 0x03, 0x04,  // Control flags
            0x05, 0x06, 0x07, 0x08,
            0x00, 0x01, 0x00, 0x00,        // Decompressed length
        ]);

        let expected = PkdpxHeader {
            container_length: 0x1A,
            control_flags: [0, 1, 2, 3, 4, 5, 6, 7, 8],
            decompressed_length: 0x100,
        };

        assert_eq!(PkdpxHeader::read(&mut input)?, expected);
        assert_eq!(input.position(), 0x14);

        Ok(())
    }

    #[test]
    fn write_at4px_header() -> Result<()> {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            0x41, 0x54, 0x34, 0x50, 0x58,  // Magic
            0x20, 0x00,                    // Container length
            0x01, 0x02, 0x03, 0x04, 0x05,  // Control flags
            0x06, 0x07, 0x08, 0x09,
            0x40, 0x00,                    // Decompressed length
        ];

        let header = At4pxHeader {
            container_length: 0x20,
            control_flags: [1, 2, 3, 4, 5, 6, 7, 8, 9],
            decompressed_length: 0x40,
        };

        let mut actual = Vec::new();
        header.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn token_lengths() {
        assert_eq!(Token::Literal(0).output_len(), 1);
        assert_eq!(Token::Pattern { index: 3, nibble: 2 }.output_len(), 2);
        assert_eq!(
            Token::BackReference {
                distance: 1,
                length: 18
            }
            .output_len(),
            18
        );
    }

    #[test]
    fn default_options() {
        let options = PxOptions::default();
        assert_eq!(options.level, CompressionLevel::Best);
        assert!(options.patterns);
    }
}
