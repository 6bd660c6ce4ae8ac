//! Base types for structure of SIR0 file.

use binrw::{BinRead, BinWrite};
use bon::Builder;

/// Magic number at the start of every SIR0 container
pub const MAGIC: &[u8; 4] = b"SIR0";

/// Size of the SIR0 header
pub const HEADER_LEN: usize = 0x10;

/// Byte used for the gaps between sections in the files shipped with the game
pub const PADDING_BYTE: u8 = 0xAA;

/// Offset of the header field holding the subheader pointer
pub(crate) const SUBHEADER_FIELD: u32 = 0x0C;

/// Header fields that are pointers themselves, and therefore listed in the pointer list
pub(crate) const HEADER_POINTERS: [u32; 2] = [0x04, 0x08];

/// SIR0 file header
///
/// Defines the header of the SIR0 file which always starts with "SIR0".
/// All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(magic = b"SIR0", little)]
pub struct Sir0Header {
    /// The offset from the beginning of the file where the payload starts
    pub payload_offset: u32,

    /// The offset from the beginning of the file where the pointer list starts
    pub pointer_list_offset: u32,

    /// The offset from the beginning of the file of the payload's subheader, or zero
    pub subheader_offset: u32,
}

/// Options for how the SIR0 file should be laid out
///
/// Layout only matters to the game's loader. Two containers written with different options
/// unwrap to the same payload and pointer list.
#[derive(Debug, Clone, Copy, Builder)]
pub struct Sir0Options {
    /// The payload starts at the first multiple of this value after the header.
    ///
    /// Use 16 to place the payload right after the header, like the game's files do.
    #[builder(default = 64)]
    pub payload_alignment: usize,

    /// The whole file is padded to a multiple of this value.
    #[builder(default = 32)]
    pub alignment: usize,

    /// The byte used to fill the gaps
    #[builder(default = PADDING_BYTE)]
    pub padding_byte: u8,
}

impl Default for Sir0Options {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Whether `data` starts with the SIR0 magic number
pub fn is_sir0(data: &[u8]) -> bool {
    data.starts_with(MAGIC)
}
