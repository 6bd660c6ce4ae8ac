//! Base types for structure of DSE files.

use binrw::{BinRead, BinWrite};
use std::fmt;

/// Size of a chunk header
pub const CHUNK_HEADER_LEN: usize = 0x10;

/// Chunk tags, as the big-endian value of their four ASCII characters
pub mod tags {
    /// `song`, the SMDL song information block
    pub const SONG: u32 = u32::from_be_bytes(*b"song");
    /// `trk `, an SMDL track
    pub const TRACK: u32 = u32::from_be_bytes(*b"trk ");
    /// `wavi`, the SWDL sample information table
    pub const WAVI: u32 = u32::from_be_bytes(*b"wavi");
    /// `prgi`, the SWDL program table
    pub const PRGI: u32 = u32::from_be_bytes(*b"prgi");
    /// `kgrp`, the SWDL keygroup table
    pub const KGRP: u32 = u32::from_be_bytes(*b"kgrp");
    /// `pcmd`, the SWDL sample data
    pub const PCMD: u32 = u32::from_be_bytes(*b"pcmd");
    /// `eod `, ends the chunks of a SWDL file
    pub const END_OF_DATA: u32 = u32::from_be_bytes(*b"eod ");
    /// `eoc `, ends the chunks of SMDL and SEDL files
    pub const END_OF_CHUNKS: u32 = u32::from_be_bytes(*b"eoc ");
}

/// Size of the `song` chunk, which does not store a data length
pub const SONG_CHUNK_LEN: usize = 0x40;

/// The three DSE file types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DseKind {
    /// Sample bank
    Swdl,

    /// Music sequence
    Smdl,

    /// Sound effect sequences
    Sedl,
}

impl DseKind {
    /// Detect the file type from the magic number at the start of `data`
    pub fn from_magic(data: &[u8]) -> Option<DseKind> {
        match data.get(..4)? {
            b"swdl" => Some(DseKind::Swdl),
            b"smdl" => Some(DseKind::Smdl),
            b"sedl" => Some(DseKind::Sedl),
            _ => None,
        }
    }

    /// Magic number at the start of the file
    pub const fn magic(self) -> &'static [u8; 4] {
        match self {
            DseKind::Swdl => b"swdl",
            DseKind::Smdl => b"smdl",
            DseKind::Sedl => b"sedl",
        }
    }

    /// Size of the file header, the first chunk starts right after it
    pub const fn header_len(self) -> usize {
        match self {
            DseKind::Swdl => 0x50,
            DseKind::Smdl | DseKind::Sedl => 0x40,
        }
    }

    /// Tag of the chunk that ends the file
    pub const fn end_tag(self) -> u32 {
        match self {
            DseKind::Swdl => tags::END_OF_DATA,
            DseKind::Smdl | DseKind::Sedl => tags::END_OF_CHUNKS,
        }
    }
}

impl fmt::Display for DseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DseKind::Swdl => f.write_str("SWDL"),
            DseKind::Smdl => f.write_str("SMDL"),
            DseKind::Sedl => f.write_str("SEDL"),
        }
    }
}

/// The fields shared by the headers of all DSE files
///
/// All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Default, Clone, PartialEq)]
#[brw(little)]
pub struct DseHeader {
    /// `swdl`, `smdl` or `sedl`
    pub magic: [u8; 4],

    /// Length of the whole file
    #[brw(pad_before = 4)]
    pub file_length: u32,

    /// Format version, 0x415 in Explorers of Sky
    pub version: u16,

    /// Creation date
    #[brw(pad_before = 10)]
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub centisecond: u8,

    /// Internal file name, NUL padded
    pub name: [u8; 16],
}

impl DseHeader {
    /// The internal file name, up to the first NUL
    pub fn name(&self) -> String {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(self.name.len());
        String::from_utf8_lossy(&self.name[..end]).into_owned()
    }
}

/// A chunk found while walking a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Four ASCII characters, stored big-endian
    pub tag: u32,

    /// Number of data bytes following the chunk header
    pub length: u32,

    /// Offset of the chunk header from the start of the file
    pub offset: usize,

    /// First chunk parameter, its meaning depends on the chunk
    pub param1: u32,

    /// Second chunk parameter, its meaning depends on the chunk
    pub param2: u32,
}

impl ChunkHeader {
    /// The tag as text
    pub fn tag_str(&self) -> String {
        String::from_utf8_lossy(&self.tag.to_be_bytes()).into_owned()
    }

    /// Offset of the chunk data from the start of the file
    pub fn data_offset(&self) -> usize {
        self.offset + CHUNK_HEADER_LEN
    }

    /// Borrow the chunk data from the file it was found in
    pub fn data<'a>(&self, file: &'a [u8]) -> Option<&'a [u8]> {
        file.get(self.data_offset()..self.data_offset() + self.length as usize)
    }
}
