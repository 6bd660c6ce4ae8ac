//! This library walks the chunks of the **DSE** audio files used by *Pokémon Mystery Dungeon*.
//!
//! # DSE File Format Documentation
//!
//! The sound engine stores three kinds of files: **SWDL** sample banks, **SMDL** music sequences
//! and **SEDL** sound effect sequences. All three are a file header followed by a list of
//! chunks.
//!
//! ## File Header
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "swdl", "smdl" or "sedl"                          |
//! | 0x0008         | File Length            | 4 bytes: Length of the whole file                          |
//! | 0x000C         | Version                | 2 bytes: 0x415 in Explorers of Sky                         |
//! | 0x0018         | Date                   | 8 bytes: Year (2 bytes), month, day, hour, minute, second, centisecond |
//! | 0x0020         | Name                   | 16 bytes: NUL padded file name                             |
//!
//! The header is 0x50 bytes long in SWDL files and 0x40 bytes long in SMDL and SEDL files.
//!
//! ## Chunks
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Tag                    | 4 bytes: ASCII, e.g. "wavi", "trk ", "eod "                |
//! | 0x0004         | Parameter 1            | 4 bytes                                                    |
//! | 0x0008         | Parameter 2            | 4 bytes                                                    |
//! | 0x000C         | Length                 | 4 bytes: Length of the data after the chunk header         |
//!
//! Chunks start on 4 byte boundaries. The `song` chunk of SMDL files is always 0x40 bytes long
//! and its length field holds something else. The list ends with an `eod ` chunk in SWDL files
//! and an `eoc ` chunk in SMDL and SEDL files.

pub mod error;
pub mod read;
pub mod types;

pub use error::{Error, Result};
pub use read::{parse_chunks, DseFile};
pub use types::{tags, ChunkHeader, DseHeader, DseKind, CHUNK_HEADER_LEN};
