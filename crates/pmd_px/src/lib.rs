//! This library handles the **PX** compression used by *Pokémon Mystery Dungeon*, and the
//! **PKDPX** and **AT4PX** containers it ships in.
//!
//! # PX Stream Format Documentation
//!
//! PX is an LZ-style format with an extra command for short nibble patterns. A stream is a
//! sequence of groups, each starting with a command byte whose bits are read from the most
//! significant down:
//!
//! - `1`: the next byte is copied to the output as it is.
//! - `0`: the next byte `b` is split into `high = b >> 4` and `low = b & 0xF`.
//!   - When `high` is one of the nine control flags, the command is a **pattern**: two bytes are
//!     built from `low` and the index of the flag. See [`decode::pattern_bytes`].
//!   - Otherwise the command is a **back-reference**: with the following byte `c`,
//!     `distance = 0x1000 - ((low << 8) | c)` and `length = high + 3`. The bytes are copied one
//!     at a time, so a copy may overlap its own output.
//!
//! The seven high nibbles that are not control flags are the only back-reference lengths a
//! stream can use. Decoding stops once the decompressed length from the header is reached.
//!
//! ## Container Structure
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 5 bytes: "PKDPX" or "AT4PX"                                |
//! | 0x0005         | Container Length       | 2 bytes: Length of the whole container, header included    |
//! | 0x0007         | Control Flags          | 9 bytes: High nibbles selecting pattern commands           |
//! | 0x0010         | Decompressed Length    | PKDPX: 4 bytes, AT4PX: 2 bytes                             |
//!
//! The compressed stream follows the header. Both containers are often wrapped in a SIR0
//! container, which [`decompress`] removes on its own.
//!
//! ## Usage
//!
//! ```
//! # fn doit() -> pmd_px::error::Result<()>
//! # {
//! use pmd_px::{compress, decompress, PxFormat, PxOptions};
//!
//! let data = b"Wigglytuff's Guild, Wigglytuff's Guild".to_vec();
//! let container = compress(&data, PxFormat::Pkdpx, PxOptions::default())?;
//! assert!(container.len() < data.len() + 0x14);
//! assert_eq!(decompress(&container)?, data);
//! # Ok(())
//! # }
//! # doit().unwrap();
//! ```

pub mod container;
pub mod decode;
pub mod encode;
pub mod error;
pub mod types;

pub use container::{
    compress, compress_sir0, decompress, is_at4px, is_pkdpx, PxContainer, PxFormat, AT4PX_MAGIC,
    PKDPX_MAGIC,
};
pub use decode::decompress_stream;
pub use encode::{compress_stream, tokenize};
pub use error::{Error, MalformedStreamError, Result};
pub use types::{
    At4pxHeader, CompressionLevel, ControlFlags, PkdpxHeader, PxOptions, PxStream, Token,
};
