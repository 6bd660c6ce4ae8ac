//! Low-level byte handling shared by the PMD format crates.
//!
//! Every parser in this workspace works on whole files held in memory. This crate provides the
//! pieces they all build on:
//!
//! - [`read_int`] / [`write_int`]: fixed-width integers of 8 to 64 bits, signed or unsigned, in
//!   either byte order, with bounds checking.
//! - [`ByteReader`] / [`ByteWriter`]: a borrowing read cursor and an owning write cursor.
//! - [`BitCursor`]: a bit-granular position, used for the PX command bits.
//! - [`integer_encoding`]: the delta-encoded offset lists found in SIR0 and DSE files.
//!
//! All multi-byte values in the game's files are little-endian unless stated otherwise.

pub mod bits;
pub mod cursor;
pub mod error;
pub mod int;
pub mod integer_encoding;

pub use bits::BitCursor;
pub use cursor::{ByteReader, ByteWriter};
pub use error::{Error, Result};
pub use int::{read_int, write_int, Integer};
