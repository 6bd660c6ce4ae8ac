//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An access of `width` bytes at `offset` does not fit in a buffer of `len` bytes
    #[error("access of {width} bytes at offset {offset:#x} is out of bounds for a buffer of {len} bytes")]
    OutOfBounds {
        /// Offset of the first byte accessed
        offset: usize,
        /// Number of bytes accessed
        width: usize,
        /// Length of the buffer
        len: usize,
    },

    /// The offset list ended before its terminating zero byte
    #[error("offset list is not terminated")]
    UnterminatedList,

    /// An entry of the offset list does not fit in a 32-bit offset
    #[error("offset list entry overflows a 32-bit offset")]
    OffsetOverflow,

    /// Offsets handed to the encoder were not strictly increasing
    #[error("offsets must be strictly increasing, {offset:#x} follows {previous:#x}")]
    UnorderedOffsets {
        /// The offset written before `offset`
        previous: u32,
        /// The offending offset
        offset: u32,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
