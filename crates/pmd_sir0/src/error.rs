//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Transparent warpper for [`pmd_bytes::Error`], reports out of bounds accesses
    #[error(transparent)]
    Bytes(#[from] pmd_bytes::Error),

    /// file is not a SIR0 container
    #[error("file is not a SIR0 container")]
    BadMagic,

    /// the pointer list runs past the end of the file
    #[error("the pointer list runs past the end of the file")]
    TruncatedPointerList,

    /// the header offsets do not describe a valid layout
    #[error("invalid layout: payload at {payload_offset:#x}, pointer list at {pointer_list_offset:#x}, file is {len} bytes")]
    InvalidLayout {
        /// Payload offset read from the header
        payload_offset: u32,
        /// Pointer list offset read from the header
        pointer_list_offset: u32,
        /// Length of the file
        len: usize,
    },

    /// a pointer site does not leave room for a 4 byte pointer inside the payload
    #[error("pointer site {site:#x} does not fit in a payload of {len} bytes")]
    InvalidPointerSite {
        /// Offset of the site, relative to the payload
        site: u32,
        /// Length of the payload
        len: usize,
    },

    /// a stored pointer points before the payload
    #[error("pointer at {site:#x} holds {value:#x}, which is before the payload start {payload_offset:#x}")]
    RelocationUnderflow {
        /// Offset of the pointer, relative to the payload
        site: u32,
        /// Value stored in the file
        value: u32,
        /// Absolute offset of the payload
        payload_offset: u32,
    },

    /// a pointer can not be moved to its absolute position
    #[error("pointer at {site:#x} holds {value:#x}, which can not be relocated")]
    RelocationOverflow {
        /// Offset of the pointer, relative to the payload
        site: u32,
        /// Value stored in the payload
        value: u32,
    },

    /// the container does not fit 32-bit offsets
    #[error("a container of {0} bytes does not fit 32-bit offsets")]
    ContainerTooLarge(usize),
}

impl Error {
    /// Whether this error means the data is simply not a SIR0 container
    pub fn is_bad_magic(&self) -> bool {
        matches!(self, Error::BadMagic)
    }
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
