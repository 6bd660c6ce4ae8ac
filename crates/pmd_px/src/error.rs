//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Ways a PX stream can fail to decode
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum MalformedStreamError {
    /// a back-reference reaches before the start of the output
    #[error("back-reference at output offset {position:#x} reaches {distance} bytes back")]
    BackReferenceOutOfRange {
        /// Number of bytes produced when the back-reference was read
        position: usize,
        /// Distance of the back-reference
        distance: usize,
    },

    /// the stream ran out before the declared size was produced
    #[error("stream ended after {produced} of {expected} bytes")]
    UnexpectedEnd {
        /// Number of bytes produced
        produced: usize,
        /// Declared decompressed size
        expected: usize,
    },

    /// a control flag does not fit in a nibble
    #[error("control flag {index} is {value:#x}, which is not a nibble")]
    InvalidControlFlag {
        /// Position of the flag in the header
        index: usize,
        /// Value of the flag
        value: u8,
    },
}

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Transparent warpper for [`pmd_bytes::Error`], reports out of bounds accesses
    #[error(transparent)]
    Bytes(#[from] pmd_bytes::Error),

    /// Transparent warpper for [`pmd_sir0::Error`]
    #[error(transparent)]
    Sir0(#[from] pmd_sir0::Error),

    /// data is neither a PKDPX nor an AT4PX container
    #[error("data is neither a PKDPX nor an AT4PX container")]
    BadMagic,

    /// the compressed stream can not be decoded
    #[error("malformed PX stream")]
    MalformedStream(#[from] MalformedStreamError),

    /// the container length in the header is shorter than the header itself
    #[error("container length {length} is shorter than the {header} byte header")]
    InvalidContainerLength {
        /// Length stored in the header
        length: usize,
        /// Size of the header
        header: usize,
    },

    /// a length does not fit its header field
    #[error("{field} of {value} bytes does not fit the header, the limit is {max}")]
    ContainerTooLarge {
        /// Name of the header field
        field: &'static str,
        /// Length that was requested
        value: usize,
        /// Largest value the field holds
        max: usize,
    },
}

impl Error {
    /// Whether this error means the data is simply not a PX container
    pub fn is_bad_magic(&self) -> bool {
        matches!(self, Error::BadMagic)
    }
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
