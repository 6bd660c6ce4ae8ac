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

    /// file is not a SWDL, SMDL or SEDL file
    #[error("file is not a SWDL, SMDL or SEDL file")]
    BadMagic,
}

impl Error {
    /// Whether this error means the data is simply not a DSE file
    pub fn is_bad_magic(&self) -> bool {
        matches!(self, Error::BadMagic)
    }
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
