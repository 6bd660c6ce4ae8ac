//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`pmd_sir0::Error`]
    #[error(transparent)]
    Sir0(#[from] pmd_sir0::Error),

    /// Transparent warpper for [`pmd_px::Error`]
    #[error(transparent)]
    Px(#[from] pmd_px::Error),

    /// Transparent warpper for [`pmd_dse::Error`]
    #[error(transparent)]
    Dse(#[from] pmd_dse::Error),

    /// data does not have the layout the rule looks for
    #[error("data does not have the layout the rule looks for")]
    BadMagic,

    /// no registered rule recognised the data
    #[error("no rule recognised the data{}", with_extension(.extension))]
    #[diagnostic(help("register a rule for this format"))]
    NoMatch {
        /// Extension the data was classified with
        extension: Option<String>,
    },
}

impl Error {
    /// Whether this error means the data is simply not in the format a rule looks for
    pub fn is_bad_magic(&self) -> bool {
        match self {
            Error::Sir0(error) => error.is_bad_magic(),
            Error::Px(error) => error.is_bad_magic(),
            Error::Dse(error) => error.is_bad_magic(),
            Error::BadMagic => true,
            Error::NoMatch { .. } => false,
        }
    }
}

fn with_extension(extension: &Option<String>) -> String {
    match extension {
        Some(extension) => format!(" with extension {extension:?}"),
        None => String::new(),
    }
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
