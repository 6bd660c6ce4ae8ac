//! Recognition rules.

use tracing::instrument;

use pmd_dse::{DseFile, DseKind};
use pmd_px::{is_at4px, is_pkdpx, PxContainer, PxFormat};
use pmd_sir0::{is_sir0, Sir0};

use crate::error::{Error, Result};
use crate::types::{ContentBlock, ContentType};

/// A way of recognising one format
///
/// Each rule has a cheap probe, [`Rule::is_match`], which only looks at magic numbers, and a
/// full check, [`Rule::analyse`], which parses the headers with the format's library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// SIR0 containers
    Sir0,

    /// PKDPX containers, SIR0 wrapped or not
    Pkdpx,

    /// AT4PX containers, SIR0 wrapped or not
    At4px,

    /// DSE files of one kind
    Dse(DseKind),

    /// A magic number at a fixed offset
    Magic {
        /// Content type reported on a match
        content_type: ContentType,
        /// Bytes that must appear at `offset`
        magic: Vec<u8>,
        /// Offset of the magic number
        offset: usize,
        /// File extensions the rule applies to, compared without case. Empty for any.
        extensions: Vec<String>,
    },
}

impl Rule {
    /// Build a [`Rule::Magic`] rule that applies to any extension
    pub fn magic(content_type: ContentType, magic: impl Into<Vec<u8>>, offset: usize) -> Rule {
        Rule::Magic {
            content_type,
            magic: magic.into(),
            offset,
            extensions: Vec::new(),
        }
    }

    /// Cheap probe of the header, no parsing
    pub fn is_match(&self, data: &[u8], extension: Option<&str>) -> bool {
        match self {
            Rule::Sir0 => is_sir0(data),
            Rule::Pkdpx => is_pkdpx(data),
            Rule::At4px => is_at4px(data),
            Rule::Dse(kind) => DseKind::from_magic(data) == Some(*kind),
            Rule::Magic {
                magic,
                offset,
                extensions,
                ..
            } => {
                let extension_matches = extensions.is_empty()
                    || extension.is_some_and(|extension| {
                        let extension = extension.trim_start_matches('.');
                        extensions
                            .iter()
                            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
                    });
                extension_matches && magic_at(data, magic, *offset)
            }
        }
    }

    /// Confirm the format by parsing it, and measure the content
    #[instrument(skip(data), fields(len = data.len()), err)]
    pub fn analyse(&self, data: &[u8]) -> Result<ContentBlock> {
        let (content_type, end) = match self {
            Rule::Sir0 => {
                Sir0::read(data)?;
                (ContentType::Sir0, data.len())
            }
            Rule::Pkdpx => analyse_px(data, PxFormat::Pkdpx)?,
            Rule::At4px => analyse_px(data, PxFormat::At4px)?,
            Rule::Dse(kind) => {
                let file = DseFile::read(data)?;
                if file.kind != *kind {
                    return Err(Error::BadMagic);
                }
                let declared = file.header.file_length as usize;
                let end = if declared == 0 || declared > data.len() {
                    data.len()
                } else {
                    declared
                };
                (ContentType::Dse(*kind), end)
            }
            Rule::Magic {
                content_type,
                magic,
                offset,
                ..
            } => {
                if !magic_at(data, magic, *offset) {
                    return Err(Error::BadMagic);
                }
                (*content_type, data.len())
            }
        };

        Ok(ContentBlock {
            start: 0,
            end,
            matched_rule: None,
            content_type,
        })
    }
}

fn magic_at(data: &[u8], magic: &[u8], offset: usize) -> bool {
    offset
        .checked_add(magic.len())
        .and_then(|end| data.get(offset..end))
        .is_some_and(|found| found == magic)
}

fn analyse_px(data: &[u8], format: PxFormat) -> Result<(ContentType, usize)> {
    let container = PxContainer::read(data)?;
    if container.format != format {
        return Err(Error::BadMagic);
    }

    Ok(match (format, container.sir0) {
        (PxFormat::Pkdpx, false) => (ContentType::Pkdpx, container.container_length),
        (PxFormat::At4px, false) => (ContentType::At4px, container.container_length),
        (PxFormat::Pkdpx, true) => (ContentType::Sir0Pkdpx, data.len()),
        (PxFormat::At4px, true) => (ContentType::Sir0At4px, data.len()),
    })
}
