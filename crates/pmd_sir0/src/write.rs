//! Types for writing SIR0 containers
//!

use binrw::BinWrite;
use std::collections::BTreeSet;
use std::io::Cursor;
use tracing::{debug, instrument};

use pmd_bytes::integer_encoding::{align_up, encode_offset_list};
use pmd_bytes::{read_int, write_int, ByteWriter};

use crate::error::{Error, Result};
use crate::types::{Sir0Header, Sir0Options, HEADER_LEN, HEADER_POINTERS, SUBHEADER_FIELD};

/// SIR0 container generator
///
/// Pointer values inside the staged payload are relative to the start of the payload. When the
/// container is finished they are rewritten to absolute file offsets, and their positions are
/// stored in the pointer list so a reader can undo the relocation.
///
/// ```
/// # fn doit() -> pmd_sir0::error::Result<()>
/// # {
/// use pmd_sir0::{Sir0, Sir0Options, Sir0Writer};
///
/// // A payload with a single pointer at offset 4, pointing to offset 8 of the payload
/// let payload = vec![0x01, 0x02, 0x03, 0x04, 0x08, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];
///
/// let mut writer = Sir0Writer::new(payload, Sir0Options::default());
/// writer.pointer(4);
/// let container = writer.finish()?;
///
/// let sir0 = Sir0::read(&container)?;
/// assert_eq!(sir0.pointer_list, vec![4]);
/// assert_eq!(sir0.payload[4], 0x08);
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Sir0Writer {
    options: Sir0Options,
    payload: Vec<u8>,
    sites: BTreeSet<u32>,
    subheader: Option<u32>,
}

impl Sir0Writer {
    /// Stage a payload for wrapping
    pub fn new(payload: Vec<u8>, options: Sir0Options) -> Self {
        Sir0Writer {
            options,
            payload,
            sites: BTreeSet::new(),
            subheader: None,
        }
    }

    /// Mark the 4 bytes at `site` in the payload as a pointer. Marking a site twice has no effect.
    pub fn pointer(&mut self, site: u32) -> &mut Self {
        self.sites.insert(site);
        self
    }

    /// Mark several pointer sites at once
    pub fn pointers(&mut self, sites: impl IntoIterator<Item = u32>) -> &mut Self {
        self.sites.extend(sites);
        self
    }

    /// Point the header's subheader field at `offset` in the payload
    pub fn subheader(&mut self, offset: u32) -> &mut Self {
        self.subheader = Some(offset);
        self
    }

    /// Relocate the pointers, lay out the file and return it.
    #[instrument(skip(self), fields(payload = self.payload.len(), pointers = self.sites.len()), err)]
    pub fn finish(self) -> Result<Vec<u8>> {
        let Sir0Writer {
            options,
            mut payload,
            sites,
            subheader,
        } = self;

        let payload_start = align_up(HEADER_LEN, options.payload_alignment);
        let list_start = payload_start + payload.len();
        let payload_offset = to_offset(payload_start)?;
        let pointer_list_offset = to_offset(list_start)?;

        let mut pointer_list = HEADER_POINTERS.to_vec();
        if subheader.is_some() {
            pointer_list.push(SUBHEADER_FIELD);
        }

        for site in sites {
            let value = relocate(&mut payload, site, payload_offset)?;
            debug!(site, value, "relocated pointer");
            pointer_list.push(site.checked_add(payload_offset).ok_or(
                Error::ContainerTooLarge(site as usize + payload_start),
            )?);
        }

        let subheader_offset = match subheader {
            Some(offset) => offset
                .checked_add(payload_offset)
                .ok_or(Error::RelocationOverflow {
                    site: SUBHEADER_FIELD,
                    value: offset,
                })?,
            None => 0,
        };

        let header = Sir0Header {
            payload_offset,
            pointer_list_offset,
            subheader_offset,
        };

        let mut out = Vec::with_capacity(list_start + pointer_list.len() * 2 + options.alignment);
        header.write(&mut Cursor::new(&mut out))?;

        let mut writer = ByteWriter::from_vec(out);
        writer.pad_to(options.payload_alignment, options.padding_byte);
        writer.write_all(&payload);
        writer.write_all(&encode_offset_list(&pointer_list)?);
        writer.pad_to(options.alignment, options.padding_byte);

        let out = writer.into_inner();
        debug!(
            payload_offset,
            pointer_list_offset,
            len = out.len(),
            "wrote SIR0 container"
        );
        Ok(out)
    }
}

/// Wrap `payload` in a SIR0 container.
///
/// `pointer_sites` are offsets into the payload of little-endian `u32` values that hold
/// payload-relative offsets. `subheader` is the payload-relative offset stored in the header's
/// subheader field, if any.
pub fn wrap(
    payload: Vec<u8>,
    pointer_sites: impl IntoIterator<Item = u32>,
    subheader: Option<u32>,
    options: Sir0Options,
) -> Result<Vec<u8>> {
    let mut writer = Sir0Writer::new(payload, options);
    writer.pointers(pointer_sites);
    if let Some(offset) = subheader {
        writer.subheader(offset);
    }
    writer.finish()
}

fn to_offset(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::ContainerTooLarge(value))
}

/// Add `payload_offset` to the pointer at `site`, returning the payload-relative value
fn relocate(payload: &mut [u8], site: u32, payload_offset: u32) -> Result<u32> {
    let at = site as usize;
    if at.checked_add(4).map_or(true, |end| end > payload.len()) {
        return Err(Error::InvalidPointerSite {
            site,
            len: payload.len(),
        });
    }

    let value: u32 = read_int(payload, at, false)?;
    let relocated = value
        .checked_add(payload_offset)
        .ok_or(Error::RelocationOverflow { site, value })?;
    write_int(relocated, payload, at, false)?;

    Ok(value)
}
