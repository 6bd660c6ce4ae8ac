//! Types for reading SIR0 containers
//!

use binrw::BinRead;
use std::io::Cursor;
use tracing::{debug, instrument, trace};

use pmd_bytes::integer_encoding::decode_offset_list;
use pmd_bytes::{read_int, write_int};

use crate::error::{Error, Result};
use crate::types::{is_sir0, Sir0Header, Sir0Options, HEADER_LEN, SUBHEADER_FIELD};
use crate::write::wrap;

/// An unwrapped SIR0 container
///
/// The payload holds payload-relative pointers, exactly as it was before it was wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sir0 {
    /// Absolute offset the payload started at in the file
    pub payload_offset: u32,

    /// Absolute offset the pointer list started at in the file
    pub pointer_list_offset: u32,

    /// Payload-relative offset of the subheader, if the header pointed at one
    pub subheader: Option<u32>,

    /// Payload-relative offsets of every pointer in the payload, in ascending order
    pub pointer_list: Vec<u32>,

    /// The payload with its pointers made relative again
    pub payload: Vec<u8>,
}

impl Sir0 {
    /// Parse a SIR0 container and undo the pointer relocation
    #[instrument(skip_all, fields(len = data.len()), err)]
    pub fn read(data: &[u8]) -> Result<Sir0> {
        if !is_sir0(data) {
            return Err(Error::BadMagic);
        }
        if data.len() < HEADER_LEN {
            return Err(pmd_bytes::Error::OutOfBounds {
                offset: 0,
                width: HEADER_LEN,
                len: data.len(),
            }
            .into());
        }

        let header = Sir0Header::read(&mut Cursor::new(data))?;
        trace!(?header, "read header");

        let payload_start = header.payload_offset as usize;
        let list_start = header.pointer_list_offset as usize;
        if payload_start < HEADER_LEN || payload_start > list_start || list_start > data.len() {
            return Err(Error::InvalidLayout {
                payload_offset: header.payload_offset,
                pointer_list_offset: header.pointer_list_offset,
                len: data.len(),
            });
        }

        let (offsets, consumed) =
            decode_offset_list(&data[list_start..]).map_err(|err| match err {
                pmd_bytes::Error::UnterminatedList => Error::TruncatedPointerList,
                other => other.into(),
            })?;

        let mut payload = data[payload_start..list_start].to_vec();
        let mut pointer_list = Vec::with_capacity(offsets.len());
        let mut subheader = None;

        for offset in offsets {
            if (offset as usize) < HEADER_LEN {
                if offset == SUBHEADER_FIELD {
                    subheader = Some(unrelocate_subheader(&header)?);
                }
                continue;
            }

            let site = offset
                .checked_sub(header.payload_offset)
                .filter(|&site| site as usize + 4 <= payload.len())
                .ok_or(Error::InvalidPointerSite {
                    site: offset.wrapping_sub(header.payload_offset),
                    len: payload.len(),
                })?;

            let value: u32 = read_int(&payload, site as usize, false)?;
            let relative =
                value
                    .checked_sub(header.payload_offset)
                    .ok_or(Error::RelocationUnderflow {
                        site,
                        value,
                        payload_offset: header.payload_offset,
                    })?;
            write_int(relative, &mut payload, site as usize, false)?;
            pointer_list.push(site);
        }

        debug!(
            payload = payload.len(),
            pointers = pointer_list.len(),
            list_bytes = consumed,
            "unwrapped SIR0 container"
        );

        Ok(Sir0 {
            payload_offset: header.payload_offset,
            pointer_list_offset: header.pointer_list_offset,
            subheader,
            pointer_list,
            payload,
        })
    }

    /// Wrap this payload again
    pub fn write(&self, options: Sir0Options) -> Result<Vec<u8>> {
        wrap(
            self.payload.clone(),
            self.pointer_list.iter().copied(),
            self.subheader,
            options,
        )
    }

    /// Take the payload, dropping the pointer information
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

fn unrelocate_subheader(header: &Sir0Header) -> Result<u32> {
    header
        .subheader_offset
        .checked_sub(header.payload_offset)
        .ok_or(Error::RelocationUnderflow {
            site: SUBHEADER_FIELD,
            value: header.subheader_offset,
            payload_offset: header.payload_offset,
        })
}

/// Parse a SIR0 container, see [`Sir0::read`]
pub fn unwrap(data: &[u8]) -> Result<Sir0> {
    Sir0::read(data)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::error::{Error, Result};
    use crate::read::Sir0;

    #[rustfmt::skip]
    fn game_layout() -> Vec<u8> {
        vec![
            // Header
            0x53, 0x49, 0x52, 0x30,  // Magic
            0x10, 0x00, 0x00, 0x00,  // Payload offset
            0x1C, 0x00, 0x00, 0x00,  // Pointer list offset
            0x18, 0x00, 0x00, 0x00,  // Subheader offset
            // Payload
            0x11, 0x22, 0x33, 0x44,
            0x18, 0x00, 0x00, 0x00,
            0x55, 0x66, 0x77, 0x88,
            // Pointer list
            0x04, 0x04, 0x04, 0x08,
            0x00,
            // Padding
            0xAA, 0xAA, 0xAA,
        ]
    }

    #[traced_test]
    #[test]
    fn read_game_layout() -> Result<()> {
        let sir0 = Sir0::read(&game_layout())?;

        assert_eq!(sir0.payload_offset, 0x10);
        assert_eq!(sir0.pointer_list_offset, 0x1C);
        assert_eq!(sir0.subheader, Some(8));
        assert_eq!(sir0.pointer_list, vec![4]);
        assert_eq!(
            sir0.payload,
            vec![0x11, 0x22, 0x33, 0x44, 0x08, 0x00, 0x00, 0x00, 0x55, 0x66, 0x77, 0x88]
        );

        Ok(())
    }

    #[test]
    fn bad_magic() {
        let mut input = game_layout();
        input[3] = b'1';
        assert!(matches!(Sir0::read(&input), Err(Error::BadMagic)));
        assert!(matches!(Sir0::read(b""), Err(Error::BadMagic)));
    }

    #[test]
    fn truncated_header() {
        assert!(matches!(
            Sir0::read(b"SIR0\x10\x00"),
            Err(Error::Bytes(pmd_bytes::Error::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn truncated_pointer_list() {
        let input = &game_layout()[..0x1E];
        assert!(matches!(
            Sir0::read(input),
            Err(Error::TruncatedPointerList)
        ));
    }

    #[test]
    fn pointer_list_beyond_file() {
        let mut input = game_layout();
        input[0x08] = 0x80;
        assert!(matches!(
            Sir0::read(&input),
            Err(Error::InvalidLayout {
                pointer_list_offset: 0x80,
                ..
            })
        ));
    }

    #[test]
    fn payload_inside_header() {
        let mut input = game_layout();
        input[0x04] = 0x08;
        assert!(matches!(
            Sir0::read(&input),
            Err(Error::InvalidLayout {
                payload_offset: 0x08,
                pointer_list_offset: 0x1C,
                ..
            })
        ));
    }

    #[test]
    fn payload_after_pointer_list() {
        let mut input = game_layout();
        input[0x04] = 0x20;
        assert!(matches!(
            Sir0::read(&input),
            Err(Error::InvalidLayout {
                payload_offset: 0x20,
                pointer_list_offset: 0x1C,
                len: 0x24,
            })
        ));
    }

    #[test]
    fn pointer_below_payload() {
        let mut input = game_layout();
        // Pointer at 0x14 holds 0x08, which is inside the header
        input[0x14] = 0x08;
        assert!(matches!(
            Sir0::read(&input),
            Err(Error::RelocationUnderflow {
                site: 4,
                value: 8,
                payload_offset: 0x10
            })
        ));
    }

    #[test]
    fn pointer_site_outside_payload() {
        let mut input = game_layout();
        // Last delta moves the site from 0x14 to 0x1A, which runs into the pointer list
        input[0x1F] = 0x0E;
        assert!(matches!(
            Sir0::read(&input),
            Err(Error::InvalidPointerSite { site: 0x0A, len: 12 })
        ));
    }
}
