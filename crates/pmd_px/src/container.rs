//! AT4PX and PKDPX containers.

use binrw::{BinRead, BinWrite};
use std::fmt;
use std::io::Cursor;
use tracing::{debug, instrument};

use pmd_bytes::read_int;
use pmd_sir0::{is_sir0, Sir0, Sir0Options};

use crate::decode::{decompress_stream, validate_control_flags};
use crate::encode::compress_stream;
use crate::error::{Error, Result};
use crate::types::{At4pxHeader, ControlFlags, PkdpxHeader, PxOptions};

/// Magic number of a PKDPX container
pub const PKDPX_MAGIC: &[u8; 5] = b"PKDPX";

/// Magic number of an AT4PX container
pub const AT4PX_MAGIC: &[u8; 5] = b"AT4PX";

/// The two container layouts a PX stream ships in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PxFormat {
    /// Generic compressed data, 32-bit decompressed length
    Pkdpx,

    /// Compressed images, 16-bit decompressed length
    At4px,
}

impl PxFormat {
    /// Magic number at the start of the container
    pub const fn magic(self) -> &'static [u8; 5] {
        match self {
            PxFormat::Pkdpx => PKDPX_MAGIC,
            PxFormat::At4px => AT4PX_MAGIC,
        }
    }

    /// Size of the container header
    pub const fn header_len(self) -> usize {
        match self {
            PxFormat::Pkdpx => 0x14,
            PxFormat::At4px => 0x12,
        }
    }

    /// Largest decompressed length the header can store
    pub const fn max_decompressed_len(self) -> usize {
        match self {
            PxFormat::Pkdpx => u32::MAX as usize,
            PxFormat::At4px => u16::MAX as usize,
        }
    }

    /// Detect the format from the magic number at the start of `data`
    pub fn detect(data: &[u8]) -> Option<PxFormat> {
        [PxFormat::Pkdpx, PxFormat::At4px]
            .into_iter()
            .find(|format| data.starts_with(format.magic()))
    }
}

impl fmt::Display for PxFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PxFormat::Pkdpx => f.write_str("PKDPX"),
            PxFormat::At4px => f.write_str("AT4PX"),
        }
    }
}

/// The bytes a PX container would start at: the SIR0 payload when wrapped, `data` otherwise
fn unwrapped_start(data: &[u8]) -> &[u8] {
    if !is_sir0(data) {
        return data;
    }
    match read_int::<u32>(data, 4, false) {
        Ok(offset) => data.get(offset as usize..).unwrap_or_default(),
        Err(_) => &[],
    }
}

/// Whether `data` is a PKDPX container, possibly wrapped in SIR0.
///
/// Only the magic number is checked.
pub fn is_pkdpx(data: &[u8]) -> bool {
    unwrapped_start(data).starts_with(PKDPX_MAGIC)
}

/// Whether `data` is an AT4PX container, possibly wrapped in SIR0.
///
/// Only the magic number is checked.
pub fn is_at4px(data: &[u8]) -> bool {
    unwrapped_start(data).starts_with(AT4PX_MAGIC)
}

/// A parsed AT4PX or PKDPX container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PxContainer {
    /// Layout of the header
    pub format: PxFormat,

    /// Whether the container was wrapped in SIR0
    pub sir0: bool,

    /// Length of the container, header included
    pub container_length: usize,

    /// Control flags of the stream
    pub control_flags: ControlFlags,

    /// Length of the data once decompressed
    pub decompressed_length: usize,

    /// The compressed stream
    pub stream: Vec<u8>,
}

impl PxContainer {
    /// Parse a container, unwrapping SIR0 first if needed
    #[instrument(skip_all, fields(len = data.len()), err)]
    pub fn read(data: &[u8]) -> Result<PxContainer> {
        if is_sir0(data) {
            let sir0 = Sir0::read(data)?;
            let mut container = Self::read_unwrapped(&sir0.payload)?;
            container.sir0 = true;
            return Ok(container);
        }
        Self::read_unwrapped(data)
    }

    fn read_unwrapped(data: &[u8]) -> Result<PxContainer> {
        let format = PxFormat::detect(data).ok_or(Error::BadMagic)?;
        let header_len = format.header_len();
        if data.len() < header_len {
            return Err(pmd_bytes::Error::OutOfBounds {
                offset: 0,
                width: header_len,
                len: data.len(),
            }
            .into());
        }

        let mut reader = Cursor::new(data);
        let (container_length, control_flags, decompressed_length) = match format {
            PxFormat::Pkdpx => {
                let header = PkdpxHeader::read(&mut reader)?;
                (
                    header.container_length as usize,
                    header.control_flags,
                    header.decompressed_length as usize,
                )
            }
            PxFormat::At4px => {
                let header = At4pxHeader::read(&mut reader)?;
                (
                    header.container_length as usize,
                    header.control_flags,
                    header.decompressed_length as usize,
                )
            }
        };

        if container_length < header_len {
            return Err(Error::InvalidContainerLength {
                length: container_length,
                header: header_len,
            });
        }
        if container_length > data.len() {
            return Err(pmd_bytes::Error::OutOfBounds {
                offset: 0,
                width: container_length,
                len: data.len(),
            }
            .into());
        }
        validate_control_flags(&control_flags)?;

        debug!(
            %format,
            container_length,
            decompressed_length,
            "read container header"
        );

        Ok(PxContainer {
            format,
            sir0: false,
            container_length,
            control_flags,
            decompressed_length,
            stream: data[header_len..container_length].to_vec(),
        })
    }

    /// Decode the stream
    pub fn decompress(&self) -> Result<Vec<u8>> {
        decompress_stream(
            &self.stream,
            &self.control_flags,
            self.decompressed_length,
        )
    }
}

/// Decompress an AT4PX or PKDPX container, possibly wrapped in SIR0
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    PxContainer::read(data)?.decompress()
}

fn too_large(field: &'static str, value: usize, max: usize) -> Error {
    Error::ContainerTooLarge { field, value, max }
}

/// Compress `data` into a container of the given format
#[instrument(skip(data), fields(len = data.len()), err)]
pub fn compress(data: &[u8], format: PxFormat, options: PxOptions) -> Result<Vec<u8>> {
    if data.len() > format.max_decompressed_len() {
        return Err(too_large(
            "decompressed length",
            data.len(),
            format.max_decompressed_len(),
        ));
    }

    let stream = compress_stream(data, options);
    let length = format.header_len() + stream.data.len();
    let container_length = u16::try_from(length)
        .map_err(|_| too_large("container length", length, u16::MAX as usize))?;

    let mut out = Vec::with_capacity(length);
    let mut writer = Cursor::new(&mut out);
    match format {
        PxFormat::Pkdpx => PkdpxHeader {
            container_length,
            control_flags: stream.control_flags,
            decompressed_length: stream.decompressed_len as u32,
        }
        .write(&mut writer)?,
        PxFormat::At4px => At4pxHeader {
            container_length,
            control_flags: stream.control_flags,
            decompressed_length: stream.decompressed_len as u16,
        }
        .write(&mut writer)?,
    }
    out.extend_from_slice(&stream.data);

    debug!(%format, container_length, "wrote container");
    Ok(out)
}

/// Compress `data` into a container and wrap it in SIR0, with the subheader pointing at the
/// container.
pub fn compress_sir0(
    data: &[u8],
    format: PxFormat,
    options: PxOptions,
    sir0_options: Sir0Options,
) -> Result<Vec<u8>> {
    let container = compress(data, format, options)?;
    Ok(pmd_sir0::wrap(container, [], Some(0), sir0_options)?)
}
