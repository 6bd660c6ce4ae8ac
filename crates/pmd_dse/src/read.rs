//! Types for walking DSE files
//!

use binrw::BinRead;
use std::io::Cursor;
use tracing::{debug, instrument, trace, warn};

use pmd_bytes::integer_encoding::align_up;
use pmd_bytes::ByteReader;

use crate::error::{Error, Result};
use crate::types::{tags, ChunkHeader, DseHeader, DseKind, CHUNK_HEADER_LEN, SONG_CHUNK_LEN};

/// Chunks start on 4 byte boundaries
const CHUNK_ALIGNMENT: usize = 4;

/// Filler written between SWDL chunks
const PADDING_WORD: u32 = 0xAAAA_AAAA;

/// A DSE file and the chunks it is made of
#[derive(Debug, Clone, PartialEq)]
pub struct DseFile {
    /// Which of the three file types this is
    pub kind: DseKind,

    /// The common header fields
    pub header: DseHeader,

    /// Every chunk, in file order, the end chunk included
    pub chunks: Vec<ChunkHeader>,
}

impl DseFile {
    /// Parse the header and walk the chunks of a DSE file
    #[instrument(skip_all, fields(len = data.len()), err)]
    pub fn read(data: &[u8]) -> Result<DseFile> {
        let kind = DseKind::from_magic(data).ok_or(Error::BadMagic)?;
        if data.len() < kind.header_len() {
            return Err(pmd_bytes::Error::OutOfBounds {
                offset: 0,
                width: kind.header_len(),
                len: data.len(),
            }
            .into());
        }

        let header = DseHeader::read(&mut Cursor::new(data))?;
        let chunks = walk(data, kind, header.file_length as usize)?;

        Ok(DseFile {
            kind,
            header,
            chunks,
        })
    }

    /// First chunk with the given tag
    pub fn find(&self, tag: u32) -> Option<&ChunkHeader> {
        self.chunks.iter().find(|chunk| chunk.tag == tag)
    }
}

/// Walk the chunks of a DSE file.
///
/// Walking stops after the end chunk, or when the file runs out of room for another chunk
/// header.
pub fn parse_chunks(data: &[u8]) -> Result<Vec<ChunkHeader>> {
    Ok(DseFile::read(data)?.chunks)
}

fn walk(data: &[u8], kind: DseKind, file_length: usize) -> Result<Vec<ChunkHeader>> {
    let end = if file_length == 0 || file_length > data.len() {
        if file_length != 0 {
            warn!(file_length, len = data.len(), "file is shorter than its header says");
        }
        data.len()
    } else {
        file_length
    };

    let mut reader = ByteReader::new(&data[..end]);
    reader.seek(kind.header_len())?;
    let mut chunks = Vec::new();

    while reader.remaining() >= CHUNK_HEADER_LEN {
        let offset = reader.position();
        let tag = reader.read_u32_be()?;
        if tag == PADDING_WORD {
            continue;
        }
        let param1 = reader.read_u32_le()?;
        let param2 = reader.read_u32_le()?;
        let length = reader.read_u32_le()?;

        let chunk = ChunkHeader {
            tag,
            length,
            offset,
            param1,
            param2,
        };
        trace!(tag = %chunk.tag_str(), offset, length, "found chunk");

        let next = if tag == tags::SONG {
            offset + SONG_CHUNK_LEN
        } else {
            let data_end = chunk
                .data_offset()
                .checked_add(length as usize)
                .filter(|&data_end| data_end <= end)
                .ok_or(pmd_bytes::Error::OutOfBounds {
                    offset: chunk.data_offset(),
                    width: length as usize,
                    len: end,
                })?;
            align_up(data_end, CHUNK_ALIGNMENT)
        };

        chunks.push(chunk);
        if tag == kind.end_tag() || next >= end {
            break;
        }
        reader.seek(next)?;
    }

    debug!(%kind, chunks = chunks.len(), "walked chunks");
    Ok(chunks)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::error::{Error, Result};
    use crate::read::{parse_chunks, DseFile};
    use crate::types::{tags, DseKind};

    fn header(magic: &[u8; 4], len: usize, file_length: u32) -> Vec<u8> {
        let mut out = vec![0u8; len];
        out[..4].copy_from_slice(magic);
        out[8..12].copy_from_slice(&file_length.to_le_bytes());
        out[12..14].copy_from_slice(&0x415u16.to_le_bytes());
        out
    }

    fn chunk(tag: &[u8; 4], param1: u32, param2: u32, data: &[u8]) -> Vec<u8> {
        let mut out = tag.to_vec();
        out.extend_from_slice(&param1.to_le_bytes());
        out.extend_from_slice(&param2.to_le_bytes());
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(data);
        out
    }

    #[traced_test]
    #[test]
    fn swdl_chunks() -> Result<()> {
        let mut input = header(b"swdl", 0x50, 0);
        input.extend(chunk(b"wavi", 0x415, 0x10, &[0x11; 8]));
        input.extend(chunk(b"pcmd", 0x415, 0x10, &[0x22; 6]));
        input.extend([0xAA, 0xAA]);
        input.extend(chunk(b"eod ", 0x415, 0x10, &[]));

        let chunks = parse_chunks(&input)?;
        let names: Vec<String> = chunks.iter().map(|c| c.tag_str()).collect();
        assert_eq!(names, vec!["wavi", "pcmd", "eod "]);

        assert_eq!(chunks[0].offset, 0x50);
        assert_eq!(chunks[0].length, 8);
        assert_eq!(chunks[0].param1, 0x415);
        assert_eq!(chunks[1].offset, 0x68);
        assert_eq!(chunks[1].data(&input), Some(&[0x22; 6][..]));
        assert_eq!(chunks[2].offset, 0x80);
        assert_eq!(chunks[2].tag, tags::END_OF_DATA);

        Ok(())
    }

    #[traced_test]
    #[test]
    fn smdl_song_chunk_has_fixed_size() -> Result<()> {
        let mut input = header(b"smdl", 0x40, 0);
        let mut song = chunk(b"song", 0x415, 0xFF10, &[]);
        // Length field of the song chunk is not a size
        song[12..16].copy_from_slice(&0xFFFF_FFB0u32.to_le_bytes());
        song.resize(0x40, 0x00);
        input.extend(song);
        input.extend(chunk(b"trk ", 0x415, 0xFF04, &[0x01, 0x02, 0x03, 0x04]));
        input.extend(chunk(b"eoc ", 0x415, 0xFF04, &[]));
        input.extend([0xFF; 32]);

        let file = DseFile::read(&input)?;
        assert_eq!(file.kind, DseKind::Smdl);
        assert_eq!(file.header.version, 0x415);
        assert_eq!(file.chunks.len(), 3);
        assert_eq!(file.chunks[1].offset, 0x80);
        assert_eq!(file.find(tags::TRACK).map(|c| c.length), Some(4));
        assert_eq!(file.chunks[2].tag, tags::END_OF_CHUNKS);

        Ok(())
    }

    #[test]
    fn stops_at_end_of_buffer() -> Result<()> {
        let mut input = header(b"sedl", 0x40, 0);
        input.extend(chunk(b"seq ", 0, 0, &[0x01; 4]));
        input.extend([0x00; 7]);

        let chunks = parse_chunks(&input)?;
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].tag_str(), "seq ");

        Ok(())
    }

    #[test]
    fn stops_at_declared_file_length() -> Result<()> {
        let mut input = header(b"sedl", 0x40, 0x54);
        input.extend(chunk(b"seq ", 0, 0, &[0x01; 4]));
        input.extend(chunk(b"mcrl", 0, 0, &[0x01; 4]));

        let chunks = parse_chunks(&input)?;
        assert_eq!(chunks.len(), 1);

        Ok(())
    }

    #[test]
    fn chunk_past_end_of_file() {
        let mut input = header(b"swdl", 0x50, 0);
        let mut wavi = chunk(b"wavi", 0, 0, &[0x11; 8]);
        wavi[12] = 0x40;
        input.extend(wavi);

        assert!(matches!(
            parse_chunks(&input),
            Err(Error::Bytes(pmd_bytes::Error::OutOfBounds {
                offset: 0x60,
                width: 0x40,
                ..
            }))
        ));
    }

    #[test]
    fn bad_magic() {
        let input = header(b"swdx", 0x50, 0);
        assert!(matches!(parse_chunks(&input), Err(Error::BadMagic)));
        assert!(matches!(
            parse_chunks(b"swdl"),
            Err(Error::Bytes(pmd_bytes::Error::OutOfBounds { .. }))
        ));
    }
}
