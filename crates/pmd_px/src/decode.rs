//! PX stream decoding.

use tracing::{instrument, trace};

use pmd_bytes::{BitCursor, ByteReader};

use crate::error::{MalformedStreamError, Result};
use crate::types::{ControlFlags, MAX_DISTANCE, MIN_MATCH};

/// Rebuild the two bytes of a pattern command.
///
/// The pattern selected by control flag `index` is four nibbles built around `nibble`:
///
/// - `0`: all four nibbles are `nibble`
/// - `1..=4`: nibble `index - 1` is one lower than the others
/// - `5..=8`: nibble `index - 5` is one higher than the others
///
/// The first nibble always comes out equal to `nibble`. Arithmetic wraps like it does on the
/// console, so patterns built from the edges of the nibble range do not fit in 4 bits.
pub fn pattern_bytes(index: u8, nibble: u8) -> [u8; 2] {
    let base = match index {
        1 => nibble.wrapping_add(1),
        5 => nibble.wrapping_sub(1),
        _ => nibble,
    };

    let mut n = [base; 4];
    match index {
        1..=4 => {
            let i = (index - 1) as usize;
            n[i] = n[i].wrapping_sub(1);
        }
        5..=8 => {
            let i = (index - 5) as usize;
            n[i] = n[i].wrapping_add(1);
        }
        _ => {}
    }

    [(n[0] << 4) | n[1], (n[2] << 4) | n[3]]
}

/// Check that every control flag can be matched against a high nibble
pub(crate) fn validate_control_flags(control_flags: &ControlFlags) -> Result<()> {
    match control_flags.iter().position(|&flag| flag > 0xF) {
        Some(index) => Err(MalformedStreamError::InvalidControlFlag {
            index,
            value: control_flags[index],
        }
        .into()),
        None => Ok(()),
    }
}

/// Decode a PX stream into exactly `decompressed_len` bytes.
///
/// Bytes left in `data` once the output is complete are ignored.
#[instrument(skip(data, control_flags), fields(len = data.len()), err)]
pub fn decompress_stream(
    data: &[u8],
    control_flags: &ControlFlags,
    decompressed_len: usize,
) -> Result<Vec<u8>> {
    validate_control_flags(control_flags)?;

    let mut out = Vec::with_capacity(decompressed_len);
    let mut reader = ByteReader::new(data);
    let mut command = BitCursor::default();
    let mut bits_left = 0;

    let unexpected_end = |produced: usize| MalformedStreamError::UnexpectedEnd {
        produced,
        expected: decompressed_len,
    };

    while out.len() < decompressed_len {
        if bits_left == 0 {
            command = BitCursor::new(reader.position(), 0);
            reader.read_u8().map_err(|_| unexpected_end(out.len()))?;
            bits_left = 8;
        }
        let literal = command.get(data) == Some(true);
        command.advance(1);
        bits_left -= 1;

        if literal {
            out.push(reader.read_u8().map_err(|_| unexpected_end(out.len()))?);
            continue;
        }

        let byte = reader.read_u8().map_err(|_| unexpected_end(out.len()))?;
        let high = byte >> 4;
        let low = byte & 0xF;

        if let Some(index) = control_flags.iter().position(|&flag| flag == high) {
            let pattern = pattern_bytes(index as u8, low);
            let take = pattern.len().min(decompressed_len - out.len());
            out.extend_from_slice(&pattern[..take]);
            continue;
        }

        let next = reader.read_u8().map_err(|_| unexpected_end(out.len()))?;
        let raw = ((low as usize) << 8) | next as usize;
        let distance = MAX_DISTANCE - raw;
        let length = high as usize + MIN_MATCH;

        if distance == 0 || distance > out.len() {
            return Err(MalformedStreamError::BackReferenceOutOfRange {
                position: out.len(),
                distance,
            }
            .into());
        }

        let start = out.len() - distance;
        let length = length.min(decompressed_len - out.len());
        // Byte by byte, a copy may overlap the bytes it produces
        for i in start..start + length {
            out.push(out[i]);
        }
    }

    trace!(
        consumed = reader.position(),
        unused = reader.remaining(),
        "decoded stream"
    );

    Ok(out)
}
