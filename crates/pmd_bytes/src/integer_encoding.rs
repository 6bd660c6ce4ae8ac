//! Delta-encoded offset lists.
//!
//! SIR0 relocation tables and several DSE tables store a list of increasing absolute offsets as
//! the difference between each offset and the one before it. Every difference is written as
//! big-endian groups of 7 bits, with the high bit (0x80) set on every byte but the last of a
//! value. Leading zero groups are skipped. A lone `0x00` byte terminates the list.
//!
//! ```
//! use pmd_bytes::integer_encoding::{decode_offset_list, encode_offset_list};
//!
//! let encoded = encode_offset_list(&[4, 8, 0x94]).unwrap();
//! assert_eq!(encoded, vec![0x04, 0x04, 0x81, 0x0C, 0x00]);
//!
//! let (offsets, consumed) = decode_offset_list(&encoded).unwrap();
//! assert_eq!(offsets, vec![4, 8, 0x94]);
//! assert_eq!(consumed, encoded.len());
//! ```

use tracing::trace;

use crate::error::{Error, Result};

/// Number of 7-bit groups needed to hold any `u32`
const MAX_GROUPS: u32 = 5;

/// Round `value` up to the next multiple of `alignment`. Alignments of 0 and 1 return `value`.
#[inline]
pub const fn align_up(value: usize, alignment: usize) -> usize {
    if alignment <= 1 {
        return value;
    }
    match value % alignment {
        0 => value,
        rest => value + (alignment - rest),
    }
}

fn encode_delta(delta: u32, out: &mut Vec<u8>) {
    let mut started = false;
    for group in (1..MAX_GROUPS).rev() {
        let bits = ((delta >> (7 * group)) & 0x7F) as u8;
        if bits != 0 || started {
            out.push(bits | 0x80);
            started = true;
        }
    }
    out.push((delta & 0x7F) as u8);
}

/// Encode a list of strictly increasing absolute offsets, including the terminating zero byte.
pub fn encode_offset_list(offsets: &[u32]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(offsets.len() * 2 + 1);
    let mut previous = 0u32;

    for &offset in offsets {
        // A zero difference would be read back as the terminator
        if offset <= previous {
            return Err(Error::UnorderedOffsets { previous, offset });
        }
        encode_delta(offset - previous, &mut out);
        previous = offset;
    }

    out.push(0);
    Ok(out)
}

/// Decode a list from the start of `data`.
///
/// Returns the absolute offsets and the number of bytes consumed, terminator included.
pub fn decode_offset_list(data: &[u8]) -> Result<(Vec<u32>, usize)> {
    let mut offsets = Vec::new();
    let mut sum = 0u32;
    let mut value = 0u32;
    let mut continued = false;

    for (i, &byte) in data.iter().enumerate() {
        if !continued && byte == 0 {
            trace!(entries = offsets.len(), consumed = i + 1, "offset list terminated");
            return Ok((offsets, i + 1));
        }

        value = value
            .checked_mul(0x80)
            .ok_or(Error::OffsetOverflow)?
            | (byte & 0x7F) as u32;

        if byte & 0x80 != 0 {
            continued = true;
        } else {
            continued = false;
            sum = sum.checked_add(value).ok_or(Error::OffsetOverflow)?;
            offsets.push(sum);
            value = 0;
        }
    }

    Err(Error::UnterminatedList)
}
