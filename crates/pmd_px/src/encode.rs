//! PX stream encoding.
//!
//! Encoding happens in two passes. The input is first split into [`Token`]s, then the control
//! flags are chosen from the back-reference lengths that were used and the tokens are written
//! out behind command bytes.

use tracing::{debug, instrument};

use pmd_bytes::{BitCursor, ByteWriter};

use crate::types::{
    ControlFlags, PxOptions, PxStream, Token, CONTROL_FLAG_COUNT, MAX_DISTANCE,
    MAX_LENGTH_NIBBLES, MAX_MATCH, MIN_MATCH,
};

const HASH_BITS: u32 = 12;
const NO_POSITION: u32 = u32::MAX;

/// Hash chains over every 3-byte prefix of the input
struct MatchFinder<'a> {
    input: &'a [u8],
    head: Vec<u32>,
    prev: Vec<u32>,
    max_candidates: usize,
}

impl<'a> MatchFinder<'a> {
    fn new(input: &'a [u8], max_candidates: usize) -> Self {
        MatchFinder {
            input,
            head: vec![NO_POSITION; 1 << HASH_BITS],
            prev: vec![NO_POSITION; input.len()],
            max_candidates,
        }
    }

    fn hash(&self, position: usize) -> usize {
        let bytes = &self.input[position..position + MIN_MATCH];
        let value = (u32::from(bytes[0]) << 16) | (u32::from(bytes[1]) << 8) | u32::from(bytes[2]);
        (value.wrapping_mul(0x9E37_79B1) >> (32 - HASH_BITS)) as usize
    }

    /// Make `position` available as a match source for later positions
    fn insert(&mut self, position: usize) {
        if position + MIN_MATCH > self.input.len() {
            return;
        }
        let hash = self.hash(position);
        self.prev[position] = self.head[hash];
        self.head[hash] = position as u32;
    }

    /// Longest earlier occurrence of the bytes at `position`, as `(distance, length)`
    fn find(&self, position: usize) -> Option<(usize, usize)> {
        let max_len = MAX_MATCH.min(self.input.len() - position);
        if max_len < MIN_MATCH || self.max_candidates == 0 {
            return None;
        }

        let mut best: Option<(usize, usize)> = None;
        let mut candidate = self.head[self.hash(position)];
        let mut visited = 0;

        while candidate != NO_POSITION && visited < self.max_candidates {
            let start = candidate as usize;
            let distance = position - start;
            if distance > MAX_DISTANCE {
                break;
            }

            let length = self.input[start..]
                .iter()
                .zip(&self.input[position..position + max_len])
                .take_while(|(a, b)| a == b)
                .count();

            if length >= MIN_MATCH && best.map_or(true, |(_, best_len)| length > best_len) {
                best = Some((distance, length));
                if length == max_len {
                    break;
                }
            }

            candidate = self.prev[start];
            visited += 1;
        }

        best
    }
}

/// The back-reference lengths used so far, tracked by their high nibble
#[derive(Debug, Default)]
struct LengthNibbles {
    used: [bool; 16],
    count: usize,
}

impl LengthNibbles {
    /// Longest length up to `length` that can still be encoded
    fn fit(&self, length: usize) -> Option<usize> {
        let nibble = length - MIN_MATCH;
        if self.used[nibble] || self.count < MAX_LENGTH_NIBBLES {
            return Some(length);
        }
        // Out of nibbles, shorten to the longest length already in use
        (0..nibble)
            .rev()
            .find(|&n| self.used[n])
            .map(|n| n + MIN_MATCH)
    }

    fn mark(&mut self, length: usize) {
        let nibble = length - MIN_MATCH;
        if !self.used[nibble] {
            self.used[nibble] = true;
            self.count += 1;
        }
    }

    fn control_flags(&self) -> ControlFlags {
        let mut flags = [0u8; CONTROL_FLAG_COUNT];
        let free = (0u8..16).filter(|&n| !self.used[n as usize]);
        for (flag, nibble) in flags.iter_mut().zip(free) {
            *flag = nibble;
        }
        flags
    }
}

/// Find the pattern command reproducing `first` and `second`, as `(index, nibble)`
pub fn find_pattern(first: u8, second: u8) -> Option<(u8, u8)> {
    let n = [first >> 4, first & 0xF, second >> 4, second & 0xF];
    let a = n[0];
    let rest = &n[1..];

    if rest.iter().all(|&x| x == a) {
        return Some((0, a));
    }
    if a < 0xF && rest.iter().all(|&x| x == a + 1) {
        return Some((1, a));
    }
    if a > 0 && rest.iter().all(|&x| x == a - 1) {
        return Some((5, a));
    }

    let odd: Vec<usize> = (0..3).filter(|&i| rest[i] != a).collect();
    match odd.as_slice() {
        &[i] if a > 0 && rest[i] == a - 1 => Some((2 + i as u8, a)),
        &[i] if a < 0xF && rest[i] == a + 1 => Some((6 + i as u8, a)),
        _ => None,
    }
}

/// Split `input` into the commands a PX stream is made of.
///
/// Every back-reference length in the result is one of at most
/// [`MAX_LENGTH_NIBBLES`] distinct values.
pub fn tokenize(input: &[u8], options: PxOptions) -> Vec<Token> {
    tokenize_with_nibbles(input, options).0
}

fn tokenize_with_nibbles(input: &[u8], options: PxOptions) -> (Vec<Token>, LengthNibbles) {
    let mut finder = MatchFinder::new(input, options.level.max_candidates());
    let mut nibbles = LengthNibbles::default();
    let mut tokens = Vec::with_capacity(input.len() / 2);
    let mut position = 0;

    while position < input.len() {
        let found = finder
            .find(position)
            .and_then(|(distance, length)| Some((distance, nibbles.fit(length)?)));

        let pattern = match (options.patterns, input.get(position + 1)) {
            (true, Some(&second)) => find_pattern(input[position], second),
            _ => None,
        };

        let token = match (found, pattern) {
            (Some((distance, length)), _) if length > MIN_MATCH => Token::BackReference {
                distance: distance as u16,
                length: length as u8,
            },
            (_, Some((index, nibble))) => Token::Pattern { index, nibble },
            (Some((distance, length)), None) => Token::BackReference {
                distance: distance as u16,
                length: length as u8,
            },
            (None, None) => Token::Literal(input[position]),
        };

        if let Token::BackReference { length, .. } = token {
            nibbles.mark(length as usize);
        }

        let next = position + token.output_len();
        while position < next {
            finder.insert(position);
            position += 1;
        }
        tokens.push(token);
    }

    (tokens, nibbles)
}

/// Write `tokens` as a PX stream
fn write_tokens(tokens: &[Token], control_flags: &ControlFlags, capacity: usize) -> Vec<u8> {
    let mut writer = ByteWriter::with_capacity(capacity);
    let mut command = BitCursor::default();
    let mut bits_left = 0;

    for token in tokens {
        if bits_left == 0 {
            command = BitCursor::new(writer.position(), 0);
            writer.write_u8(0);
            bits_left = 8;
        }

        match *token {
            Token::Literal(byte) => {
                command.set(writer.as_mut_slice(), true);
                writer.write_u8(byte);
            }
            Token::Pattern { index, nibble } => {
                writer.write_u8((control_flags[index as usize] << 4) | nibble);
            }
            Token::BackReference { distance, length } => {
                let raw = MAX_DISTANCE - distance as usize;
                let high = length - MIN_MATCH as u8;
                writer.write_u8((high << 4) | (raw >> 8) as u8);
                writer.write_u8(raw as u8);
            }
        }

        command.advance(1);
        bits_left -= 1;
    }

    writer.into_inner()
}

/// Compress `input` into a PX stream
#[instrument(skip(input), fields(len = input.len()))]
pub fn compress_stream(input: &[u8], options: PxOptions) -> PxStream {
    let (tokens, nibbles) = tokenize_with_nibbles(input, options);
    let control_flags = nibbles.control_flags();
    let data = write_tokens(&tokens, &control_flags, input.len() + input.len() / 8 + 1);

    debug!(
        tokens = tokens.len(),
        compressed = data.len(),
        ?control_flags,
        "compressed stream"
    );

    PxStream {
        control_flags,
        decompressed_len: input.len(),
        data,
    }
}
