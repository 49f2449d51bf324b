//! Binary descriptor records exchanged with the layout generator.
//!
//! Record format, every word a little-endian `u32`:
//! - word 0: field count `n`
//! - word 1: wire length
//! - word 2: host size
//! - next `2n` words: wire range pairs
//! - next `2n` words: host range pairs

use crate::descriptor::{RawLayout, RawLayoutBuf};
use crate::error::{LayoutError, Result};

const WORD_LEN: usize = 4;

/// Number of bytes preceding the range arrays.
pub const DESCRIPTOR_HEADER_LEN: usize = 3 * WORD_LEN;

/// Bytes taken by the wire and host pairs of a single field.
const FIELD_RECORD_LEN: usize = 4 * WORD_LEN;

/// Total size of a descriptor record with `field_count` fields.
#[must_use]
pub fn encoded_len(field_count: u32) -> Option<usize> {
    (field_count as usize)
        .checked_mul(FIELD_RECORD_LEN)?
        .checked_add(DESCRIPTOR_HEADER_LEN)
}

/// Decodes a descriptor record. Ranges are returned unvalidated.
pub fn decode(bytes: &[u8]) -> Result<RawLayoutBuf> {
    if bytes.len() < DESCRIPTOR_HEADER_LEN {
        return Err(LayoutError::TruncatedDescriptor {
            required: DESCRIPTOR_HEADER_LEN,
            actual: bytes.len(),
        });
    }

    let field_count = read_word(bytes, 0);
    let required =
        encoded_len(field_count).ok_or(LayoutError::FieldCountTooLarge { field_count })?;
    if bytes.len() < required {
        return Err(LayoutError::TruncatedDescriptor {
            required,
            actual: bytes.len(),
        });
    }
    if bytes.len() > required {
        return Err(LayoutError::TrailingBytes {
            extra: bytes.len() - required,
        });
    }

    let words = |from: usize, count: usize| -> Vec<u32> {
        bytes[from..from + count * WORD_LEN]
            .chunks_exact(WORD_LEN)
            .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
            .collect()
    };
    let pair_words = field_count as usize * 2;
    let wire_from = DESCRIPTOR_HEADER_LEN;
    let host_from = wire_from + pair_words * WORD_LEN;

    Ok(RawLayoutBuf {
        field_count,
        wire_length: read_word(bytes, WORD_LEN),
        host_size: read_word(bytes, 2 * WORD_LEN),
        wire_ranges: words(wire_from, pair_words),
        host_ranges: words(host_from, pair_words),
    })
}

/// Encodes a layout as a descriptor record.
#[must_use]
pub fn encode(raw: &RawLayout<'_>) -> Vec<u8> {
    let words = 3 + raw.wire_ranges.len() + raw.host_ranges.len();
    let mut record = Vec::with_capacity(words * WORD_LEN);
    for word in [raw.field_count, raw.wire_length, raw.host_size]
        .iter()
        .chain(raw.wire_ranges)
        .chain(raw.host_ranges)
    {
        record.extend_from_slice(&word.to_le_bytes());
    }
    record
}

fn read_word(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}
