//! Adjacency index block extraction.
//!
//! The PLY loader cannot see the per-vertex adjacency list, so the block is
//! sliced out of the raw file bytes and decoded as little-endian u32s.

use foam_types::{AdjacencySource, FoamError, Result};

/// Footer magic of the versioned adjacency trailer.
pub const TRAILER_MAGIC: [u8; 4] = *b"RFAJ";
pub const TRAILER_VERSION: u32 = 1;

// magic (4) + version u32 (4) + entry count u64 (8)
pub const FOOTER_LEN: usize = 16;

/// Read the adjacency indices of a scene file according to `source`.
pub fn extract_adjacency(
    bytes: &[u8],
    header_length: u32,
    cell_count: usize,
    source: &AdjacencySource,
) -> Result<Vec<u32>> {
    match *source {
        AdjacencySource::Fixed { record_stride, entry_count } => {
            let start = (cell_count as u64)
                .checked_mul(record_stride)
                .and_then(|records| records.checked_add(header_length as u64));
            match start {
                Some(start) => read_fixed(bytes, start, entry_count),
                None => Err(FoamError::TruncatedInput {
                    offset: u64::MAX,
                    required: entry_count.saturating_mul(4),
                    available: bytes.len() as u64,
                }),
            }
        }
        AdjacencySource::Versioned => read_versioned(bytes),
    }
}

/// Decode `entry_count` indices starting at byte `start`.
pub fn read_fixed(bytes: &[u8], start: u64, entry_count: u64) -> Result<Vec<u32>> {
    let available = bytes.len() as u64;
    let required = entry_count.saturating_mul(4);
    let end = start.checked_add(required).filter(|&end| end <= available);
    let Some(end) = end else {
        return Err(FoamError::TruncatedInput { offset: start, required, available });
    };
    Ok(decode_words(&bytes[start as usize..end as usize]))
}

/// Decode the trailer at the end of `bytes`:
/// `[u32 LE × count] [magic] [version u32 LE] [count u64 LE]`.
pub fn read_versioned(bytes: &[u8]) -> Result<Vec<u32>> {
    let available = bytes.len() as u64;
    if bytes.len() < FOOTER_LEN {
        return Err(FoamError::TruncatedInput {
            offset: 0,
            required: FOOTER_LEN as u64,
            available,
        });
    }
    let footer_at = bytes.len() - FOOTER_LEN;
    let footer = &bytes[footer_at..];

    let mut magic = [0u8; 4];
    magic.copy_from_slice(&footer[0..4]);
    let mut word = [0u8; 4];
    word.copy_from_slice(&footer[4..8]);
    let version = u32::from_le_bytes(word);
    if magic != TRAILER_MAGIC || version != TRAILER_VERSION {
        return Err(FoamError::UnsupportedTrailer { magic, version });
    }

    let mut count = [0u8; 8];
    count.copy_from_slice(&footer[8..16]);
    let entry_count = u64::from_le_bytes(count);
    let required = entry_count.saturating_mul(4);
    if required > footer_at as u64 {
        return Err(FoamError::TruncatedInput {
            offset: footer_at as u64,
            required,
            available,
        });
    }
    let start = footer_at - required as usize;
    Ok(decode_words(&bytes[start..footer_at]))
}

/// Append a versioned trailer holding `indices` to `out`.
pub fn append_versioned(out: &mut Vec<u8>, indices: &[u32]) {
    out.reserve(indices.len() * 4 + FOOTER_LEN);
    for index in indices {
        out.extend_from_slice(&index.to_le_bytes());
    }
    out.extend_from_slice(&TRAILER_MAGIC);
    out.extend_from_slice(&TRAILER_VERSION.to_le_bytes());
    out.extend_from_slice(&(indices.len() as u64).to_le_bytes());
}

fn decode_words(block: &[u8]) -> Vec<u32> {
    block
        .chunks_exact(4)
        .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
        .collect()
}
