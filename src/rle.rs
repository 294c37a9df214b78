//! Run-length coding of palette index sequences.
//!
//! A frame's indices become `(run_length, index)` pairs with `run_length` in `1..=255`; longer
//! runs are split. On the wire each record is two bytes, run length first.

use crate::foundation::error::{PalError, PalResult};

/// Longest run a single record can carry.
pub const MAX_RUN: u8 = u8::MAX;

/// One `(run_length, palette_index)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunRecord {
    /// Number of repetitions, `1..=255` in well-formed data.
    pub run: u8,
    /// Palette index being repeated.
    pub index: u8,
}

impl RunRecord {
    /// Create a record, rejecting zero-length runs.
    pub fn new(run: u8, index: u8) -> PalResult<Self> {
        if run == 0 {
            return Err(PalError::malformed(0, "zero-length run"));
        }
        Ok(Self { run, index })
    }

    /// Wire form: `[run, index]`.
    pub fn to_bytes(self) -> [u8; 2] {
        [self.run, self.index]
    }
}

/// Encode `indices` into run records. Empty input yields no records.
pub fn encode_runs(indices: &[u8]) -> Vec<RunRecord> {
    let mut out = Vec::new();
    let Some((&first, rest)) = indices.split_first() else {
        return out;
    };

    let mut value = first;
    let mut run = 1u8;
    for &idx in rest {
        if idx == value && run < MAX_RUN {
            run += 1;
        } else {
            out.push(RunRecord { run, index: value });
            value = idx;
            run = 1;
        }
    }
    out.push(RunRecord { run, index: value });
    out
}

/// Encode `indices` and append the record bytes to `out`.
pub fn encode_into(indices: &[u8], out: &mut Vec<u8>) {
    for rec in encode_runs(indices) {
        out.extend_from_slice(&rec.to_bytes());
    }
}

/// Expand run records back into an index sequence.
pub fn decode_runs(records: &[RunRecord]) -> PalResult<Vec<u8>> {
    let total: usize = records.iter().map(|r| usize::from(r.run)).sum();
    let mut out = Vec::with_capacity(total);
    for (i, rec) in records.iter().enumerate() {
        if rec.run == 0 {
            return Err(PalError::malformed(i * 2, "zero-length run"));
        }
        out.extend(std::iter::repeat_n(rec.index, usize::from(rec.run)));
    }
    Ok(out)
}

/// Parse a frame's record bytes.
pub fn parse_records(bytes: &[u8]) -> PalResult<Vec<RunRecord>> {
    if !bytes.len().is_multiple_of(2) {
        return Err(PalError::malformed(
            bytes.len() - 1,
            format!("record block length {} is not a multiple of 2", bytes.len()),
        ));
    }
    bytes
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| {
            if pair[0] == 0 {
                Err(PalError::malformed(i * 2, "zero-length run"))
            } else {
                Ok(RunRecord {
                    run: pair[0],
                    index: pair[1],
                })
            }
        })
        .collect()
}

/// Parse and expand a frame's record bytes.
pub fn decode_bytes(bytes: &[u8]) -> PalResult<Vec<u8>> {
    decode_runs(&parse_records(bytes)?)
}

#[cfg(test)]
#[path = "../tests/unit/rle.rs"]
mod tests;
