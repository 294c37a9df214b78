/// Convenience result type used across palstream.
pub type PalResult<T> = Result<T, PalError>;

/// Top-level error taxonomy used by the encoder, the stream codec and the frame sources.
#[derive(thiserror::Error, Debug)]
pub enum PalError {
    /// Invalid user-provided data (dimensions, fps, option values, frame sizes).
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown fixed palette selector.
    #[error("invalid palette selection '{key}' (expected one of: {expected})")]
    InvalidSelection {
        /// The selector that was requested.
        key: String,
        /// Comma-separated list of accepted selectors.
        expected: String,
    },

    /// A palette with zero entries was handed to the quantizer or the stream writer.
    #[error("palette is empty (expected 1..=256 colors)")]
    EmptyPalette,

    /// A palette with more entries than an 8-bit index can address.
    #[error("palette has {len} colors (expected at most {max})")]
    PaletteTooLarge {
        /// Number of colors supplied.
        len: usize,
        /// Largest accepted palette size.
        max: usize,
    },

    /// Source resolution is larger than the target display supports.
    #[error("resolution {width}x{height} exceeds maximum {max_width}x{max_height}")]
    ResolutionExceeded {
        /// Source width in pixels.
        width: u32,
        /// Source height in pixels.
        height: u32,
        /// Largest accepted width.
        max_width: u32,
        /// Largest accepted height.
        max_height: u32,
    },

    /// Not enough frames or pixels to derive a learned palette.
    #[error("insufficient samples: needed {needed}, available {available}")]
    InsufficientSamples {
        /// Samples required by the request.
        needed: u64,
        /// Samples the source could supply.
        available: u64,
    },

    /// Corrupted run-length data.
    #[error("malformed run record at byte {offset}: {reason}")]
    MalformedRecord {
        /// Byte offset of the offending record within its frame block.
        offset: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// The encoded stream ended in the middle of a field.
    #[error("truncated stream: {0}")]
    Truncated(String),

    /// The frame decoding collaborator failed.
    #[error("source error: {0}")]
    Source(String),

    /// IO failure while reading or writing a stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PalError {
    /// Build a [`PalError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PalError::Source`] value.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Build a [`PalError::Truncated`] value.
    pub fn truncated(msg: impl Into<String>) -> Self {
        Self::Truncated(msg.into())
    }

    /// Build a [`PalError::MalformedRecord`] value.
    pub fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            offset,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
