//! Frame sources: the decoding side of the pipeline.

use crate::foundation::core::Frame;
use crate::foundation::error::PalResult;

/// `ffmpeg`/`ffprobe` backed source.
pub mod ffmpeg;
/// In-memory source for tests and synthetic input.
pub mod memory;

/// Metadata reported by a source before decoding starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SourceInfo {
    /// Frame count as reported by the source. May be an estimate.
    pub frame_count: u32,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Nominal playback rate, whole frames per second.
    pub fps: u16,
}

/// A decoder that yields frames in order and can fetch reduced frames at arbitrary positions.
pub trait FrameSource {
    /// Source metadata, queried once before iteration.
    fn info(&self) -> SourceInfo;

    /// Next frame in presentation order, `None` at end of stream.
    fn next_frame(&mut self) -> PalResult<Option<Frame>>;

    /// Frame at position `index`, reduced to `width x height`.
    ///
    /// Independent of the [`FrameSource::next_frame`] cursor. A position past the last frame
    /// that actually decodes fails with [`InsufficientSamples`](crate::PalError::InsufficientSamples).
    fn sample_frame(&mut self, index: u32, width: u32, height: u32) -> PalResult<Frame>;
}
