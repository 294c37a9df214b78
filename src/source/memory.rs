use crate::foundation::core::Frame;
use crate::foundation::error::{PalError, PalResult};
use crate::source::{FrameSource, SourceInfo};

/// Frames held in memory.
#[derive(Clone, Debug)]
pub struct InMemorySource {
    info: SourceInfo,
    frames: Vec<Frame>,
    cursor: usize,
}

impl InMemorySource {
    /// Wrap `frames`; all must share the same size.
    pub fn new(frames: Vec<Frame>, fps: u16) -> PalResult<Self> {
        let first = frames
            .first()
            .ok_or_else(|| PalError::validation("in-memory source needs at least one frame"))?;
        let (width, height) = (first.width, first.height);
        if let Some((i, f)) = frames
            .iter()
            .enumerate()
            .find(|(_, f)| f.width != width || f.height != height)
        {
            return Err(PalError::validation(format!(
                "frame {i} is {}x{}, expected {width}x{height}",
                f.width, f.height
            )));
        }
        let frame_count = u32::try_from(frames.len())
            .map_err(|_| PalError::validation("too many frames for one stream"))?;
        Ok(Self {
            info: SourceInfo {
                frame_count,
                width,
                height,
                fps,
            },
            frames,
            cursor: 0,
        })
    }

    /// Report `frame_count` instead of the real number of frames, like a container whose
    /// metadata disagrees with its content.
    pub fn with_declared_frame_count(mut self, frame_count: u32) -> Self {
        self.info.frame_count = frame_count;
        self
    }
}

impl FrameSource for InMemorySource {
    fn info(&self) -> SourceInfo {
        self.info
    }

    fn next_frame(&mut self) -> PalResult<Option<Frame>> {
        let frame = self.frames.get(self.cursor).cloned();
        if frame.is_some() {
            self.cursor += 1;
        }
        Ok(frame)
    }

    fn sample_frame(&mut self, index: u32, width: u32, height: u32) -> PalResult<Frame> {
        let frame = self
            .frames
            .get(index as usize)
            .ok_or(PalError::InsufficientSamples {
                needed: u64::from(index) + 1,
                available: self.frames.len() as u64,
            })?;
        frame.resize_nearest(width, height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/memory.rs"]
mod tests;
