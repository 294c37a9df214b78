use std::io::{Seek, SeekFrom, Write};

use crate::foundation::core::Frame;
use crate::foundation::error::{PalError, PalResult};
use crate::palette::model::Palette;
use crate::quantize::quantize_frame;
use crate::rle::encode_into;
use crate::stream::format::{FRAME_COUNT_OFFSET, StreamHeader};

/// Streaming writer for the palstream layout.
///
/// Header and palette are written by [`StreamWriter::begin`]; each `push_*` call appends exactly
/// one frame record, in call order. Nothing beyond the current frame is buffered.
///
/// The header `frame_count` given to `begin` is provisional: [`StreamWriter::finish`] seeks back
/// and replaces it with the number of frames actually written, so a finished stream always has a
/// consistent count. A stream that is never finished keeps the provisional value.
pub struct StreamWriter<W: Write + Seek> {
    inner: W,
    start: u64,
    header: StreamHeader,
    palette: Palette,
    frames_written: u32,
    bytes_written: u64,
    scratch: Vec<u8>,
}

impl<W: Write + Seek> StreamWriter<W> {
    /// Write header and palette table at the sink's current position.
    pub fn begin(mut inner: W, header: StreamHeader, palette: &Palette) -> PalResult<Self> {
        if usize::from(header.palette_len) != palette.len() {
            return Err(PalError::validation(format!(
                "header palette size {} does not match palette with {} colors",
                header.palette_len,
                palette.len()
            )));
        }

        let start = inner.stream_position()?;
        inner.write_all(&header.to_bytes())?;
        let mut table = Vec::with_capacity(palette.len() * 2);
        for packed in palette.to_rgb565() {
            table.extend_from_slice(&packed.to_be_bytes());
        }
        inner.write_all(&table)?;

        tracing::info!(
            frames = header.frame_count,
            width = header.width,
            height = header.height,
            fps = header.fps,
            colors = palette.len(),
            "stream started"
        );

        Ok(Self {
            inner,
            start,
            header,
            palette: palette.clone(),
            frames_written: 0,
            bytes_written: (header.to_bytes().len() + table.len()) as u64,
            scratch: Vec::with_capacity(header.pixel_count() * 2),
        })
    }

    /// Header as written by `begin`.
    pub fn header(&self) -> &StreamHeader {
        &self.header
    }

    /// Frame records written so far.
    pub fn frames_written(&self) -> u32 {
        self.frames_written
    }

    /// Total bytes written so far, header included.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Quantize, run-length encode and append one frame.
    pub fn push_frame(&mut self, frame: &Frame) -> PalResult<()> {
        if frame.width != u32::from(self.header.width)
            || frame.height != u32::from(self.header.height)
        {
            return Err(PalError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.header.width, self.header.height
            )));
        }
        let indices = quantize_frame(frame, &self.palette)?;
        self.push_indices(&indices)
    }

    /// Run-length encode and append one frame of palette indices.
    pub fn push_indices(&mut self, indices: &[u8]) -> PalResult<()> {
        if indices.len() != self.header.pixel_count() {
            return Err(PalError::validation(format!(
                "index count mismatch: got {}, expected {}",
                indices.len(),
                self.header.pixel_count()
            )));
        }
        if let Some(bad) = indices
            .iter()
            .find(|&&i| usize::from(i) >= self.palette.len())
        {
            return Err(PalError::validation(format!(
                "palette index {bad} out of range for {} colors",
                self.palette.len()
            )));
        }

        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.clear();
        encode_into(indices, &mut scratch);
        let res = self.push_record(&scratch);
        self.scratch = scratch;
        res
    }

    /// Append an already encoded record block (length prefix is added here).
    pub(crate) fn push_record(&mut self, record: &[u8]) -> PalResult<()> {
        let len = u32::try_from(record.len()).map_err(|_| {
            PalError::validation(format!("frame record of {} bytes is too large", record.len()))
        })?;
        if self.frames_written == u32::MAX {
            return Err(PalError::validation("stream frame count overflow"));
        }
        self.inner.write_all(&len.to_be_bytes())?;
        self.inner.write_all(record)?;
        self.frames_written += 1;
        self.bytes_written += 4 + u64::from(len);
        tracing::debug!(frame = self.frames_written - 1, bytes = len, "frame written");
        Ok(())
    }

    /// Patch the header frame count, flush, and hand back the sink.
    pub fn finish(mut self) -> PalResult<W> {
        if self.frames_written != self.header.frame_count {
            tracing::warn!(
                declared = self.header.frame_count,
                written = self.frames_written,
                "source frame count differs from frames written; header patched"
            );
        }

        self.inner.flush()?;
        let end = self.inner.stream_position()?;
        self.inner
            .seek(SeekFrom::Start(self.start + FRAME_COUNT_OFFSET))?;
        self.inner.write_all(&self.frames_written.to_be_bytes())?;
        self.inner.seek(SeekFrom::Start(end))?;
        self.inner.flush()?;

        tracing::info!(
            frames = self.frames_written,
            bytes = self.bytes_written,
            "stream finished"
        );
        Ok(self.inner)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stream/writer.rs"]
mod tests;
