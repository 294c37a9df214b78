use std::io::{Seek, Write};

use rayon::prelude::*;

use crate::foundation::core::Frame;
use crate::foundation::error::{PalError, PalResult};
use crate::palette::model::Palette;
use crate::quantize::quantize_frame;
use crate::rle::encode_into;
use crate::source::{FrameSource, SourceInfo};
use crate::stream::format::{StreamHeader, check_resolution};
use crate::stream::writer::StreamWriter;

/// Frame-level parallelism for [`encode_stream`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EncodeThreading {
    /// Encode chunks of frames on a rayon pool instead of one at a time.
    pub parallel: bool,
    /// Frames decoded and encoded together per chunk (parallel mode only).
    pub chunk_size: usize,
    /// Worker thread override (parallel mode only).
    pub threads: Option<usize>,
}

impl Default for EncodeThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

impl EncodeThreading {
    /// Check option ranges.
    pub fn validate(&self) -> PalResult<()> {
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(PalError::validation(
                "encode threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// Counters reported by [`encode_stream`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct EncodeStats {
    /// Frame count the source reported up front.
    pub frames_declared: u32,
    /// Frame records actually written (the value patched into the header).
    pub frames_written: u32,
    /// Total stream size in bytes.
    pub bytes_written: u64,
}

/// Quantize and run-length encode one frame into its record bytes (no length prefix).
pub fn encode_frame_record(frame: &Frame, palette: &Palette) -> PalResult<Vec<u8>> {
    let indices = quantize_frame(frame, palette)?;
    let mut out = Vec::with_capacity(indices.len() / 4);
    encode_into(&indices, &mut out);
    Ok(out)
}

/// Encode every frame of `source` into `out`.
///
/// The resolution limit is checked before anything is written. Frames are written in source
/// order in both modes; parallel mode produces the same bytes as sequential mode. The stream ends
/// when the source does, and the header frame count is patched to match.
#[tracing::instrument(skip(source, palette, out), fields(colors = palette.len()))]
pub fn encode_stream<W: Write + Seek>(
    source: &mut dyn FrameSource,
    palette: &Palette,
    out: W,
    threading: &EncodeThreading,
) -> PalResult<(W, EncodeStats)> {
    let info = source.info();
    check_resolution(info.width, info.height)?;
    threading.validate()?;

    let header = StreamHeader::new(
        info.frame_count,
        info.width,
        info.height,
        info.fps,
        palette.len(),
    )?;
    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };

    let mut writer = StreamWriter::begin(out, header, palette)?;
    match pool.as_ref() {
        None => {
            while let Some(frame) = source.next_frame()? {
                check_frame_size(&frame, &info)?;
                writer.push_frame(&frame)?;
            }
        }
        Some(pool) => {
            let chunk_size = threading.chunk_size.max(1);
            let mut chunk = Vec::with_capacity(chunk_size);
            loop {
                chunk.clear();
                while chunk.len() < chunk_size {
                    match source.next_frame()? {
                        Some(frame) => {
                            check_frame_size(&frame, &info)?;
                            chunk.push(frame);
                        }
                        None => break,
                    }
                }
                if chunk.is_empty() {
                    break;
                }
                let done = chunk.len() < chunk_size;

                let records = pool.install(|| {
                    chunk
                        .par_iter()
                        .map(|frame| encode_frame_record(frame, palette))
                        .collect::<Vec<_>>()
                });
                for record in records {
                    writer.push_record(&record?)?;
                }
                if done {
                    break;
                }
            }
        }
    }

    let stats = EncodeStats {
        frames_declared: info.frame_count,
        frames_written: writer.frames_written(),
        bytes_written: writer.bytes_written(),
    };
    let out = writer.finish()?;
    Ok((out, stats))
}

fn check_frame_size(frame: &Frame, info: &SourceInfo) -> PalResult<()> {
    if frame.width != info.width || frame.height != info.height {
        return Err(PalError::validation(format!(
            "decoded frame is {}x{}, source reported {}x{}",
            frame.width, frame.height, info.width, info.height
        )));
    }
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> PalResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PalError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
