use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout};
use std::thread::JoinHandle;

use crate::foundation::core::Frame;
use crate::foundation::error::{PalError, PalResult};
use crate::source::{FrameSource, SourceInfo};

/// Stream metadata reported by `ffprobe`.
#[derive(Clone, Debug)]
pub struct VideoProbe {
    /// Probed file.
    pub source_path: PathBuf,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frame rate numerator.
    pub fps_num: u32,
    /// Frame rate denominator.
    pub fps_den: u32,
    /// Container duration in seconds, 0 when unknown.
    pub duration_sec: f64,
    /// Stream frame count (`nb_frames`), or an estimate from duration and rate.
    pub frame_count: u32,
}

impl VideoProbe {
    /// Exact source rate in frames per second.
    pub fn source_fps(&self) -> f64 {
        if self.fps_den == 0 {
            0.0
        } else {
            f64::from(self.fps_num) / f64::from(self.fps_den)
        }
    }

    /// Whole frames per second (fractional rates are truncated, 29.97 -> 29).
    pub fn nominal_fps(&self) -> PalResult<u16> {
        let fps = self.source_fps().floor();
        if fps < 1.0 {
            return Err(PalError::validation(format!(
                "source frame rate {}/{} is below 1 fps",
                self.fps_num, self.fps_den
            )));
        }
        if fps > f64::from(u16::MAX) {
            return Err(PalError::validation(format!(
                "source frame rate {fps} does not fit the stream header"
            )));
        }
        Ok(fps as u16)
    }

    /// Presentation time of frame `index`, in seconds.
    pub fn frame_time_sec(&self, index: u32) -> f64 {
        if self.fps_num == 0 {
            0.0
        } else {
            f64::from(index) * f64::from(self.fps_den) / f64::from(self.fps_num)
        }
    }
}

/// Return `true` when the `ffmpeg` binary can be executed.
pub fn is_ffmpeg_on_path() -> bool {
    tool_runs("ffmpeg")
}

/// Return `true` when the `ffprobe` binary can be executed.
pub fn is_ffprobe_on_path() -> bool {
    tool_runs("ffprobe")
}

fn tool_runs(name: &str) -> bool {
    std::process::Command::new(name)
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(feature = "media-ffmpeg")]
/// Probe `source_path` with `ffprobe` for the first video stream's geometry, rate and frame count.
pub fn probe_video(source_path: &Path) -> PalResult<VideoProbe> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
        nb_frames: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| PalError::source(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(PalError::source(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| PalError::source(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| PalError::source("no video stream found"))?;
    let width = video_stream
        .width
        .ok_or_else(|| PalError::source("missing video width from ffprobe"))?;
    let height = video_stream
        .height
        .ok_or_else(|| PalError::source("missing video height from ffprobe"))?;
    let (fps_num, fps_den) = parse_ff_ratio(video_stream.r_frame_rate.as_deref().unwrap_or("0/1"))
        .ok_or_else(|| PalError::source("invalid video r_frame_rate"))?;
    let duration_sec = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);

    let frame_count = match video_stream
        .nb_frames
        .as_deref()
        .and_then(|s| s.parse::<u32>().ok())
    {
        Some(n) => n,
        None => {
            let fps = if fps_den == 0 {
                0.0
            } else {
                f64::from(fps_num) / f64::from(fps_den)
            };
            (duration_sec * fps).floor().clamp(0.0, f64::from(u32::MAX)) as u32
        }
    };

    Ok(VideoProbe {
        source_path: source_path.to_path_buf(),
        width,
        height,
        fps_num,
        fps_den,
        duration_sec,
        frame_count,
    })
}

#[cfg(not(feature = "media-ffmpeg"))]
/// Probe `source_path` with `ffprobe` for the first video stream's geometry, rate and frame count.
pub fn probe_video(_source_path: &Path) -> PalResult<VideoProbe> {
    Err(PalError::source(
        "video decoding requires the 'media-ffmpeg' feature",
    ))
}

#[cfg(feature = "media-ffmpeg")]
fn parse_ff_ratio(s: &str) -> Option<(u32, u32)> {
    let mut parts = s.split('/');
    let a = parts.next()?.parse::<u32>().ok()?;
    let b = parts.next()?.parse::<u32>().ok()?;
    if b == 0 {
        return None;
    }
    Some((a, b))
}

struct RawDecoder {
    child: Child,
    stdout: ChildStdout,
    stderr_drain: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    buf: Vec<u8>,
}

impl RawDecoder {
    #[cfg(feature = "media-ffmpeg")]
    fn spawn(probe: &VideoProbe) -> PalResult<Self> {
        use std::process::{Command, Stdio};

        if !is_ffmpeg_on_path() {
            return Err(PalError::source(
                "ffmpeg is required for video decoding, but was not found on PATH",
            ));
        }

        let mut child = Command::new("ffmpeg")
            .args(["-v", "error", "-i"])
            .arg(&probe.source_path)
            .args(["-an", "-f", "rawvideo", "-pix_fmt", "rgb24", "pipe:1"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                PalError::source(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| PalError::source("failed to open ffmpeg stdout (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| PalError::source("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        Ok(Self {
            child,
            stdout,
            stderr_drain: Some(stderr_drain),
            buf: vec![0u8; probe.width as usize * probe.height as usize * 3],
        })
    }

    #[cfg(not(feature = "media-ffmpeg"))]
    fn spawn(_probe: &VideoProbe) -> PalResult<Self> {
        Err(PalError::source(
            "video decoding requires the 'media-ffmpeg' feature",
        ))
    }

    /// Fill `buf` with the next frame. `Ok(false)` on a clean end of stream.
    fn read_frame(&mut self) -> PalResult<bool> {
        let mut filled = 0;
        while filled < self.buf.len() {
            let n = self.stdout.read(&mut self.buf[filled..]).map_err(|e| {
                PalError::source(format!("failed to read decoded frame from ffmpeg: {e}"))
            })?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        if filled == self.buf.len() {
            return Ok(true);
        }

        self.wait()?;
        if filled == 0 {
            Ok(false)
        } else {
            Err(PalError::source(format!(
                "ffmpeg produced a partial frame: {filled} of {} bytes",
                self.buf.len()
            )))
        }
    }

    fn wait(&mut self) -> PalResult<()> {
        let status = self
            .child
            .wait()
            .map_err(|e| PalError::source(format!("failed to wait for ffmpeg: {e}")))?;
        let stderr = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| PalError::source("ffmpeg stderr drain thread panicked"))?
                .unwrap_or_default(),
            None => Vec::new(),
        };
        if !status.success() {
            return Err(PalError::source(format!(
                "ffmpeg exited with status {status}: {}",
                String::from_utf8_lossy(&stderr).trim()
            )));
        }
        Ok(())
    }
}

impl Drop for RawDecoder {
    fn drop(&mut self) {
        if self.stderr_drain.is_some() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Frame source that decodes a video file with the system `ffmpeg` binary.
///
/// Frames are streamed as raw `rgb24` from a long-running child process, one frame in memory at
/// a time. Sampling spawns a separate one-shot decode per requested position.
pub struct FfmpegSource {
    probe: VideoProbe,
    info: SourceInfo,
    decoder: Option<RawDecoder>,
    finished: bool,
}

impl FfmpegSource {
    /// Probe `path` and prepare a source. Decoding starts on the first `next_frame`.
    pub fn open(path: &Path) -> PalResult<Self> {
        let probe = probe_video(path)?;
        let info = SourceInfo {
            frame_count: probe.frame_count,
            width: probe.width,
            height: probe.height,
            fps: probe.nominal_fps()?,
        };
        tracing::debug!(?info, path = %path.display(), "probed video source");
        Ok(Self {
            probe,
            info,
            decoder: None,
            finished: false,
        })
    }

    /// Raw probe data.
    pub fn probe(&self) -> &VideoProbe {
        &self.probe
    }
}

impl FrameSource for FfmpegSource {
    fn info(&self) -> SourceInfo {
        self.info
    }

    fn next_frame(&mut self) -> PalResult<Option<Frame>> {
        if self.finished {
            return Ok(None);
        }
        if self.decoder.is_none() {
            self.decoder = Some(RawDecoder::spawn(&self.probe)?);
        }
        let Some(decoder) = self.decoder.as_mut() else {
            return Ok(None);
        };

        if decoder.read_frame()? {
            Frame::from_rgb24(self.info.width, self.info.height, &decoder.buf).map(Some)
        } else {
            self.finished = true;
            self.decoder = None;
            Ok(None)
        }
    }

    fn sample_frame(&mut self, index: u32, width: u32, height: u32) -> PalResult<Frame> {
        let bytes = decode_scaled_frame(&self.probe, index, width, height)?;
        Frame::from_rgb24(width, height, &bytes)
    }
}

#[cfg(feature = "media-ffmpeg")]
fn decode_scaled_frame(
    probe: &VideoProbe,
    index: u32,
    width: u32,
    height: u32,
) -> PalResult<Vec<u8>> {
    let t = probe.frame_time_sec(index);
    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-ss", &format!("{t:.9}")])
        .arg("-i")
        .arg(&probe.source_path)
        .args([
            "-an",
            "-frames:v",
            "1",
            "-vf",
            &format!("scale={width}:{height}:flags=area"),
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "pipe:1",
        ])
        .output()
        .map_err(|e| PalError::source(format!("failed to run ffmpeg for frame sampling: {e}")))?;

    if !out.status.success() {
        return Err(PalError::source(format!(
            "ffmpeg sample decode failed for '{}' at frame {index}: {}",
            probe.source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    check_sample_len(out.stdout.len(), index, width as usize * height as usize * 3)?;
    Ok(out.stdout)
}

// A clean decode with no output means `index` lies past the last frame, which happens when the
// frame count was estimated from the container duration.
#[cfg(feature = "media-ffmpeg")]
fn check_sample_len(len: usize, index: u32, expected: usize) -> PalResult<()> {
    if len == 0 {
        return Err(PalError::InsufficientSamples {
            needed: u64::from(index) + 1,
            available: u64::from(index),
        });
    }
    if len != expected {
        return Err(PalError::source(format!(
            "sampled frame {index} has {len} bytes, expected {expected}"
        )));
    }
    Ok(())
}

#[cfg(not(feature = "media-ffmpeg"))]
fn decode_scaled_frame(
    _probe: &VideoProbe,
    _index: u32,
    _width: u32,
    _height: u32,
) -> PalResult<Vec<u8>> {
    Err(PalError::source(
        "video decoding requires the 'media-ffmpeg' feature",
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/source/ffmpeg.rs"]
mod tests;
