//! palstream turns decoded video into a palette-indexed, run-length-encoded byte stream for
//! playback on small fixed-resolution displays with 5-6-5 color.
//!
//! # Pipeline overview
//!
//! 1. **Palette**: pick a curated [`PresetPalette`] or learn one from sampled frames
//!    ([`PaletteStrategy`]). The resulting [`Palette`] is immutable for the whole run.
//! 2. **Quantize**: map each pixel to its nearest palette index ([`quantize_frame`]).
//! 3. **Run-length encode**: collapse the index sequence into `(run, index)` pairs
//!    ([`encode_runs`]).
//! 4. **Write**: stream header, 5-6-5 palette table and length-prefixed frame records
//!    ([`StreamWriter`]), one frame at a time.
//!
//! [`encode_stream`] drives all four steps for a [`FrameSource`]; [`StreamReader`] parses the
//! result back.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: equal input, palette and seed produce identical bytes, with or without
//!   parallel encoding.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;
mod palette;
mod pipeline;
mod quantize;
mod rle;
mod source;
mod stream;

pub use config::EncodeConfig;
pub use foundation::core::{Frame, Rgb8};
pub use foundation::error::{PalError, PalResult};
pub use foundation::math::Rng64;
pub use palette::kmeans::{ColorClusterer, KMeans};
pub use palette::learn::{LearnOpts, learn_palette, learn_palette_with};
pub use palette::model::{MAX_PALETTE_LEN, Palette};
pub use palette::presets::PresetPalette;
pub use palette::rgb565::{pack_rgb565, unpack_rgb565};
pub use palette::strategy::PaletteStrategy;
pub use pipeline::{EncodeStats, EncodeThreading, encode_frame_record, encode_stream};
pub use quantize::{nearest_index, quantize_frame, quantize_pixels};
pub use rle::{
    MAX_RUN, RunRecord, decode_bytes, decode_runs, encode_into, encode_runs, parse_records,
};
pub use source::ffmpeg::{
    FfmpegSource, VideoProbe, is_ffmpeg_on_path, is_ffprobe_on_path, probe_video,
};
pub use source::memory::InMemorySource;
pub use source::{FrameSource, SourceInfo};
pub use stream::format::{HEADER_LEN, MAX_HEIGHT, MAX_WIDTH, StreamHeader, check_resolution};
pub use stream::reader::StreamReader;
pub use stream::writer::StreamWriter;
