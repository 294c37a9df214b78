//! The palstream byte layout, big-endian throughout:
//!
//! ```text
//! Offset  Size    Field
//! 0       4       frame_count
//! 4       2       width
//! 6       2       height
//! 8       2       fps
//! 10      1       palette_size (0 means 256)
//! 11      2 * N   palette, 5-6-5 packed, index order
//! ...             frame_count * { record_length: u32, record_length bytes of (run, index) }
//! ```

/// Header layout and resolution limits.
pub mod format;
/// Stream parser (playback side).
pub mod reader;
/// Streaming stream assembler.
pub mod writer;
