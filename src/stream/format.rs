use crate::foundation::error::{PalError, PalResult};
use crate::palette::model::MAX_PALETTE_LEN;

/// Largest accepted source width.
pub const MAX_WIDTH: u32 = 384;
/// Largest accepted source height.
pub const MAX_HEIGHT: u32 = 216;
/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 11;
/// Byte offset of `frame_count` within the header.
pub const FRAME_COUNT_OFFSET: u64 = 0;

/// Reject resolutions the target display cannot show. Runs before any output is produced.
pub fn check_resolution(width: u32, height: u32) -> PalResult<()> {
    if width == 0 || height == 0 {
        return Err(PalError::validation(format!(
            "resolution {width}x{height} must be non-zero"
        )));
    }
    if width > MAX_WIDTH || height > MAX_HEIGHT {
        return Err(PalError::ResolutionExceeded {
            width,
            height,
            max_width: MAX_WIDTH,
            max_height: MAX_HEIGHT,
        });
    }
    Ok(())
}

/// Fixed stream header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StreamHeader {
    /// Frames that follow the palette table.
    pub frame_count: u32,
    /// Frame width in pixels.
    pub width: u16,
    /// Frame height in pixels.
    pub height: u16,
    /// Nominal playback rate.
    pub fps: u16,
    /// Palette entries, `1..=256`.
    pub palette_len: u16,
}

impl StreamHeader {
    /// Build a header, validating dimensions and palette size.
    pub fn new(
        frame_count: u32,
        width: u32,
        height: u32,
        fps: u16,
        palette_len: usize,
    ) -> PalResult<Self> {
        check_resolution(width, height)?;
        if fps == 0 {
            return Err(PalError::validation("stream fps must be non-zero"));
        }
        if palette_len == 0 {
            return Err(PalError::EmptyPalette);
        }
        if palette_len > MAX_PALETTE_LEN {
            return Err(PalError::PaletteTooLarge {
                len: palette_len,
                max: MAX_PALETTE_LEN,
            });
        }
        Ok(Self {
            frame_count,
            width: width as u16,
            height: height as u16,
            fps,
            palette_len: palette_len as u16,
        })
    }

    /// Pixels per frame.
    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Serialize to the fixed 11-byte header.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[0..4].copy_from_slice(&self.frame_count.to_be_bytes());
        buf[4..6].copy_from_slice(&self.width.to_be_bytes());
        buf[6..8].copy_from_slice(&self.height.to_be_bytes());
        buf[8..10].copy_from_slice(&self.fps.to_be_bytes());
        // 256 does not fit a byte; it is stored as 0.
        buf[10] = (self.palette_len & 0xff) as u8;
        buf
    }

    /// Parse the fixed header. Dimensions are not re-checked against the display limits.
    pub fn from_bytes(buf: &[u8; HEADER_LEN]) -> PalResult<Self> {
        let frame_count = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let width = u16::from_be_bytes([buf[4], buf[5]]);
        let height = u16::from_be_bytes([buf[6], buf[7]]);
        let fps = u16::from_be_bytes([buf[8], buf[9]]);
        let palette_len = if buf[10] == 0 {
            MAX_PALETTE_LEN as u16
        } else {
            u16::from(buf[10])
        };
        if width == 0 || height == 0 {
            return Err(PalError::validation(format!(
                "stream header has empty resolution {width}x{height}"
            )));
        }
        Ok(Self {
            frame_count,
            width,
            height,
            fps,
            palette_len,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stream/format.rs"]
mod tests;
