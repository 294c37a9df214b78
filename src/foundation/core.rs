use crate::foundation::error::{PalError, PalResult};

/// 8-bit RGB color sample. No alpha.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a gray level with all three channels set to `v`.
    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }

    /// Squared Euclidean distance over the three channels.
    ///
    /// Channels are widened to `i32` before subtracting; the result fits a `u32`
    /// (at most `3 * 255^2`).
    pub fn dist_sq(self, other: Self) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(v: [u8; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(c: Rgb8) -> Self {
        [c.r, c.g, c.b]
    }
}

/// One decoded video frame: `width * height` colors, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major pixels, `width * height` long.
    pub pixels: Vec<Rgb8>,
}

impl Frame {
    /// Create a validated frame.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgb8>) -> PalResult<Self> {
        let expected = pixel_count(width, height);
        if pixels.len() != expected {
            return Err(PalError::validation(format!(
                "frame pixel count mismatch: got {}, expected {expected} for {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A frame filled with a single color.
    pub fn solid(width: u32, height: u32, color: Rgb8) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; pixel_count(width, height)],
        }
    }

    /// Build a frame from tightly packed `rgb24` bytes.
    pub fn from_rgb24(width: u32, height: u32, bytes: &[u8]) -> PalResult<Self> {
        let expected = pixel_count(width, height) * 3;
        if bytes.len() != expected {
            return Err(PalError::validation(format!(
                "rgb24 buffer size mismatch: got {} bytes, expected {expected} for {width}x{height}",
                bytes.len()
            )));
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|px| Rgb8::new(px[0], px[1], px[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Number of pixels in the frame.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Nearest-neighbor resample to `width x height`.
    pub fn resize_nearest(&self, width: u32, height: u32) -> PalResult<Self> {
        if width == 0 || height == 0 {
            return Err(PalError::validation("resize target must be non-zero"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(PalError::validation("cannot resize an empty frame"));
        }
        let (sw, sh) = (u64::from(self.width), u64::from(self.height));
        let mut pixels = Vec::with_capacity(pixel_count(width, height));
        for y in 0..u64::from(height) {
            let sy = (y * sh / u64::from(height)) as usize;
            let row = sy * self.width as usize;
            for x in 0..u64::from(width) {
                let sx = (x * sw / u64::from(width)) as usize;
                pixels.push(self.pixels[row + sx]);
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

pub(crate) fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
