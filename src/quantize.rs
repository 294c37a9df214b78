use crate::foundation::core::{Frame, Rgb8};
use crate::foundation::error::{PalError, PalResult};
use crate::palette::model::{MAX_PALETTE_LEN, Palette};

/// Index of the palette entry closest to `c`; the lowest index wins ties.
///
/// `palette` must be non-empty and hold at most 256 entries.
pub fn nearest_index(palette: &[Rgb8], c: Rgb8) -> u8 {
    let mut best = 0usize;
    let mut best_d = u32::MAX;
    for (i, p) in palette.iter().enumerate() {
        let d = p.dist_sq(c);
        if d < best_d {
            best = i;
            best_d = d;
            if d == 0 {
                break;
            }
        }
    }
    best as u8
}

/// Map every pixel to its nearest palette index.
pub fn quantize_pixels(pixels: &[Rgb8], palette: &[Rgb8]) -> PalResult<Vec<u8>> {
    if palette.is_empty() {
        return Err(PalError::EmptyPalette);
    }
    if palette.len() > MAX_PALETTE_LEN {
        return Err(PalError::PaletteTooLarge {
            len: palette.len(),
            max: MAX_PALETTE_LEN,
        });
    }

    let mut out = Vec::with_capacity(pixels.len());
    // Neighboring pixels are frequently identical; reuse the previous answer.
    let mut last: Option<(Rgb8, u8)> = None;
    for &px in pixels {
        let idx = match last {
            Some((c, idx)) if c == px => idx,
            _ => nearest_index(palette, px),
        };
        last = Some((px, idx));
        out.push(idx);
    }
    Ok(out)
}

/// Quantize a whole frame against the run's palette.
pub fn quantize_frame(frame: &Frame, palette: &Palette) -> PalResult<Vec<u8>> {
    quantize_pixels(&frame.pixels, palette.colors())
}

#[cfg(test)]
#[path = "../tests/unit/quantize.rs"]
mod tests;
