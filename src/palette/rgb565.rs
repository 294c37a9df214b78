use crate::foundation::core::Rgb8;

/// Pack a color as `RRRRRGGGGGGBBBBB`, keeping the top bits of each channel.
pub fn pack_rgb565(c: Rgb8) -> u16 {
    (u16::from(c.r >> 3) << 11) | (u16::from(c.g >> 2) << 5) | u16::from(c.b >> 3)
}

/// Expand a 5-6-5 value back to 8 bits per channel by bit replication.
///
/// `unpack_rgb565(pack_rgb565(c))` is the color a 5-6-5 display shows for `c`.
pub fn unpack_rgb565(v: u16) -> Rgb8 {
    let r5 = ((v >> 11) & 0x1f) as u8;
    let g6 = ((v >> 5) & 0x3f) as u8;
    let b5 = (v & 0x1f) as u8;
    Rgb8::new(
        (r5 << 3) | (r5 >> 2),
        (g6 << 2) | (g6 >> 4),
        (b5 << 3) | (b5 >> 2),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/palette/rgb565.rs"]
mod tests;
