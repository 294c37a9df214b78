use crate::foundation::core::Rgb8;
use crate::foundation::error::{PalError, PalResult};
use crate::palette::rgb565::pack_rgb565;

/// Largest palette an 8-bit index can address.
pub const MAX_PALETTE_LEN: usize = 256;

/// Ordered, duplicate-free set of 1..=256 colors. Position is the palette index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb8>,
}

impl Palette {
    /// Build a palette, dropping repeated colors (first occurrence wins, order is kept).
    pub fn new(colors: impl IntoIterator<Item = Rgb8>) -> PalResult<Self> {
        let mut seen = std::collections::HashSet::new();
        let colors: Vec<Rgb8> = colors.into_iter().filter(|c| seen.insert(*c)).collect();
        if colors.is_empty() {
            return Err(PalError::EmptyPalette);
        }
        if colors.len() > MAX_PALETTE_LEN {
            return Err(PalError::PaletteTooLarge {
                len: colors.len(),
                max: MAX_PALETTE_LEN,
            });
        }
        Ok(Self { colors })
    }

    // Curated tables are non-empty and duplicate-free.
    pub(crate) fn from_table(table: &[Rgb8]) -> Self {
        Self {
            colors: table.to_vec(),
        }
    }

    /// Colors in palette index order.
    pub fn colors(&self) -> &[Rgb8] {
        &self.colors
    }

    /// Number of entries (1..=256).
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, if it exists.
    pub fn get(&self, index: u8) -> Option<Rgb8> {
        self.colors.get(usize::from(index)).copied()
    }

    /// Packed 5-6-5 table, in palette index order.
    pub fn to_rgb565(&self) -> Vec<u16> {
        self.colors.iter().copied().map(pack_rgb565).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/model.rs"]
mod tests;
