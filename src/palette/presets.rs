use crate::foundation::core::Rgb8;
use crate::foundation::error::{PalError, PalResult};
use crate::palette::model::Palette;

// Index order is part of the stream format.
const STANDARD16: [Rgb8; 16] = [
    Rgb8::new(0, 0, 0),
    Rgb8::new(0, 0, 128),
    Rgb8::new(0, 128, 0),
    Rgb8::new(0, 128, 128),
    Rgb8::new(128, 0, 0),
    Rgb8::new(128, 0, 128),
    Rgb8::new(128, 128, 0),
    Rgb8::new(192, 192, 192),
    Rgb8::new(128, 128, 128),
    Rgb8::new(0, 0, 255),
    Rgb8::new(0, 255, 0),
    Rgb8::new(0, 255, 255),
    Rgb8::new(255, 0, 0),
    Rgb8::new(255, 0, 255),
    Rgb8::new(255, 255, 0),
    Rgb8::new(255, 255, 255),
];

const GAMEBOY: [Rgb8; 4] = [
    Rgb8::gray(0),
    Rgb8::gray(85),
    Rgb8::gray(170),
    Rgb8::gray(255),
];

// i * 255 / 15 for i in 0..16
const GRAY16: [Rgb8; 16] = {
    let mut out = [Rgb8::BLACK; 16];
    let mut i = 0;
    while i < 16 {
        out[i] = Rgb8::gray((i * 17) as u8);
        i += 1;
    }
    out
};

const MONO: [Rgb8; 2] = [Rgb8::BLACK, Rgb8::WHITE];

/// Curated fixed palettes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PresetPalette {
    /// 16-color reference set. The default.
    #[default]
    Standard16,
    /// 4-level grayscale ramp.
    Gameboy,
    /// 16-level grayscale ramp.
    Gray16,
    /// Black and white.
    Mono,
}

impl PresetPalette {
    /// Every preset, in menu order.
    pub const ALL: [Self; 4] = [Self::Standard16, Self::Gameboy, Self::Gray16, Self::Mono];

    /// Numeric menu key (`"1"`..`"4"`).
    pub fn key(self) -> &'static str {
        match self {
            Self::Standard16 => "1",
            Self::Gameboy => "2",
            Self::Gray16 => "3",
            Self::Mono => "4",
        }
    }

    /// Stable name, also accepted as a selector.
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard16 => "standard16",
            Self::Gameboy => "gameboy",
            Self::Gray16 => "gray16",
            Self::Mono => "mono",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Standard16 => "Standard 16-Color",
            Self::Gameboy => "4-Color Grayscale (GameBoy)",
            Self::Gray16 => "16-Level Grayscale",
            Self::Mono => "High-Contrast B&W (2-Color)",
        }
    }

    /// Resolve a selector: either the menu key or the name (case-insensitive).
    pub fn from_key(key: &str) -> PalResult<Self> {
        let wanted = key.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.key() == wanted || p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PalError::InvalidSelection {
                key: wanted.to_string(),
                expected: Self::ALL
                    .iter()
                    .map(|p| format!("{}/{}", p.key(), p.name()))
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Like [`Self::from_key`], but falls back to [`PresetPalette::Standard16`] on a bad key.
    pub fn select_or_default(key: &str) -> Self {
        match Self::from_key(key) {
            Ok(p) => p,
            Err(err) => {
                let fallback = Self::default();
                tracing::warn!(%err, fallback = fallback.name(), "using default palette");
                fallback
            }
        }
    }

    /// Colors of this preset in index order.
    pub fn colors(self) -> &'static [Rgb8] {
        match self {
            Self::Standard16 => &STANDARD16,
            Self::Gameboy => &GAMEBOY,
            Self::Gray16 => &GRAY16,
            Self::Mono => &MONO,
        }
    }

    /// Build the immutable palette for this preset.
    pub fn palette(self) -> Palette {
        Palette::from_table(self.colors())
    }
}

impl std::str::FromStr for PresetPalette {
    type Err = PalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

impl std::fmt::Display for PresetPalette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/presets.rs"]
mod tests;
