use crate::foundation::error::PalResult;
use crate::palette::learn::{LearnOpts, learn_palette};
use crate::palette::model::Palette;
use crate::palette::presets::PresetPalette;
use crate::source::FrameSource;

/// How the palette for a run is chosen.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaletteStrategy {
    /// A curated table.
    Fixed {
        /// Which table.
        preset: PresetPalette,
    },
    /// Clustered from pixels sampled out of the source.
    Learned(LearnOpts),
}

impl Default for PaletteStrategy {
    fn default() -> Self {
        Self::Fixed {
            preset: PresetPalette::default(),
        }
    }
}

impl PaletteStrategy {
    /// Check strategy options without touching the source.
    pub fn validate(&self) -> PalResult<()> {
        match self {
            Self::Fixed { .. } => Ok(()),
            Self::Learned(opts) => opts.validate(),
        }
    }

    /// Produce the palette for `source`. Fixed tables never read from the source.
    pub fn build(&self, source: &mut dyn FrameSource) -> PalResult<Palette> {
        match self {
            Self::Fixed { preset } => {
                tracing::info!(
                    preset = preset.name(),
                    colors = preset.colors().len(),
                    "fixed palette"
                );
                Ok(preset.palette())
            }
            Self::Learned(opts) => learn_palette(source, opts),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/strategy.rs"]
mod tests;
