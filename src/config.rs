use std::path::Path;

use crate::foundation::error::{PalError, PalResult};
use crate::palette::strategy::PaletteStrategy;
use crate::pipeline::EncodeThreading;

/// Everything needed to encode one video, loadable from JSON.
///
/// ```json
/// {
///   "palette": { "kind": "learned", "colors": 32, "sample_frames": 100, "seed": 7 },
///   "threading": { "parallel": true, "chunk_size": 32 }
/// }
/// ```
///
/// Omitted fields take their defaults: the `standard16` palette and sequential encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodeConfig {
    /// Palette selection policy.
    pub palette: PaletteStrategy,
    /// Frame-level parallelism.
    pub threading: EncodeThreading,
}

impl EncodeConfig {
    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> PalResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| PalError::validation(format!("invalid encode config: {e}")))
    }

    /// Read and parse a JSON file.
    pub fn from_json_path(path: &Path) -> PalResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PalError::validation(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Check every section.
    pub fn validate(&self) -> PalResult<()> {
        self.palette.validate()?;
        self.threading.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
