//! Palette construction and storage.
//!
//! A [`Palette`] is built once, either from a curated [`PresetPalette`] table or learned from the
//! source by clustering sampled pixels, and is then read-only for the rest of the run.

/// Clustering procedure used by the learned strategy.
pub mod kmeans;
/// Learned palette strategy (frame sampling + clustering).
pub mod learn;
/// The palette value type.
pub mod model;
/// Curated fixed palettes.
pub mod presets;
/// 5-6-5 color packing.
pub mod rgb565;
/// Tagged palette selection policy.
pub mod strategy;
