use crate::foundation::core::Rgb8;
use crate::foundation::error::{PalError, PalResult};
use crate::foundation::math::{Rng64, sample_distinct};
use crate::palette::kmeans::{ColorClusterer, KMeans};
use crate::palette::model::{MAX_PALETTE_LEN, Palette};
use crate::source::FrameSource;

/// Options for deriving a palette from the source video.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LearnOpts {
    /// Requested palette size (clusters).
    pub colors: usize,
    /// Number of frames sampled from the source.
    pub sample_frames: u32,
    /// Width each sampled frame is reduced to before pooling.
    pub sample_width: u32,
    /// Height each sampled frame is reduced to before pooling.
    pub sample_height: u32,
    /// Sampling/clustering seed. `None` draws one from the clock (non-reproducible).
    pub seed: Option<u64>,
    /// k-means iteration cap.
    pub max_iterations: u32,
}

impl Default for LearnOpts {
    fn default() -> Self {
        Self {
            colors: 32,
            sample_frames: 100,
            sample_width: 64,
            sample_height: 36,
            seed: None,
            max_iterations: 50,
        }
    }
}

impl LearnOpts {
    /// Check option ranges.
    pub fn validate(&self) -> PalResult<()> {
        if self.colors == 0 {
            return Err(PalError::EmptyPalette);
        }
        if self.colors > MAX_PALETTE_LEN {
            return Err(PalError::PaletteTooLarge {
                len: self.colors,
                max: MAX_PALETTE_LEN,
            });
        }
        if self.sample_frames == 0 {
            return Err(PalError::validation("learned palette sample_frames must be >= 1"));
        }
        if self.sample_width == 0 || self.sample_height == 0 {
            return Err(PalError::validation(
                "learned palette sample resolution must be non-zero",
            ));
        }
        if self.max_iterations == 0 {
            return Err(PalError::validation("learned palette max_iterations must be >= 1"));
        }
        Ok(())
    }
}

/// Learn a palette with the default k-means clusterer.
pub fn learn_palette(source: &mut dyn FrameSource, opts: &LearnOpts) -> PalResult<Palette> {
    let kmeans = KMeans {
        max_iterations: opts.max_iterations,
    };
    learn_palette_with(source, opts, &kmeans)
}

/// Sample frames from `source`, pool their downsampled pixels and cluster them.
///
/// Frame positions are distinct and drawn uniformly; the result is deterministic for a fixed
/// `opts.seed`. Fails with [`PalError::InsufficientSamples`] when the source has fewer frames
/// than `opts.sample_frames` or the pool has fewer pixels than `opts.colors`.
#[tracing::instrument(skip(source, clusterer))]
pub fn learn_palette_with(
    source: &mut dyn FrameSource,
    opts: &LearnOpts,
    clusterer: &dyn ColorClusterer,
) -> PalResult<Palette> {
    opts.validate()?;

    let info = source.info();
    if info.frame_count < opts.sample_frames {
        return Err(PalError::InsufficientSamples {
            needed: u64::from(opts.sample_frames),
            available: u64::from(info.frame_count),
        });
    }

    let seed = match opts.seed {
        Some(seed) => seed,
        None => {
            let seed = Rng64::seed_from_clock();
            tracing::info!(seed, "no palette seed configured; drew one from the clock");
            seed
        }
    };
    let mut rng = Rng64::new(seed);

    let positions = sample_distinct(
        &mut rng,
        u64::from(info.frame_count),
        u64::from(opts.sample_frames),
    );

    let per_frame = opts.sample_width as usize * opts.sample_height as usize;
    let mut pool: Vec<Rgb8> = Vec::with_capacity(per_frame * positions.len());
    for pos in positions {
        let frame = source.sample_frame(pos as u32, opts.sample_width, opts.sample_height)?;
        pool.extend_from_slice(&frame.pixels);
    }
    tracing::debug!(pool = pool.len(), "collected palette samples");

    let centroids = clusterer.cluster(&pool, opts.colors, &mut rng)?;
    let palette = Palette::new(centroids)?;
    tracing::info!(
        requested = opts.colors,
        colors = palette.len(),
        seed,
        "learned palette"
    );
    Ok(palette)
}

#[cfg(test)]
#[path = "../../tests/unit/palette/learn.rs"]
mod tests;
