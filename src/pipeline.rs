//! Surface Profiles → Persistence Images
//!
//! The full transform, per batch:
//!
//! ```text
//!   profile ──filtration──▶ CSR matrix ──HomologyBackend──▶ diagram
//!           ──drop essential──▶ finite pairs ─┐
//!                                             ├─ Rasterizer::fit (whole batch)
//!                                             └─ Rasterizer::transform ──▶ image
//! ```
//!
//! Filtration and homology are independent per profile. Only the
//! rasterizer fit sees the batch, so `fit_transform([p])` and
//! `fit_transform([p, q])` may render p differently. Use
//! `transform_each` or `transform_with_specs` when images must not
//! depend on their neighbours.
//!
//! ## Reference
//!
//! Frahi et al., "Tape surfaces characterization with persistence
//! images", AIMS Materials Science 7(4), 364 (2020).

use log::{debug, warn};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};
use crate::filtration::filtration;
use crate::image::{PersistenceImager, PixelResolution, RasterSpecs, Rasterizer};
use crate::profile::Profile;
use crate::topology::{ElderRuleHomology, HomologyBackend, HomologyParams, PersistenceDiagram};

/// Construction-time parameters of the transformer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImagerConfig {
    /// Edges above this value never enter the filtration
    pub threshold: f64,
    /// Output image resolution (width, height)
    pub pixels: PixelResolution,
}

impl ImagerConfig {
    pub fn new(
        threshold: f64,
        pixels: impl Into<PixelResolution>,
    ) -> std::result::Result<Self, ConfigError> {
        let config = Self {
            threshold,
            pixels: pixels.into(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.threshold.is_nan() || self.threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if self.pixels.validate().is_err() {
            return Err(ConfigError::InvalidPixels {
                width: self.pixels.width,
                height: self.pixels.height,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    ///
    /// ```json
    /// { "threshold": 20.0, "pixels": { "width": 20, "height": 20 } }
    /// ```
    pub fn from_json(json: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn homology_params(&self) -> HomologyParams {
        HomologyParams::dim0(self.threshold)
    }
}

impl Default for ImagerConfig {
    fn default() -> Self {
        Self {
            threshold: 20.0,
            pixels: PixelResolution::square(20),
        }
    }
}

/// Batch transformer from surface profiles to persistence images
#[derive(Debug, Clone)]
pub struct SurfaceProfileImager<H = ElderRuleHomology, R = PersistenceImager> {
    config: ImagerConfig,
    backend: H,
    rasterizer: R,
}

impl SurfaceProfileImager {
    /// Default backends: union-find homology, Gaussian persistence images.
    pub fn new(threshold: f64, pixels: impl Into<PixelResolution>) -> Result<Self> {
        Self::from_config(ImagerConfig::new(threshold, pixels)?)
    }

    pub fn from_config(config: ImagerConfig) -> Result<Self> {
        config.validate()?;
        let rasterizer = PersistenceImager::new(config.pixels)?;
        Self::with_components(config, ElderRuleHomology::new(), rasterizer)
    }
}

impl<H: HomologyBackend, R: Rasterizer> SurfaceProfileImager<H, R> {
    /// Assemble a transformer from explicit collaborators.
    pub fn with_components(config: ImagerConfig, backend: H, rasterizer: R) -> Result<Self> {
        config.validate()?;
        if rasterizer.pixels() != config.pixels {
            return Err(ConfigError::PixelMismatch {
                configured: config.pixels,
                rasterizer: rasterizer.pixels(),
            }
            .into());
        }
        Ok(Self {
            config,
            backend,
            rasterizer,
        })
    }

    pub fn config(&self) -> &ImagerConfig {
        &self.config
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    pub fn pixels(&self) -> PixelResolution {
        self.config.pixels
    }

    pub fn backend(&self) -> &H {
        &self.backend
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Finite dimension-0 pairs of one validated profile.
    ///
    /// `index` only labels errors and log lines.
    pub fn profile_diagram(&self, index: usize, profile: &Profile) -> Result<PersistenceDiagram> {
        let matrix = filtration(profile);
        let full = self
            .backend
            .diagram(&matrix, &self.config.homology_params())
            .map_err(|source| Error::Computation { index, source })?;

        let essential = full.essential_count();
        if essential != 1 {
            warn!(
                "profile {index}: expected one essential class, found {essential}; \
                 dropping all essential pairs"
            );
        }
        let finite = full.without_essential();
        debug!(
            "profile {index}: {} samples, {} stored entries, {} finite pairs, max persistence {:.4}",
            profile.len(),
            matrix.nnz(),
            finite.len(),
            finite.max_persistence()
        );
        Ok(finite)
    }

    /// Finite diagrams of a batch, in input order.
    pub fn diagrams<P: AsRef<[f64]>>(&self, profiles: &[P]) -> Result<Vec<PersistenceDiagram>> {
        profiles
            .iter()
            .enumerate()
            .map(|(index, heights)| {
                let profile = Profile::from_slice(heights.as_ref())
                    .map_err(|source| Error::InvalidInput { index, source })?;
                self.profile_diagram(index, &profile)
            })
            .collect()
    }

    /// Raster range fitted jointly over the batch.
    pub fn fit<P: AsRef<[f64]>>(&self, profiles: &[P]) -> Result<RasterSpecs> {
        let diagrams = self.diagrams(profiles)?;
        Ok(self.rasterizer.fit(&diagrams)?)
    }

    /// One image per profile, range fitted over the whole batch.
    pub fn fit_transform<P: AsRef<[f64]>>(&self, profiles: &[P]) -> Result<Vec<Array2<f64>>> {
        let diagrams = self.diagrams(profiles)?;
        if diagrams.is_empty() {
            return Ok(Vec::new());
        }
        debug!(
            "rasterizing {} diagrams at {}x{}",
            diagrams.len(),
            self.config.pixels.width,
            self.config.pixels.height
        );
        Ok(self.rasterizer.fit_transform(&diagrams)?)
    }

    /// One image per profile on a frozen range.
    pub fn transform_with_specs<P: AsRef<[f64]>>(
        &self,
        profiles: &[P],
        specs: &RasterSpecs,
    ) -> Result<Vec<Array2<f64>>> {
        let diagrams = self.diagrams(profiles)?;
        Ok(self.rasterizer.transform_batch(&diagrams, specs)?)
    }

    /// Same images as calling `fit_transform(&[p])` for every profile.
    pub fn transform_each<P: AsRef<[f64]>>(&self, profiles: &[P]) -> Result<Vec<Array2<f64>>> {
        let diagrams = self.diagrams(profiles)?;
        diagrams
            .iter()
            .enumerate()
            .map(|(index, diagram)| -> Result<Array2<f64>> {
                let single = std::slice::from_ref(diagram);
                let specs = self.rasterizer.fit(single).map_err(|e| e.at_index(index))?;
                let image = self
                    .rasterizer
                    .transform(diagram, &specs)
                    .map_err(|e| e.at_index(index))?;
                Ok(image)
            })
            .collect()
    }
}
