//! Persistence Images (Adams et al., JMLR 18, 2017)
//!
//! Each finite pair (b, d) is moved to birth–persistence coordinates
//! (b, p = d − b), spread by an isotropic Gaussian and weighted linearly
//! by p / max p of its own diagram. Masses are integrated over pixel
//! bins:
//!
//! ```text
//!   dx          = max_bd / height
//!   birth bin k = [lin(min_bd, max_bd, width)[k],  + dx]
//!   pers. bin k = [lin(0,      max_bd, height)[k], + dx]
//! ```
//!
//! The Gaussian standard deviation defaults to dx. Rows of the output run
//! from the highest persistence bin (row 0) down to the lowest; columns
//! run along birth.

use ndarray::{Array1, Array2, Axis};

use crate::error::RasterError;
use crate::topology::PersistenceDiagram;

use super::kernel::bin_masses;
use super::rasterizer::{PixelResolution, Rasterizer, RasterSpecs};

/// Gaussian persistence-image rasterizer with linear persistence weighting
#[derive(Debug, Clone, PartialEq)]
pub struct PersistenceImager {
    pixels: PixelResolution,
    /// Kernel standard deviation; one pixel width when unset
    spread: Option<f64>,
    /// Frozen raster range; fitted per batch when unset
    specs: Option<RasterSpecs>,
}

impl PersistenceImager {
    pub fn new(pixels: impl Into<PixelResolution>) -> Result<Self, RasterError> {
        let pixels = pixels.into();
        pixels.validate()?;
        Ok(Self {
            pixels,
            spread: None,
            specs: None,
        })
    }

    /// Fixed kernel standard deviation.
    pub fn with_spread(mut self, spread: f64) -> Result<Self, RasterError> {
        if !spread.is_finite() || spread <= 0.0 {
            return Err(RasterError::InvalidSpread(spread));
        }
        self.spread = Some(spread);
        Ok(self)
    }

    /// Fixed raster range: `fit` returns it instead of reading the batch,
    /// so images no longer depend on batch composition.
    pub fn with_specs(mut self, specs: RasterSpecs) -> Result<Self, RasterError> {
        specs.validate()?;
        self.specs = Some(specs);
        Ok(self)
    }

    pub fn spread(&self) -> Option<f64> {
        self.spread
    }

    pub fn specs(&self) -> Option<RasterSpecs> {
        self.specs
    }
}

/// A diagram is renderable when it has finite pairs, all of them real.
fn check_diagram(index: usize, diagram: &PersistenceDiagram) -> Result<(), RasterError> {
    let mut any = false;
    for pair in diagram.finite() {
        if pair.birth.is_nan() || pair.death.is_nan() || pair.birth.is_infinite() {
            return Err(RasterError::NonFinitePair { index });
        }
        any = true;
    }
    if !any {
        return Err(RasterError::EmptyDiagram { index });
    }
    Ok(())
}

impl Rasterizer for PersistenceImager {
    fn pixels(&self) -> PixelResolution {
        self.pixels
    }

    fn fit(&self, diagrams: &[PersistenceDiagram]) -> Result<RasterSpecs, RasterError> {
        for (index, diagram) in diagrams.iter().enumerate() {
            check_diagram(index, diagram)?;
        }

        // Zero-persistence pairs carry no weight and stay out of the range
        // unless the whole batch consists of them.
        let any_positive = diagrams
            .iter()
            .flat_map(|d| d.finite())
            .any(|p| p.persistence() > 0.0);
        let mut min_bd = 0.0_f64;
        let mut max_bd = 0.0_f64;
        for pair in diagrams.iter().flat_map(|d| d.finite()) {
            let persistence = pair.persistence();
            if any_positive && persistence <= 0.0 {
                continue;
            }
            min_bd = min_bd.min(pair.birth).min(persistence);
            max_bd = max_bd.max(pair.birth).max(persistence);
        }

        let specs = match self.specs {
            Some(frozen) => frozen,
            None => RasterSpecs::new(min_bd, max_bd),
        };
        specs.validate()?;
        log::trace!(
            "fitted raster range [{:.4}, {:.4}] over {} diagrams",
            specs.min_bd,
            specs.max_bd,
            diagrams.len()
        );
        Ok(specs)
    }

    fn transform(
        &self,
        diagram: &PersistenceDiagram,
        specs: &RasterSpecs,
    ) -> Result<Array2<f64>, RasterError> {
        check_diagram(0, diagram)?;
        specs.validate()?;

        let (width, height) = (self.pixels.width, self.pixels.height);
        let max_bd = specs.max_bd;
        let min_bd = specs.min_bd.min(0.0);
        let dx = max_bd / height as f64;
        let sigma = self.spread.unwrap_or(dx);

        let xs_lower = Array1::linspace(min_bd, max_bd, width).to_vec();
        let ys_lower = Array1::linspace(0.0, max_bd, height).to_vec();

        // Accumulated as (birth, persistence) then flipped into image rows.
        let mut img = Array2::<f64>::zeros((width, height));
        let max_persistence = diagram.max_persistence();
        if max_persistence > 0.0 {
            for pair in diagram.finite() {
                let persistence = pair.persistence();
                let weight = persistence / max_persistence;
                if weight <= 0.0 {
                    continue;
                }
                let x_mass = bin_masses(&xs_lower, dx, pair.birth, sigma);
                let y_mass = bin_masses(&ys_lower, dx, persistence, sigma);
                let outer = Array2::from_shape_fn((width, height), |(i, j)| x_mass[i] * y_mass[j]);
                img.scaled_add(weight, &outer);
            }
        }

        let mut image = img.reversed_axes();
        image.invert_axis(Axis(0));
        Ok(image.as_standard_layout().into_owned())
    }
}
