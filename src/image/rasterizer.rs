//! Rasterizer Interface: Diagrams → Fixed-Size Images
//!
//! Rasterization is a two-step batch contract:
//!
//! 1. `fit` reads the whole batch and fixes the raster range
//! 2. `transform` renders one diagram with that range
//!
//! Because the range is fitted jointly, the image of a diagram depends on
//! which other diagrams were in the batch. Freeze the specs returned by
//! `fit` to render later diagrams on the same grid.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::RasterError;
use crate::topology::PersistenceDiagram;

/// Image resolution in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelResolution {
    /// Birth bins (columns)
    pub width: usize,
    /// Persistence bins (rows)
    pub height: usize,
}

impl PixelResolution {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn square(side: usize) -> Self {
        Self::new(side, side)
    }

    /// ndarray shape of a rendered image: (rows, cols) = (height, width)
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn validate(&self) -> Result<(), RasterError> {
        if self.width == 0 || self.height == 0 {
            return Err(RasterError::InvalidPixels {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl From<(usize, usize)> for PixelResolution {
    fn from((width, height): (usize, usize)) -> Self {
        Self::new(width, height)
    }
}

/// Raster range fitted over a batch, in birth–persistence coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterSpecs {
    /// Smallest birth or persistence (never above 0)
    pub min_bd: f64,
    /// Largest birth or persistence (never below 0)
    pub max_bd: f64,
}

impl RasterSpecs {
    pub fn new(min_bd: f64, max_bd: f64) -> Self {
        Self { min_bd, max_bd }
    }

    /// Range usable for rendering: finite and with a positive upper bound.
    pub fn validate(&self) -> Result<(), RasterError> {
        if !self.min_bd.is_finite() || !self.max_bd.is_finite() || self.max_bd <= 0.0 {
            return Err(RasterError::DegenerateRange {
                min: self.min_bd,
                max: self.max_bd,
            });
        }
        Ok(())
    }
}

/// Renders persistence diagrams as images.
pub trait Rasterizer {
    fn pixels(&self) -> PixelResolution;

    /// Fit the raster range jointly over a batch.
    fn fit(&self, diagrams: &[PersistenceDiagram]) -> Result<RasterSpecs, RasterError>;

    /// Render one diagram on a fitted range.
    fn transform(
        &self,
        diagram: &PersistenceDiagram,
        specs: &RasterSpecs,
    ) -> Result<Array2<f64>, RasterError>;

    /// Render a batch on a fixed range; errors carry the batch index.
    fn transform_batch(
        &self,
        diagrams: &[PersistenceDiagram],
        specs: &RasterSpecs,
    ) -> Result<Vec<Array2<f64>>, RasterError> {
        diagrams
            .iter()
            .enumerate()
            .map(|(index, d)| self.transform(d, specs).map_err(|e| e.at_index(index)))
            .collect()
    }

    fn fit_transform(
        &self,
        diagrams: &[PersistenceDiagram],
    ) -> Result<Vec<Array2<f64>>, RasterError> {
        let specs = self.fit(diagrams)?;
        self.transform_batch(diagrams, &specs)
    }
}

impl RasterError {
    /// Re-target a per-diagram error at its position in a batch.
    pub(crate) fn at_index(self, index: usize) -> Self {
        match self {
            RasterError::EmptyDiagram { .. } => RasterError::EmptyDiagram { index },
            RasterError::NonFinitePair { .. } => RasterError::NonFinitePair { index },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_shape_is_rows_by_cols() {
        let px = PixelResolution::from((30, 20));
        assert_eq!(px.shape(), (20, 30));
        assert!(px.validate().is_ok());
        assert_eq!(
            PixelResolution::new(0, 4).validate(),
            Err(RasterError::InvalidPixels { width: 0, height: 4 })
        );
    }

    #[test]
    fn test_specs_validation() {
        assert!(RasterSpecs::new(0.0, 3.0).validate().is_ok());
        assert!(RasterSpecs::new(-2.0, 3.0).validate().is_ok());
        assert!(RasterSpecs::new(0.0, 0.0).validate().is_err());
        assert!(RasterSpecs::new(f64::NEG_INFINITY, 1.0).validate().is_err());
    }

    #[test]
    fn test_error_index_rewrite() {
        let e = RasterError::EmptyDiagram { index: 0 }.at_index(4);
        assert_eq!(e, RasterError::EmptyDiagram { index: 4 });
        let e = RasterError::InvalidSpread(0.0).at_index(4);
        assert_eq!(e, RasterError::InvalidSpread(0.0));
    }
}
