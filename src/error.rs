//! Error types for every stage of the profile → image pipeline.
//!
//! Each stage owns a small enum; [`Error`] wraps them and records which
//! profile of a batch failed. There is no partial-result mode: the first
//! failing profile aborts the whole call.

use thiserror::Error;

use crate::image::PixelResolution;

/// Rejections raised while validating a raw surface profile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// A path graph needs at least one edge.
    #[error("profile must contain at least 2 samples, got {len}")]
    TooShort { len: usize },
    /// NaN or infinite height sample.
    #[error("profile sample {index} is not finite ({value})")]
    NonFinite { index: usize, value: f64 },
}

/// Failures of a 0-dimensional homology backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HomologyError {
    #[error("filtration matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("filtration matrix has no vertices")]
    Empty,
    #[error("filtration entry ({row}, {col}) is not finite")]
    NonFiniteEntry { row: usize, col: usize },
    #[error("only dimension 0 is supported, requested max dimension {0}")]
    UnsupportedDimension(usize),
    #[error("entry ({row}, {col}) lies outside a {n}x{n} matrix")]
    IndexOutOfBounds { row: usize, col: usize, n: usize },
    /// Raised when a backend is called directly with bad `HomologyParams`.
    /// `ImagerConfig` validation rejects the same values first, so the
    /// pipeline reports them as `ConfigError::InvalidThreshold`.
    #[error("threshold must be positive, got {0}")]
    InvalidThreshold(f64),
}

/// Rejections raised by a persistence-image rasterizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RasterError {
    #[error("diagram {index} has no finite pairs to rasterize")]
    EmptyDiagram { index: usize },
    #[error("diagram {index} contains a non-finite pair")]
    NonFinitePair { index: usize },
    #[error("degenerate raster range [{min}, {max}]")]
    DegenerateRange { min: f64, max: f64 },
    #[error("kernel spread must be positive and finite, got {0}")]
    InvalidSpread(f64),
    #[error("pixel resolution must be at least 1x1, got {width}x{height}")]
    InvalidPixels { width: usize, height: usize },
}

/// Invalid construction-time parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("threshold must be positive, got {0}")]
    InvalidThreshold(f64),
    #[error("pixel resolution must be at least 1x1, got {width}x{height}")]
    InvalidPixels { width: usize, height: usize },
    #[error("rasterizer renders {rasterizer:?} but {configured:?} was configured")]
    PixelMismatch {
        configured: PixelResolution,
        rasterizer: PixelResolution,
    },
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input in profile {index}: {source}")]
    InvalidInput {
        index: usize,
        #[source]
        source: ProfileError,
    },
    #[error("homology computation failed for profile {index}: {source}")]
    Computation {
        index: usize,
        #[source]
        source: HomologyError,
    },
    #[error("rasterization failed: {0}")]
    Rasterization(#[from] RasterError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
