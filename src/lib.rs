//! # TDA Surface Images
//!
//! Persistence images of one-dimensional surface profiles: a compact,
//! comparable descriptor of the peak/valley structure of a roughness
//! trace, ready for classification or visualization.
//!
//! ## Pipeline
//!
//! 1. **Sublevel-set filtration**: the profile is read as a function on a
//!    path graph. Vertex i is born at height h(i); the edge between
//!    neighbours appears at max(h(i), h(i+1)). The result is a sparse
//!    N×N "distance" matrix with 2N-1 entries.
//!
//! 2. **0-dimensional persistence**: sweeping the level upwards, every
//!    local minimum starts a component and every merge kills the younger
//!    one. Each valley becomes a pair (birth, death); the global minimum
//!    never dies and is dropped.
//!
//! 3. **Persistence image**: pairs are mapped to (birth, persistence),
//!    smoothed with a Gaussian, weighted by persistence and integrated
//!    over a fixed pixel grid fitted jointly over the batch.
//!
//! ## Example
//!
//! ```no_run
//! use tda_surface_images::SurfaceProfileImager;
//!
//! let imager = SurfaceProfileImager::new(20.0, (20, 20)).unwrap();
//! let profile = [11.0, 14.0, 9.0, 7.0, 9.0, 7.0, 8.0, 10.0, 9.0];
//! let images = imager.fit_transform(&[profile]).unwrap();
//! assert_eq!(images[0].dim(), (20, 20));
//! ```
//!
//! ## References
//!
//! - Frahi et al., "Tape surfaces characterization with persistence
//!   images", AIMS Materials Science 7(4), 364 (2020)
//! - Adams et al., "Persistence Images: A Stable Vector Representation
//!   of Persistent Homology", JMLR 18 (2017)
//! - Edelsbrunner & Harer, "Computational Topology" (2010)

pub mod error;
pub mod filtration;
pub mod image;
pub mod pipeline;
pub mod profile;
pub mod synthetic;
pub mod topology;

pub use error::{ConfigError, Error, HomologyError, ProfileError, RasterError, Result};

// Re-exports from filtration
pub use filtration::{filtration, try_filtration, FiltrationMatrix};

// Re-exports from topology
pub use topology::{
    ElderRuleHomology,
    HomologyBackend,
    HomologyParams,
    PersistenceDiagram,
    PersistencePair,
    StandardReduction,
};

// Re-exports from image
pub use image::{PersistenceImager, PixelResolution, RasterSpecs, Rasterizer};

// Re-exports from pipeline
pub use pipeline::{ImagerConfig, SurfaceProfileImager};

pub use profile::Profile;
pub use synthetic::{rough_profile, RoughSurface};
