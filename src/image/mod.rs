//! Image Module: Persistence Diagram Rasterization
//!
//! Turns batches of dimension-0 diagrams into fixed-size `Array2<f64>`
//! images usable as feature vectors.
//!
//! - `rasterizer.rs`: the fit-then-transform `Rasterizer` interface,
//!   pixel resolution and fitted raster range
//! - `persistence_image.rs`: Gaussian persistence images with linear
//!   persistence weighting
//! - `kernel.rs`: normal CDF bin masses

mod kernel;
mod persistence_image;
mod rasterizer;

pub use persistence_image::PersistenceImager;
pub use rasterizer::{PixelResolution, RasterSpecs, Rasterizer};
