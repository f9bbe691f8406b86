//! Homology Backend Interface
//!
//! A backend turns a filtration matrix into a dimension-0 persistence
//! diagram. The matrix is read the way ripser reads a sparse distance
//! matrix:
//!
//! - the diagonal entry (i, i) is the birth of vertex i (0 when absent)
//! - an off-diagonal entry (i, j) is an edge appearing at its value
//! - absent entries never connect
//! - edges above the threshold are dropped
//!
//! An edge never appears before both of its endpoints, so its value is
//! raised to the larger endpoint birth when necessary.

use serde::{Deserialize, Serialize};

use crate::error::HomologyError;
use crate::filtration::FiltrationMatrix;

use super::PersistenceDiagram;

/// Parameters forwarded to the homology computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomologyParams {
    /// Highest homological dimension to compute (only 0 is supported)
    pub max_dimension: usize,
    /// Edges with value above this never enter the filtration
    pub threshold: f64,
}

impl HomologyParams {
    /// Dimension-0 parameters with the given threshold
    pub fn dim0(threshold: f64) -> Self {
        Self {
            max_dimension: 0,
            threshold,
        }
    }

    pub fn validate(&self) -> Result<(), HomologyError> {
        if self.max_dimension > 0 {
            return Err(HomologyError::UnsupportedDimension(self.max_dimension));
        }
        if self.threshold.is_nan() || self.threshold <= 0.0 {
            return Err(HomologyError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

impl Default for HomologyParams {
    fn default() -> Self {
        Self::dim0(f64::INFINITY)
    }
}

/// Computes 0-dimensional persistence of a filtration matrix.
pub trait HomologyBackend {
    /// Finite pairs in death order, then one essential pair per surviving
    /// component.
    fn diagram(
        &self,
        matrix: &FiltrationMatrix,
        params: &HomologyParams,
    ) -> Result<PersistenceDiagram, HomologyError>;
}

impl<T: HomologyBackend + ?Sized> HomologyBackend for &T {
    fn diagram(
        &self,
        matrix: &FiltrationMatrix,
        params: &HomologyParams,
    ) -> Result<PersistenceDiagram, HomologyError> {
        (**self).diagram(matrix, params)
    }
}

/// An edge of the filtered graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FilteredEdge {
    pub u: usize,
    pub v: usize,
    pub value: f64,
}

/// Vertex births plus the edges that survive the threshold, sorted by
/// (value, u, v).
pub(crate) fn filtered_graph(
    matrix: &FiltrationMatrix,
    params: &HomologyParams,
) -> Result<(Vec<f64>, Vec<FilteredEdge>), HomologyError> {
    params.validate()?;
    if matrix.dim() == 0 {
        return Err(HomologyError::Empty);
    }

    let births = matrix.diagonal();
    if let Some(i) = births.iter().position(|b| !b.is_finite()) {
        return Err(HomologyError::NonFiniteEntry { row: i, col: i });
    }

    let mut edges = Vec::new();
    for (u, v, w) in matrix.edges() {
        if !w.is_finite() {
            return Err(HomologyError::NonFiniteEntry { row: u, col: v });
        }
        let value = w.max(births[u]).max(births[v]);
        if value <= params.threshold {
            edges.push(FilteredEdge { u, v, value });
        }
    }

    edges.sort_by(|a, b| {
        a.value
            .total_cmp(&b.value)
            .then(a.u.cmp(&b.u))
            .then(a.v.cmp(&b.v))
    });

    Ok((births, edges))
}
