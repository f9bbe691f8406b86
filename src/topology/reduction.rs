//! Dimension-0 Persistence via Boundary Matrix Reduction
//!
//! The standard algorithm restricted to vertices and edges:
//!
//! 1. Order simplices by (birth, dimension, vertices)
//! 2. Reduce each edge column against earlier pivots over Z/2
//! 3. A column whose lowest entry is vertex v kills the class born at v
//!
//! Unreduced vertices are essential. Edge columns that reduce to zero
//! would open 1-cycles; they are ignored since only dimension 0 is
//! requested. Slower than the union-find sweep but independent of it,
//! which makes it a useful cross-check.
//!
//! ## Reference
//!
//! Edelsbrunner, Letscher, Zomorodian (2002). "Topological Persistence
//! and Simplification". Discrete & Computational Geometry.

use std::collections::{BTreeSet, HashMap};

use crate::error::HomologyError;
use crate::filtration::FiltrationMatrix;

use super::backend::{filtered_graph, HomologyBackend, HomologyParams};
use super::{PersistenceDiagram, PersistencePair};

/// Boundary-matrix backend
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardReduction;

impl StandardReduction {
    pub fn new() -> Self {
        Self
    }
}

/// A vertex or edge with its filtration value
#[derive(Debug, Clone)]
struct FilteredSimplex {
    /// Vertex indices (sorted)
    vertices: Vec<usize>,
    birth: f64,
}

impl FilteredSimplex {
    fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }
}

/// Sparse Z/2 column of the boundary matrix
#[derive(Debug, Clone, Default)]
struct SparseColumn {
    rows: BTreeSet<usize>,
}

impl SparseColumn {
    fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut column = Self::default();
        for row in indices {
            column.toggle(row);
        }
        column
    }

    fn toggle(&mut self, row: usize) {
        if !self.rows.remove(&row) {
            self.rows.insert(row);
        }
    }

    /// Lowest (maximum) non-zero row
    fn low(&self) -> Option<usize> {
        self.rows.iter().next_back().copied()
    }

    /// Column addition in Z/2
    fn add_assign(&mut self, other: &SparseColumn) {
        for &row in &other.rows {
            self.toggle(row);
        }
    }
}

impl HomologyBackend for StandardReduction {
    fn diagram(
        &self,
        matrix: &FiltrationMatrix,
        params: &HomologyParams,
    ) -> Result<PersistenceDiagram, HomologyError> {
        let (births, edges) = filtered_graph(matrix, params)?;

        let mut simplices: Vec<FilteredSimplex> = births
            .iter()
            .enumerate()
            .map(|(i, &birth)| FilteredSimplex { vertices: vec![i], birth })
            .collect();
        simplices.extend(edges.iter().map(|e| FilteredSimplex {
            vertices: vec![e.u, e.v],
            birth: e.value,
        }));

        simplices.sort_by(|a, b| {
            a.birth
                .total_cmp(&b.birth)
                .then(a.dimension().cmp(&b.dimension()))
                .then(a.vertices.cmp(&b.vertices))
        });

        // vertex -> position in the filtration order
        let mut vertex_position = vec![0usize; births.len()];
        for (idx, s) in simplices.iter().enumerate() {
            if s.dimension() == 0 {
                vertex_position[s.vertices[0]] = idx;
            }
        }

        let mut columns: Vec<SparseColumn> = Vec::with_capacity(simplices.len());
        let mut low_to_col: HashMap<usize, usize> = HashMap::new();
        let mut diagram = PersistenceDiagram::new();

        for (col_idx, simplex) in simplices.iter().enumerate() {
            let mut boundary = if simplex.dimension() == 1 {
                SparseColumn::from_indices(simplex.vertices.iter().map(|&v| vertex_position[v]))
            } else {
                SparseColumn::default()
            };

            while let Some(low_idx) = boundary.low() {
                match low_to_col.get(&low_idx) {
                    Some(&pivot_col) => boundary.add_assign(&columns[pivot_col]),
                    None => break,
                }
            }

            if let Some(low_idx) = boundary.low() {
                low_to_col.insert(low_idx, col_idx);
                diagram.push(PersistencePair::new(simplices[low_idx].birth, simplex.birth));
            }
            columns.push(boundary);
        }

        // Essential classes: unpaired vertices, youngest first
        let mut essential: Vec<usize> = (0..simplices.len())
            .filter(|idx| simplices[*idx].dimension() == 0 && !low_to_col.contains_key(idx))
            .collect();
        essential.reverse();
        for idx in essential {
            diagram.push(PersistencePair::new(simplices[idx].birth, f64::INFINITY));
        }

        Ok(diagram)
    }
}
