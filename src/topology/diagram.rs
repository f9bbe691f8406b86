//! Persistence Diagrams of 0-Dimensional Homology
//!
//! A pair (b, d) records a connected component born at filtration value b
//! that merges into an older component at d. Components that never merge
//! are essential and carry d = +∞.
//!
//! ## Ordering
//!
//! Backends emit finite pairs in the order their deaths are processed and
//! append essential pairs last, so the final pair of a connected
//! filtration is its single never-dying component.

use serde::{Deserialize, Serialize};

/// A persistence pair [birth, death)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistencePair {
    pub birth: f64,
    pub death: f64,
}

impl PersistencePair {
    pub fn new(birth: f64, death: f64) -> Self {
        Self { birth, death }
    }

    /// Lifetime of the component
    pub fn persistence(&self) -> f64 {
        if self.death.is_infinite() {
            f64::INFINITY
        } else {
            self.death - self.birth
        }
    }

    /// Does this component never die?
    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }
}

/// Dimension-0 persistence diagram
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistenceDiagram {
    pub pairs: Vec<PersistencePair>,
}

impl PersistenceDiagram {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn from_pairs(pairs: Vec<PersistencePair>) -> Self {
        Self { pairs }
    }

    pub fn push(&mut self, pair: PersistencePair) {
        self.pairs.push(pair);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn last(&self) -> Option<&PersistencePair> {
        self.pairs.last()
    }

    pub fn finite(&self) -> impl Iterator<Item = &PersistencePair> + '_ {
        self.pairs.iter().filter(|p| !p.is_essential())
    }

    pub fn essential(&self) -> impl Iterator<Item = &PersistencePair> + '_ {
        self.pairs.iter().filter(|p| p.is_essential())
    }

    /// Number of never-dying components
    pub fn essential_count(&self) -> usize {
        self.essential().count()
    }

    /// Copy of the diagram with all essential pairs removed.
    pub fn without_essential(&self) -> Self {
        Self {
            pairs: self.finite().copied().collect(),
        }
    }

    /// Total persistence of finite pairs
    pub fn total_persistence(&self) -> f64 {
        self.finite().map(|p| p.persistence()).sum()
    }

    /// Maximum persistence of finite pairs (0 when there are none)
    pub fn max_persistence(&self) -> f64 {
        self.finite().map(|p| p.persistence()).fold(0.0, f64::max)
    }

    /// Pairs sorted by (birth, death); handy for comparing backends.
    pub fn sorted_pairs(&self) -> Vec<PersistencePair> {
        let mut pairs = self.pairs.clone();
        pairs.sort_by(|a, b| a.birth.total_cmp(&b.birth).then(a.death.total_cmp(&b.death)));
        pairs
    }
}

impl FromIterator<PersistencePair> for PersistenceDiagram {
    fn from_iter<I: IntoIterator<Item = PersistencePair>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}
