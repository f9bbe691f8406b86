//! Sublevel-Set Filtration of a Profile on a Path Graph
//!
//! Sample i becomes vertex i, born at its own height h(i). Neighbouring
//! samples are joined by an edge that appears at max(h(i), h(i+1)), the
//! first level at which both endpoints are below the sweep. Read as a
//! "distance matrix", the diagonal carries vertex births and the
//! super-diagonal carries edge values:
//!
//! ```text
//!   ┌ h0  max(h0,h1)                      ┐
//!   │     h1          max(h1,h2)          │
//!   │                 h2          ...     │
//!   └                             h(N-1)  ┘
//! ```
//!
//! Exactly 2N-1 entries are stored. Storage is compressed sparse row, so
//! long profiles never materialise the N×N dense matrix.

use ndarray::Array2;

use crate::error::{Error, HomologyError};
use crate::profile::Profile;

/// Sparse N×N filtration matrix in CSR form.
///
/// Stored entries define the filtration; absent entries are "no edge".
/// A stored value of 0.0 is still an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FiltrationMatrix {
    n: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

impl FiltrationMatrix {
    /// Build from (row, col, value) triplets.
    ///
    /// Duplicate coordinates keep the smallest value, which is how a
    /// distance reading resolves them.
    pub fn from_triplets(
        n: usize,
        triplets: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Result<Self, HomologyError> {
        let mut entries: Vec<(usize, usize, f64)> = Vec::new();
        for (row, col, value) in triplets {
            if row >= n || col >= n {
                return Err(HomologyError::IndexOutOfBounds { row, col, n });
            }
            if !value.is_finite() {
                return Err(HomologyError::NonFiniteEntry { row, col });
            }
            entries.push((row, col, value));
        }

        entries.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then(a.1.cmp(&b.1))
                .then(a.2.total_cmp(&b.2))
        });
        entries.dedup_by(|later, kept| later.0 == kept.0 && later.1 == kept.1);

        let mut indptr = vec![0usize; n + 1];
        for &(row, _, _) in &entries {
            indptr[row + 1] += 1;
        }
        for i in 0..n {
            indptr[i + 1] += indptr[i];
        }

        Ok(Self {
            n,
            indptr,
            indices: entries.iter().map(|e| e.1).collect(),
            data: entries.iter().map(|e| e.2).collect(),
        })
    }

    /// Build from a dense square matrix.
    ///
    /// The diagonal is always stored. Off the diagonal, zero means "no
    /// edge"; each pair is read from the upper triangle, falling back to
    /// the lower one.
    pub fn from_dense(dense: &Array2<f64>) -> Result<Self, HomologyError> {
        let (rows, cols) = dense.dim();
        if rows != cols {
            return Err(HomologyError::NotSquare { rows, cols });
        }

        let mut triplets = Vec::new();
        for i in 0..rows {
            triplets.push((i, i, dense[[i, i]]));
            for j in i + 1..rows {
                let upper = dense[[i, j]];
                let value = if upper != 0.0 { upper } else { dense[[j, i]] };
                if value != 0.0 {
                    triplets.push((i, j, value));
                }
            }
        }
        Self::from_triplets(rows, triplets)
    }

    /// Matrix dimension N
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Stored value at (row, col), if any
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let (cols, values) = self.row(row)?;
        cols.binary_search(&col).ok().map(|k| values[k])
    }

    /// Column indices and values stored in `row`, or `None` past the last row.
    pub fn row(&self, row: usize) -> Option<(&[usize], &[f64])> {
        (row < self.n).then(|| self.stored(row))
    }

    fn stored(&self, row: usize) -> (&[usize], &[f64]) {
        let range = self.indptr[row]..self.indptr[row + 1];
        (&self.indices[range.clone()], &self.data[range])
    }

    /// Vertex births; a missing diagonal entry reads as 0.
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.n).map(|i| self.get(i, i).unwrap_or(0.0)).collect()
    }

    /// Off-diagonal entries as (min index, max index, value).
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.n).flat_map(move |i| {
            let (cols, values) = self.stored(i);
            cols.iter()
                .zip(values)
                .filter(move |(j, _)| **j != i)
                .map(move |(&j, &v)| (i.min(j), i.max(j), v))
        })
    }

    /// CSR arrays (indptr, indices, data).
    pub fn raw_parts(&self) -> (&[usize], &[usize], &[f64]) {
        (&self.indptr, &self.indices, &self.data)
    }

    /// Dense copy with stored entries in place and zeros elsewhere.
    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::<f64>::zeros((self.n, self.n));
        for i in 0..self.n {
            let (cols, values) = self.stored(i);
            for (&j, &v) in cols.iter().zip(values) {
                dense[[i, j]] = v;
            }
        }
        dense
    }
}

/// Sublevel-set filtration of a validated profile.
pub fn filtration(profile: &Profile) -> FiltrationMatrix {
    let h = profile.as_slice();
    let n = h.len();

    let mut indptr = Vec::with_capacity(n + 1);
    let mut indices = Vec::with_capacity(2 * n - 1);
    let mut data = Vec::with_capacity(2 * n - 1);

    indptr.push(0);
    for i in 0..n {
        indices.push(i);
        data.push(h[i]);
        if i + 1 < n {
            indices.push(i + 1);
            data.push(h[i].max(h[i + 1]));
        }
        indptr.push(indices.len());
    }

    FiltrationMatrix { n, indptr, indices, data }
}

/// Validate raw heights and build their filtration.
pub fn try_filtration(heights: &[f64]) -> Result<FiltrationMatrix, Error> {
    let profile = Profile::from_slice(heights)
        .map_err(|source| Error::InvalidInput { index: 0, source })?;
    Ok(filtration(&profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProfileError;
    use ndarray::array;

    #[test]
    fn test_reference_profile() {
        let heights = [11.0, 14.0, 9.0, 7.0, 9.0, 7.0, 8.0, 10.0, 9.0];
        let m = try_filtration(&heights).unwrap();

        assert_eq!(m.dim(), 9);
        assert_eq!(m.nnz(), 17);
        for i in 0..9 {
            assert_eq!(m.get(i, i), Some(heights[i]));
        }
        for i in 0..8 {
            assert_eq!(m.get(i, i + 1), Some(heights[i].max(heights[i + 1])));
            assert_eq!(m.get(i + 1, i), None);
        }
        assert_eq!(m.get(0, 2), None);
    }

    #[test]
    fn test_two_samples() {
        let m = try_filtration(&[5.0, 3.0]).unwrap();
        assert_eq!(m.to_dense(), array![[5.0, 5.0], [0.0, 3.0]]);
        assert_eq!(m.diagonal(), vec![5.0, 3.0]);
        assert_eq!(m.edges().collect::<Vec<_>>(), vec![(0, 1, 5.0)]);
    }

    #[test]
    fn test_zero_heights_are_stored() {
        let m = try_filtration(&[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(m.nnz(), 5);
        assert_eq!(m.get(1, 2), Some(0.0));
    }

    #[test]
    fn test_short_profile_rejected() {
        let err = try_filtration(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput { index: 0, source: ProfileError::TooShort { len: 1 } }
        ));
    }

    #[test]
    fn test_csr_layout() {
        let m = try_filtration(&[1.0, 3.0, 2.0]).unwrap();
        let (indptr, indices, data) = m.raw_parts();
        assert_eq!(indptr, &[0, 2, 4, 5]);
        assert_eq!(indices, &[0, 1, 1, 2, 2]);
        assert_eq!(data, &[1.0, 3.0, 3.0, 3.0, 2.0]);
    }

    #[test]
    fn test_from_dense_matches_builder() {
        let built = try_filtration(&[2.0, 1.0, 4.0]).unwrap();
        let parsed = FiltrationMatrix::from_dense(&built.to_dense()).unwrap();
        assert_eq!(parsed, built);
    }

    #[test]
    fn test_from_dense_reads_lower_triangle() {
        let dense = array![[1.0, 0.0], [2.0, 0.5]];
        let m = FiltrationMatrix::from_dense(&dense).unwrap();
        assert_eq!(m.get(0, 1), Some(2.0));
        assert_eq!(m.nnz(), 3);
    }

    #[test]
    fn test_from_dense_not_square() {
        let dense = Array2::<f64>::zeros((2, 3));
        assert_eq!(
            FiltrationMatrix::from_dense(&dense).unwrap_err(),
            HomologyError::NotSquare { rows: 2, cols: 3 }
        );
    }

    #[test]
    fn test_triplets_keep_minimum_duplicate() {
        let m = FiltrationMatrix::from_triplets(2, vec![(0, 1, 4.0), (0, 1, 2.0), (1, 1, 1.0)])
            .unwrap();
        assert_eq!(m.get(0, 1), Some(2.0));
        assert_eq!(m.nnz(), 2);
        assert_eq!(m.diagonal(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_row_access() {
        let m = try_filtration(&[4.0, 2.0, 6.0]).unwrap();
        let (cols, values) = m.row(1).unwrap();
        assert_eq!(cols, &[1, 2]);
        assert_eq!(values, &[2.0, 6.0]);
        assert!(m.row(3).is_none());
        assert_eq!(m.get(3, 0), None);
    }

    #[test]
    fn test_triplets_out_of_bounds() {
        let err = FiltrationMatrix::from_triplets(2, vec![(0, 2, 1.0)]).unwrap_err();
        assert_eq!(err, HomologyError::IndexOutOfBounds { row: 0, col: 2, n: 2 });
    }
}
