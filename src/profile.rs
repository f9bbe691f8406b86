//! Surface Profiles: Validated 1D Height Signals
//!
//! A profile is an ordered sequence of surface heights sampled along a
//! line (e.g. a tape roughness trace). Units are arbitrary. Every sample
//! becomes a vertex of a path graph, so at least two finite samples are
//! required.

use ndarray::{Array1, ArrayView1};

use crate::error::ProfileError;

/// An immutable, validated surface profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    heights: Array1<f64>,
}

impl Profile {
    /// Validate and wrap a height array.
    pub fn new(heights: Array1<f64>) -> Result<Self, ProfileError> {
        if heights.len() < 2 {
            return Err(ProfileError::TooShort { len: heights.len() });
        }
        if let Some((index, &value)) = heights.iter().enumerate().find(|(_, h)| !h.is_finite()) {
            return Err(ProfileError::NonFinite { index, value });
        }
        Ok(Self { heights })
    }

    pub fn from_slice(heights: &[f64]) -> Result<Self, ProfileError> {
        Self::new(Array1::from(heights.to_vec()))
    }

    /// Number of samples N
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn heights(&self) -> ArrayView1<'_, f64> {
        self.heights.view()
    }

    pub fn as_slice(&self) -> &[f64] {
        // Built from owned contiguous storage, never sliced with a stride.
        self.heights.as_slice().unwrap_or(&[])
    }

    pub fn into_inner(self) -> Array1<f64> {
        self.heights
    }

    /// Lowest sample (birth of the essential component).
    pub fn min(&self) -> f64 {
        self.heights.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.heights.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

impl TryFrom<Vec<f64>> for Profile {
    type Error = ProfileError;

    fn try_from(heights: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(Array1::from(heights))
    }
}

impl TryFrom<&[f64]> for Profile {
    type Error = ProfileError;

    fn try_from(heights: &[f64]) -> Result<Self, Self::Error> {
        Self::from_slice(heights)
    }
}

impl TryFrom<Array1<f64>> for Profile {
    type Error = ProfileError;

    fn try_from(heights: Array1<f64>) -> Result<Self, Self::Error> {
        Self::new(heights)
    }
}

impl TryFrom<ArrayView1<'_, f64>> for Profile {
    type Error = ProfileError;

    fn try_from(heights: ArrayView1<'_, f64>) -> Result<Self, Self::Error> {
        Self::new(heights.to_owned())
    }
}

impl AsRef<[f64]> for Profile {
    fn as_ref(&self) -> &[f64] {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_valid_profile() {
        let p = Profile::new(array![11.0, 14.0, 9.0]).unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.as_slice(), &[11.0, 14.0, 9.0]);
        assert_eq!(p.min(), 9.0);
        assert_eq!(p.max(), 14.0);
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            Profile::from_slice(&[1.0]).unwrap_err(),
            ProfileError::TooShort { len: 1 }
        );
        assert_eq!(
            Profile::from_slice(&[]).unwrap_err(),
            ProfileError::TooShort { len: 0 }
        );
    }

    #[test]
    fn test_non_finite_sample_reports_index() {
        let err = Profile::try_from(vec![1.0, 2.0, f64::NAN, 4.0]).unwrap_err();
        assert!(matches!(err, ProfileError::NonFinite { index: 2, .. }));

        let err = Profile::try_from(vec![f64::INFINITY, 2.0]).unwrap_err();
        assert!(matches!(err, ProfileError::NonFinite { index: 0, .. }));
    }

    #[test]
    fn test_from_strided_view() {
        let data = array![1.0, 100.0, 2.0, 100.0, 3.0];
        let view = data.slice(ndarray::s![..;2]);
        let p = Profile::try_from(view).unwrap();
        assert_eq!(p.as_slice(), &[1.0, 2.0, 3.0]);
    }
}
