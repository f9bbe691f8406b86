//! Topology Module: 0-Dimensional Persistent Homology
//!
//! Computes persistence diagrams of sublevel-set filtrations stored as
//! sparse "distance" matrices:
//! - Persistence pairs and diagrams
//! - The `HomologyBackend` interface and its parameters
//! - Two interchangeable backends
//!
//! ## Two Implementations
//!
//! - `union_find.rs`: elder-rule sweep over sorted edges. Default.
//!
//! - `reduction.rs`: standard boundary matrix reduction over Z/2.
//!   Same pairs, different algorithm.
//!
//! Both keep zero-persistence merges, so a connected filtration on N
//! vertices gives exactly N pairs, the last one essential.

mod backend;
mod diagram;
mod reduction;
mod union_find;

pub use backend::{HomologyBackend, HomologyParams};
pub use diagram::{PersistenceDiagram, PersistencePair};
pub use reduction::StandardReduction;
pub use union_find::ElderRuleHomology;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtration::try_filtration;
    use crate::synthetic::rough_profile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Components alive at level t, counted directly on the subgraph.
    fn components_at(heights: &[f64], t: f64) -> usize {
        let mut count = 0;
        let mut in_run = false;
        for &h in heights {
            if h <= t {
                if !in_run {
                    count += 1;
                }
                in_run = true;
            } else {
                in_run = false;
            }
        }
        count
    }

    #[test]
    fn test_backends_agree_on_random_profiles() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in [2usize, 3, 10, 57, 200] {
            let heights = rough_profile(&mut rng, len, 0.8, 2.0).unwrap();
            let m = try_filtration(&heights).unwrap();
            let params = HomologyParams::dim0(f64::INFINITY);

            let swept = ElderRuleHomology::new().diagram(&m, &params).unwrap();
            let reduced = StandardReduction::new().diagram(&m, &params).unwrap();

            assert_eq!(swept.len(), len);
            assert_eq!(reduced.len(), len);
            assert_eq!(swept.essential_count(), 1);
            assert_eq!(swept.sorted_pairs(), reduced.sorted_pairs());
        }
    }

    #[test]
    fn test_pairs_count_components_at_every_level() {
        let mut rng = StdRng::seed_from_u64(11);
        let heights = rough_profile(&mut rng, 64, 1.0, 0.0).unwrap();
        let m = try_filtration(&heights).unwrap();
        let pd = ElderRuleHomology::new()
            .diagram(&m, &HomologyParams::default())
            .unwrap();

        for &t in &heights {
            let alive = pd
                .pairs
                .iter()
                .filter(|p| p.birth <= t && t < p.death)
                .count();
            assert_eq!(alive, components_at(&heights, t), "level {t}");
        }
    }
}
