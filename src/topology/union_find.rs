//! Elder-Rule Persistence via Union-Find
//!
//! Edges are swept in increasing filtration value. Each edge joining two
//! distinct components kills the younger one (later birth, ties broken
//! by the larger vertex index) at the edge value:
//!
//!   (birth(younger), value(edge))
//!
//! Merges are recorded even when birth == death, so a connected graph on
//! N vertices yields N-1 finite pairs plus one essential pair.

use crate::error::HomologyError;
use crate::filtration::FiltrationMatrix;

use super::backend::{filtered_graph, HomologyBackend, HomologyParams};
use super::{PersistenceDiagram, PersistencePair};

/// Fast dimension-0 backend: O(E log E) for the sort, near-linear sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElderRuleHomology;

impl ElderRuleHomology {
    pub fn new() -> Self {
        Self
    }
}

/// Disjoint sets remembering the oldest vertex of every component
struct Components {
    parent: Vec<usize>,
    rank: Vec<usize>,
    /// Oldest vertex of the component rooted here
    oldest: Vec<usize>,
}

impl Components {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            oldest: (0..n).collect(),
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        while self.parent[i] != root {
            let next = self.parent[i];
            self.parent[i] = root;
            i = next;
        }
        root
    }

    /// Union by rank; the merged root keeps `elder` as its oldest vertex.
    fn union(&mut self, ra: usize, rb: usize, elder: usize) {
        let root = if self.rank[ra] < self.rank[rb] {
            self.parent[ra] = rb;
            rb
        } else {
            self.parent[rb] = ra;
            if self.rank[ra] == self.rank[rb] {
                self.rank[ra] += 1;
            }
            ra
        };
        self.oldest[root] = elder;
    }
}

/// Is vertex `a` older than vertex `b`?
fn is_older(births: &[f64], a: usize, b: usize) -> bool {
    births[a].total_cmp(&births[b]).then(a.cmp(&b)).is_lt()
}

impl HomologyBackend for ElderRuleHomology {
    fn diagram(
        &self,
        matrix: &FiltrationMatrix,
        params: &HomologyParams,
    ) -> Result<PersistenceDiagram, HomologyError> {
        let (births, edges) = filtered_graph(matrix, params)?;
        let n = births.len();

        let mut components = Components::new(n);
        let mut diagram = PersistenceDiagram::new();

        for edge in edges {
            let ru = components.find(edge.u);
            let rv = components.find(edge.v);
            if ru == rv {
                continue;
            }

            let (ou, ov) = (components.oldest[ru], components.oldest[rv]);
            let (elder, younger) = if is_older(&births, ou, ov) { (ou, ov) } else { (ov, ou) };

            diagram.push(PersistencePair::new(births[younger], edge.value));
            components.union(ru, rv, elder);
        }

        // Surviving components, oldest last
        let roots: Vec<usize> = (0..n).filter(|&i| components.find(i) == i).collect();
        let mut survivors: Vec<usize> = roots.iter().map(|&root| components.oldest[root]).collect();
        survivors.sort_by(|&a, &b| births[b].total_cmp(&births[a]).then(b.cmp(&a)));
        for vertex in survivors {
            diagram.push(PersistencePair::new(births[vertex], f64::INFINITY));
        }

        Ok(diagram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtration::try_filtration;

    fn dgm(heights: &[f64], threshold: f64) -> PersistenceDiagram {
        let m = try_filtration(heights).unwrap();
        ElderRuleHomology::new()
            .diagram(&m, &HomologyParams::dim0(threshold))
            .unwrap()
    }

    #[test]
    fn test_reference_profile_pairs() {
        let pd = dgm(&[11.0, 14.0, 9.0, 7.0, 9.0, 7.0, 8.0, 10.0, 9.0], 20.0);

        assert_eq!(pd.len(), 9);
        assert_eq!(pd.essential_count(), 1);
        let last = pd.last().unwrap();
        assert!(last.is_essential());
        assert_eq!(last.birth, 7.0);

        // Non-trivial components: valley at 7 (index 5) dies at 9,
        // valley at 9 (index 8) dies at 10, valley at 11 dies at 14.
        let mut lives: Vec<(f64, f64)> = pd
            .finite()
            .filter(|p| p.persistence() > 0.0)
            .map(|p| (p.birth, p.death))
            .collect();
        lives.sort_by(|a, b| a.0.total_cmp(&b.0));
        assert_eq!(lives, vec![(7.0, 9.0), (9.0, 10.0), (11.0, 14.0)]);
    }

    #[test]
    fn test_two_samples() {
        let pd = dgm(&[5.0, 3.0], 20.0);
        assert_eq!(pd.pairs, vec![
            PersistencePair::new(5.0, 5.0),
            PersistencePair::new(3.0, f64::INFINITY),
        ]);
    }

    #[test]
    fn test_deaths_are_non_decreasing() {
        let pd = dgm(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0], 100.0);
        let deaths: Vec<f64> = pd.finite().map(|p| p.death).collect();
        assert!(deaths.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_threshold_splits_components() {
        // The 5.0 peak edges (5.0) exceed the threshold: three components.
        let pd = dgm(&[1.0, 5.0, 2.0], 4.0);
        assert_eq!(pd.len(), 3);
        assert_eq!(pd.essential_count(), 3);
        // Oldest survivor comes last
        assert_eq!(pd.last().unwrap().birth, 1.0);
    }

    #[test]
    fn test_survivors_youngest_first() {
        // Every edge exceeds the threshold: each vertex is its own class,
        // listed from the youngest birth to the oldest.
        let pd = dgm(&[3.0, 9.0, 1.0, 9.0, 2.0], 5.0);
        let births: Vec<f64> = pd.essential().map(|p| p.birth).collect();
        assert_eq!(births, vec![9.0, 9.0, 3.0, 2.0, 1.0]);
        assert_eq!(pd.essential_count(), pd.len());
    }

    #[test]
    fn test_equal_births_tie_break() {
        let pd = dgm(&[2.0, 4.0, 2.0], 10.0);
        let finite: Vec<_> = pd.finite().copied().collect();
        assert_eq!(finite.len(), 2);
        assert!(finite.contains(&PersistencePair::new(2.0, 4.0)));
        assert_eq!(pd.last().unwrap().birth, 2.0);
    }
}
