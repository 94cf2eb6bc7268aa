//! Clique injection into adjacency matrices.
//!
//! A clique is a set of nodes where each node is a neighbor of every other
//! node. Planting one rewrites the adjacency row of every member so that it
//! contains the whole clique.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::sample_distinct;
use crate::error::{AnomalyError, AnomalyResult};
use crate::sparse::{CsrMatrix, Scalar};

/// Conventional number of cliques per call.
pub const DEFAULT_NUM_CLIQUES: usize = 1;

/// Members of every planted clique, one sorted row per clique.
///
/// Logically a `[len, clique_size]` index array stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CliqueRecordParts")]
pub struct CliqueRecord {
    clique_size: usize,
    members: Vec<usize>,
}

/// Serialized form, checked on the way in.
#[derive(Deserialize)]
struct CliqueRecordParts {
    clique_size: usize,
    members: Vec<usize>,
}

impl TryFrom<CliqueRecordParts> for CliqueRecord {
    type Error = AnomalyError;

    fn try_from(parts: CliqueRecordParts) -> AnomalyResult<Self> {
        let CliqueRecordParts {
            clique_size,
            members,
        } = parts;
        if clique_size == 0 {
            if !members.is_empty() {
                return Err(AnomalyError::InvalidArgument(format!(
                    "clique record has clique_size 0 but {} members",
                    members.len()
                )));
            }
        } else {
            if members.len() % clique_size != 0 {
                return Err(AnomalyError::InvalidArgument(format!(
                    "{} members do not split into cliques of {}",
                    members.len(),
                    clique_size
                )));
            }
            if let Some(i) = members
                .chunks_exact(clique_size)
                .position(|c| c.windows(2).any(|w| w[0] >= w[1]))
            {
                return Err(AnomalyError::InvalidArgument(format!(
                    "clique {} members are not strictly ascending",
                    i
                )));
            }
        }
        Ok(Self {
            clique_size,
            members,
        })
    }
}

impl CliqueRecord {
    fn with_capacity(clique_size: usize, num_cliques: usize) -> Self {
        Self {
            clique_size,
            members: Vec::with_capacity(clique_size * num_cliques),
        }
    }

    fn push(&mut self, clique: &[usize]) {
        debug_assert_eq!(clique.len(), self.clique_size);
        self.members.extend_from_slice(clique);
    }

    /// Number of planted cliques.
    pub fn len(&self) -> usize {
        if self.clique_size == 0 {
            0
        } else {
            self.members.len() / self.clique_size
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clique_size(&self) -> usize {
        self.clique_size
    }

    /// `[len, clique_size]`.
    pub fn shape(&self) -> (usize, usize) {
        (self.len(), self.clique_size)
    }

    /// Members of clique `i`, ascending.
    pub fn get(&self, i: usize) -> Option<&[usize]> {
        if i >= self.len() {
            return None;
        }
        let start = i * self.clique_size;
        Some(&self.members[start..start + self.clique_size])
    }

    /// Iterate cliques in planting order.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.members.chunks_exact(self.clique_size.max(1))
    }
}

/// Plant `num_cliques` cliques of `clique_size` nodes into `adjacency`.
///
/// For each clique, `clique_size` distinct nodes are drawn uniformly without
/// replacement and sorted. Every member's row is then replaced by the union
/// of its existing neighbors and the clique. A member that had no self-loop
/// does not gain one; an existing self-loop is kept. All values in a
/// rewritten row are set to `T::one()`: weights on edges that were already
/// present in that row are discarded.
///
/// Returns the augmented matrix in CSR form and the record of planted
/// cliques. The input is not modified.
///
/// # Errors
///
/// Returns an InvalidArgument-class [`AnomalyError`] if `adjacency` is not
/// square, `clique_size` is zero, or `clique_size` exceeds the node count.
pub fn inject_cliques<T, R>(
    adjacency: &CsrMatrix<T>,
    clique_size: usize,
    num_cliques: usize,
    rng: &mut R,
) -> AnomalyResult<(CsrMatrix<T>, CliqueRecord)>
where
    T: Scalar,
    R: Rng + ?Sized,
{
    let (nrows, ncols) = adjacency.shape();
    if nrows != ncols {
        return Err(AnomalyError::InvalidArgument(format!(
            "adjacency must be square, got shape ({}, {})",
            nrows, ncols
        )));
    }
    if clique_size == 0 {
        return Err(AnomalyError::InvalidArgument(
            "clique_size must be positive".to_string(),
        ));
    }
    if clique_size > nrows {
        return Err(AnomalyError::SampleTooLarge {
            what: "clique members",
            requested: clique_size,
            available: nrows,
        });
    }

    let mut lil = adjacency.to_lil();
    let mut cliques = CliqueRecord::with_capacity(clique_size, num_cliques);

    for i in 0..num_cliques {
        let mut clique = sample_distinct(rng, "clique members", nrows, clique_size)?;
        clique.sort_unstable();

        for &c in &clique {
            let mut neighbors: BTreeSet<usize> = lil.row(c).indices.iter().copied().collect();
            let had_self_loop = neighbors.contains(&c);
            neighbors.extend(clique.iter().copied());
            if !had_self_loop {
                neighbors.remove(&c);
            }

            let indices: Vec<usize> = neighbors.into_iter().collect();
            let values = vec![T::one(); indices.len()];
            lil.set_row(c, indices, values)?;
        }

        tracing::debug!(clique = i, members = ?clique, "planted clique");
        cliques.push(&clique);
    }

    let augmented = lil.into_csr();
    tracing::info!(
        num_cliques,
        clique_size,
        nnz_before = adjacency.nnz(),
        nnz_after = augmented.nnz(),
        "clique injection complete"
    );

    Ok((augmented, cliques))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;

    fn assert_clique_connected(adj: &CsrMatrix<f32>, clique: &[usize]) {
        for &u in clique {
            for &v in clique {
                if u != v {
                    assert!(adj.get(u, v).is_some(), "missing edge {} -> {}", u, v);
                }
            }
        }
    }

    #[test]
    fn test_empty_graph_single_clique() {
        let adj = CsrMatrix::<f32>::zeros(10, 10);
        let mut rng = seeded_rng(0);
        let (out, cliques) = inject_cliques(&adj, 3, 1, &mut rng).unwrap();

        assert_eq!(out.shape(), (10, 10));
        assert_eq!(cliques.shape(), (1, 3));
        assert_eq!(out.nnz(), 6);

        let clique = cliques.get(0).unwrap();
        assert_clique_connected(&out, clique);
        for (r, c, v) in out.iter() {
            assert!(clique.contains(&r) && clique.contains(&c));
            assert_ne!(r, c);
            assert_eq!(v, 1.0);
        }
    }

    #[test]
    fn test_clique_members_sorted_and_distinct() {
        let adj = CsrMatrix::<f32>::zeros(50, 50);
        let mut rng = seeded_rng(11);
        let (_, cliques) = inject_cliques(&adj, 7, 5, &mut rng).unwrap();

        assert_eq!(cliques.len(), 5);
        for clique in cliques.iter() {
            assert_eq!(clique.len(), 7);
            assert!(clique.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_zero_cliques_returns_input() {
        let adj = CsrMatrix::from_dense(&[
            vec![0.0f32, 2.5, 0.0],
            vec![2.5, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ])
        .unwrap();
        let mut rng = seeded_rng(0);
        let (out, cliques) = inject_cliques(&adj, 2, 0, &mut rng).unwrap();

        assert_eq!(out, adj);
        assert!(cliques.is_empty());
        assert_eq!(cliques.len(), 0);
        assert!(cliques.get(0).is_none());
    }

    #[test]
    fn test_whole_graph_clique() {
        let adj = CsrMatrix::<u8>::zeros(4, 4);
        let mut rng = seeded_rng(3);
        let (out, cliques) = inject_cliques(&adj, 4, 1, &mut rng).unwrap();

        assert_eq!(cliques.get(0).unwrap(), &[0, 1, 2, 3]);
        assert_eq!(out.nnz(), 12);
        for r in 0..4 {
            assert!(out.get(r, r).is_none());
        }
    }

    #[test]
    fn test_clique_larger_than_graph() {
        let adj = CsrMatrix::<f32>::zeros(4, 4);
        let mut rng = seeded_rng(3);
        let err = inject_cliques(&adj, 5, 1, &mut rng).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains('5'));
    }

    #[test]
    fn test_zero_clique_size_rejected() {
        let adj = CsrMatrix::<f32>::zeros(4, 4);
        let mut rng = seeded_rng(3);
        assert!(inject_cliques(&adj, 0, 1, &mut rng).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_non_square_rejected() {
        let adj = CsrMatrix::<f32>::zeros(4, 5);
        let mut rng = seeded_rng(3);
        let err = inject_cliques(&adj, 2, 1, &mut rng).unwrap_err();
        assert!(err.to_string().contains("square"));
    }

    #[test]
    fn test_existing_self_loop_preserved() {
        // Full-graph clique so every node is a member
        let adj = CsrMatrix::from_triplets(3, 3, &[(1, 1, 4.0f32)]).unwrap();
        let mut rng = seeded_rng(0);
        let (out, _) = inject_cliques(&adj, 3, 1, &mut rng).unwrap();

        assert_eq!(out.get(1, 1), Some(1.0));
        assert!(out.get(0, 0).is_none());
        assert!(out.get(2, 2).is_none());
    }

    #[test]
    fn test_member_row_weights_reset_to_one() {
        // Node 0 has a weighted edge to 3, which lies outside the clique
        let adj = CsrMatrix::from_triplets(4, 4, &[(0, 3, 9.0f32), (3, 0, 9.0)]).unwrap();
        let mut rng = seeded_rng(0);
        let (out, cliques) = inject_cliques(&adj, 3, 1, &mut rng).unwrap();
        let clique = cliques.get(0).unwrap();

        for r in 0..4 {
            let expected = if clique.contains(&r) { 1.0 } else { 9.0 };
            for (_, v) in out.row(r).iter() {
                assert_eq!(v, expected);
            }
        }
        // Non-clique edges survive in member rows
        assert!(out.get(0, 3).is_some());
        assert!(out.get(3, 0).is_some());
    }

    #[test]
    fn test_input_not_mutated() {
        let adj = CsrMatrix::<f32>::zeros(6, 6);
        let snapshot = adj.clone();
        let mut rng = seeded_rng(1);
        let _ = inject_cliques(&adj, 3, 2, &mut rng).unwrap();
        assert_eq!(adj, snapshot);
    }

    #[test]
    fn test_record_serde_validates() {
        let (_, cliques) = inject_cliques(&CsrMatrix::<f32>::zeros(8, 8), 3, 2, &mut seeded_rng(4)).unwrap();
        let json = serde_json::to_string(&cliques).unwrap();
        let back: CliqueRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cliques);

        let empty: CliqueRecord = serde_json::from_str(r#"{"clique_size":0,"members":[]}"#).unwrap();
        assert!(empty.is_empty());

        for bad in [
            r#"{"clique_size":0,"members":[1,2]}"#,
            r#"{"clique_size":2,"members":[0,1,2]}"#,
            r#"{"clique_size":2,"members":[3,1]}"#,
        ] {
            assert!(serde_json::from_str::<CliqueRecord>(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let adj = CsrMatrix::<f32>::zeros(30, 30);
        let a = inject_cliques(&adj, 5, 3, &mut seeded_rng(42)).unwrap();
        let b = inject_cliques(&adj, 5, 3, &mut seeded_rng(42)).unwrap();
        assert_eq!(a, b);
    }
}
