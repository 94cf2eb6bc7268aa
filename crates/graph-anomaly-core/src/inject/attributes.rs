//! Attribute anomaly injection.
//!
//! For each anomaly, the victim's attribute row is replaced with the row of
//! the node whose attributes lie furthest from it (Euclidean norm) among
//! `num_candidates` randomly drawn candidates.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::sample_distinct;
use crate::error::{AnomalyError, AnomalyResult};
use crate::sparse::{CsrMatrix, Scalar};

/// Conventional number of attribute anomalies per call.
pub const DEFAULT_NUM_ANOMALIES: usize = 1;

/// One planted attribute anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnomalyPair {
    /// Node whose attributes were overwritten.
    pub victim: usize,
    /// Node whose original attributes were copied in.
    pub donor: usize,
}

/// Audit trail of an attribute injection: `output[victim] == input[donor]`.
///
/// Logically a `[len, 2]` index array with the victim in column 0 and the
/// donor in column 1. Victims are ascending and distinct; donors may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnomalyMapping {
    pairs: Vec<AnomalyPair>,
}

impl AnomalyMapping {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `[len, 2]`.
    pub fn shape(&self) -> (usize, usize) {
        (self.pairs.len(), 2)
    }

    pub fn get(&self, i: usize) -> Option<AnomalyPair> {
        self.pairs.get(i).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = AnomalyPair> + '_ {
        self.pairs.iter().copied()
    }

    pub fn victims(&self) -> impl Iterator<Item = usize> + '_ {
        self.pairs.iter().map(|p| p.victim)
    }

    pub fn donors(&self) -> impl Iterator<Item = usize> + '_ {
        self.pairs.iter().map(|p| p.donor)
    }

    /// Rows of the `[len, 2]` array.
    pub fn to_rows(&self) -> Vec<[usize; 2]> {
        self.pairs.iter().map(|p| [p.victim, p.donor]).collect()
    }
}

/// Plant `num_anomalies` attribute anomalies into `node_attrs`.
///
/// Victims are drawn without replacement and processed in ascending order.
/// For each victim a fresh pool of `num_candidates` distinct nodes is drawn
/// from all nodes (the victim itself and other victims included). The donor
/// is the candidate whose original row is furthest from the victim's original
/// row; ties go to the candidate drawn first, and a NaN distance outranks
/// any number. The victim's row in the output becomes an exact copy of the
/// donor's row in the input.
///
/// Distances and donor rows are always read from `node_attrs`, never from the
/// partially rewritten working copy.
///
/// # Errors
///
/// Returns an InvalidArgument-class [`AnomalyError`] if `num_candidates` is
/// zero or exceeds the node count, or if `num_anomalies` exceeds it.
pub fn inject_attribute_anomalies<T, R>(
    node_attrs: &CsrMatrix<T>,
    num_candidates: usize,
    num_anomalies: usize,
    rng: &mut R,
) -> AnomalyResult<(CsrMatrix<T>, AnomalyMapping)>
where
    T: Scalar,
    R: Rng + ?Sized,
{
    let num_nodes = node_attrs.nrows();
    if num_candidates == 0 {
        return Err(AnomalyError::InvalidArgument(
            "num_candidates must be positive".to_string(),
        ));
    }
    if num_candidates > num_nodes {
        return Err(AnomalyError::SampleTooLarge {
            what: "candidates",
            requested: num_candidates,
            available: num_nodes,
        });
    }

    let mut victims = sample_distinct(rng, "anomalous nodes", num_nodes, num_anomalies)?;
    victims.sort_unstable();

    let mut working = node_attrs.to_lil();
    let mut pairs = Vec::with_capacity(num_anomalies);

    for &victim in &victims {
        let candidates = sample_distinct(rng, "candidates", num_nodes, num_candidates)?;
        let (donor, distance) = farthest_candidate(node_attrs, victim, &candidates);

        working.copy_row(victim, node_attrs.row(donor))?;
        tracing::debug!(victim, donor, distance, "planted attribute anomaly");
        pairs.push(AnomalyPair { victim, donor });
    }

    tracing::info!(num_anomalies, num_candidates, "attribute anomaly injection complete");

    Ok((working.into_csr(), AnomalyMapping { pairs }))
}

/// First candidate at maximum distance from `victim`, with that distance.
///
/// A NaN distance ranks above every number, so the first candidate at NaN
/// distance wins when one exists. `candidates` must be non-empty.
fn farthest_candidate<T: Scalar>(
    attrs: &CsrMatrix<T>,
    victim: usize,
    candidates: &[usize],
) -> (usize, f64) {
    let mut best = (candidates[0], attrs.row_distance(victim, attrs, candidates[0]));

    for &candidate in &candidates[1..] {
        if best.1.is_nan() {
            break;
        }
        let distance = attrs.row_distance(victim, attrs, candidate);
        // Strict comparison keeps the earliest of equal distances
        if distance.is_nan() || distance > best.1 {
            best = (candidate, distance);
        }
    }

    best
}
