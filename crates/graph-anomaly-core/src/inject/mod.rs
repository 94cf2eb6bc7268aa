//! Anomaly injectors.
//!
//! Both injectors are pure functions of (input matrix, parameters, random
//! source): they never mutate the caller's matrix, return a fresh CSR matrix
//! plus a record of what was planted, and draw from the random source in a
//! fixed order so a seeded source reproduces the output bit for bit.

mod attributes;
mod cliques;

pub use attributes::{inject_attribute_anomalies, AnomalyMapping, AnomalyPair, DEFAULT_NUM_ANOMALIES};
pub use cliques::{inject_cliques, CliqueRecord, DEFAULT_NUM_CLIQUES};

use rand::seq::index;
use rand::Rng;

use crate::error::{check_sample_size, AnomalyResult};

/// Draw `amount` distinct indices from `0..length`, in draw order.
pub(crate) fn sample_distinct<R: Rng + ?Sized>(
    rng: &mut R,
    what: &'static str,
    length: usize,
    amount: usize,
) -> AnomalyResult<Vec<usize>> {
    check_sample_size(what, amount, length)?;
    Ok(index::sample(rng, length, amount).into_vec())
}
