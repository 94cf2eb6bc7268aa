//! # Graph Anomaly Core
//!
//! Synthetic anomaly injection for benchmarking graph anomaly detectors.
//!
//! Two planted anomaly classes are supported:
//!
//! - **Structural**: [`inject_cliques`] rewrites adjacency rows so that
//!   randomly drawn node subsets become fully connected.
//! - **Contextual**: [`inject_attribute_anomalies`] replaces a node's feature
//!   row with the row of the most distant node among a random candidate pool.
//!
//! Both injectors take an explicit random source. Pass a
//! [`rng::seeded_rng`] for reproducible output, or use [`rng::with_seed`]
//! with [`rng::with_shared_rng`] for a scoped, self-restoring shared source.
//!
//! ## Usage
//!
//! ```
//! use graph_anomaly_core::{inject_cliques, rng::seeded_rng, CsrMatrix};
//!
//! let adjacency = CsrMatrix::<f32>::zeros(10, 10);
//! let mut rng = seeded_rng(0);
//! let (augmented, cliques) = inject_cliques(&adjacency, 3, 1, &mut rng).unwrap();
//!
//! assert_eq!(augmented.nnz(), 6);
//! assert_eq!(cliques.shape(), (1, 3));
//! ```

pub mod error;
pub mod inject;
pub mod rng;
pub mod sparse;

// Re-export key types for convenience
pub use error::{AnomalyError, AnomalyResult};
pub use inject::{
    inject_attribute_anomalies, inject_cliques, AnomalyMapping, AnomalyPair, CliqueRecord,
    DEFAULT_NUM_ANOMALIES, DEFAULT_NUM_CLIQUES,
};
pub use sparse::{CsrMatrix, LilMatrix, Scalar, SparseRow};
