//! # Graph Anomaly Benchmark Support
//!
//! Datasets, configuration and reporting around the injectors in
//! `graph-anomaly-core`.
//!
//! ## Data Layout
//!
//! Graphs are cached as JSON under the data root (`$GRAPH_ANOMALY_DATA`,
//! default `~/graph_anomaly_data`):
//!
//! ```text
//! graph_anomaly_data/
//! └── single_graphs/
//!     ├── cora.json
//!     ├── blogcatalog.json
//!     └── ...
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Plant 10 cliques of 15 nodes and 150 attribute anomalies into blogcatalog
//! cargo run -p graph-anomaly-bench --bin inject-anomalies -- \
//!     --dataset blogcatalog --clique-size 15 --num-cliques 10 \
//!     --num-candidates 50 --num-anomalies 150 --output out/blogcatalog.json
//!
//! # Same run driven by a TOML config
//! cargo run -p graph-anomaly-bench --bin inject-anomalies -- \
//!     --dataset blogcatalog --config injection.toml --output out/blogcatalog.json
//! ```

pub mod config;
pub mod datasets;
pub mod error;
pub mod report;
pub mod runner;

// Re-export key types for convenience
pub use config::{AttributeConfig, CliqueConfig, InjectionConfig};
pub use datasets::{single_graphs, GraphData, GraphLoader, JsonGraphLoader, Registry};
pub use error::{DataError, DataResult};
pub use report::{InjectionReport, NormShift};
pub use runner::InjectionRunner;
