//! Graph datasets for anomaly injection benchmarks.
//!
//! ## Modules
//!
//! - `graph` - the [`GraphData`] record every loader produces
//! - `registry` - name-keyed registry of lazy loaders
//! - `loader` - JSON file loaders and the standard single-graph catalog
//! - `path` - data root resolution (`GRAPH_ANOMALY_DATA`)

pub mod graph;
pub mod loader;
pub mod path;
pub mod registry;

pub use graph::GraphData;
pub use loader::{
    read_graph, single_graphs, write_graph, CachedGraphLoader, JsonGraphLoader, SINGLE_GRAPH_NAMES,
};
pub use path::{data_dir, data_root, DATA_DIR_ENV};
pub use registry::{GraphLoader, Registry};
