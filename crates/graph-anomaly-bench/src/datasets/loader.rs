//! File-backed graph loaders.
//!
//! Graphs are cached locally as JSON serializations of [`GraphData`]. The
//! standard single-graph benchmarks resolve to
//! `<data root>/single_graphs/<name>.json`.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use super::graph::GraphData;
use super::path::data_dir;
use super::registry::{GraphLoader, Registry};
use crate::error::{DataError, DataResult};

/// Subdirectory of the data root holding single-graph datasets.
pub const SINGLE_GRAPHS_DIR: &str = "single_graphs";

/// Names of the standard single-graph benchmarks.
pub const SINGLE_GRAPH_NAMES: &[&str] = &[
    "acm",
    "amazon_cs",
    "amazon_photo",
    "blogcatalog",
    "citeseer",
    "citeseer_full",
    "coauthor_cs",
    "coauthor_phy",
    "cora",
    "cora_full",
    "cora_ml",
    "dblp",
    "flickr",
    "karate_club",
    "ms_academic",
    "polblogs",
    "pubmed",
    "uai",
];

/// Read a [`GraphData`] JSON file.
pub fn read_graph(path: &Path) -> DataResult<GraphData> {
    let file = File::open(path).map_err(|e| DataError::io(path, e))?;
    let graph: GraphData =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| DataError::json(path, e))?;
    graph.validate()?;
    Ok(graph)
}

/// Write a [`GraphData`] JSON file, creating parent directories.
pub fn write_graph(path: &Path, graph: &GraphData) -> DataResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| DataError::io(parent, e))?;
        }
    }
    let file = File::create(path).map_err(|e| DataError::io(path, e))?;
    serde_json::to_writer(BufWriter::new(file), graph).map_err(|e| DataError::json(path, e))
}

/// Loads a graph from a fixed JSON file.
#[derive(Debug, Clone)]
pub struct JsonGraphLoader {
    path: PathBuf,
}

impl JsonGraphLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GraphLoader for JsonGraphLoader {
    fn load(&self) -> DataResult<GraphData> {
        read_graph(&self.path)
    }
}

/// Loads a standard benchmark from the data root's cache directory.
///
/// The path is resolved on every load so that changes to the data root
/// environment variable are honoured.
#[derive(Debug, Clone)]
pub struct CachedGraphLoader {
    name: String,
}

impl CachedGraphLoader {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Expected cache file for this dataset.
    pub fn cache_path(&self) -> DataResult<PathBuf> {
        let file_name = format!("{}.json", self.name);
        data_dir([SINGLE_GRAPHS_DIR, file_name.as_str()])
    }
}

impl GraphLoader for CachedGraphLoader {
    fn load(&self) -> DataResult<GraphData> {
        let path = self.cache_path()?;
        if !path.exists() {
            tracing::warn!(dataset = %self.name, path = %path.display(), "dataset not cached");
        }
        read_graph(&path)
    }
}

/// Registry of the standard single-graph benchmarks.
pub fn single_graphs() -> DataResult<Registry> {
    let mut registry = Registry::new(SINGLE_GRAPHS_DIR);
    for &name in SINGLE_GRAPH_NAMES {
        registry.register(name, CachedGraphLoader::new(name))?;
    }
    Ok(registry)
}
