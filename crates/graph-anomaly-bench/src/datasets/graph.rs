//! In-memory graph record shared by every dataset.

use graph_anomaly_core::CsrMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// A single attributed graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    /// `[num_nodes, num_nodes]` adjacency.
    pub adjacency: CsrMatrix<f32>,
    /// `[num_nodes, num_attrs]` node attributes, when the dataset has them.
    #[serde(default)]
    pub node_attrs: Option<CsrMatrix<f32>>,
    /// One class label per node.
    pub node_labels: Vec<i32>,
    /// Free-form dataset metadata.
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl GraphData {
    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.adjacency.nrows()
    }

    /// Number of stored adjacency entries (directed edges).
    pub fn num_edges(&self) -> usize {
        self.adjacency.nnz()
    }

    /// Check that all parts agree on the node count.
    pub fn validate(&self) -> DataResult<()> {
        let (rows, cols) = self.adjacency.shape();
        if rows != cols {
            return Err(DataError::InvalidGraph(format!(
                "adjacency must be square, got ({}, {})",
                rows, cols
            )));
        }
        if let Some(attrs) = &self.node_attrs {
            if attrs.nrows() != rows {
                return Err(DataError::InvalidGraph(format!(
                    "node_attrs has {} rows for {} nodes",
                    attrs.nrows(),
                    rows
                )));
            }
        }
        if self.node_labels.len() != rows {
            return Err(DataError::InvalidGraph(format!(
                "node_labels has {} entries for {} nodes",
                self.node_labels.len(),
                rows
            )));
        }
        Ok(())
    }
}
