//! Injection configuration: which anomalies to plant and how many.
//!
//! Configurations are plain TOML:
//!
//! ```toml
//! seed = 42
//!
//! [cliques]
//! clique_size = 15
//! num_cliques = 10
//!
//! [attributes]
//! num_candidates = 50
//! num_anomalies = 150
//! ```
//!
//! Omitting a section disables that anomaly class.

use std::path::Path;

use graph_anomaly_core::{DEFAULT_NUM_ANOMALIES, DEFAULT_NUM_CLIQUES};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// Default seed for reproducible runs.
pub const DEFAULT_SEED: u64 = 42;

/// Structural anomaly settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliqueConfig {
    /// Nodes per clique.
    pub clique_size: usize,
    /// Number of cliques to plant.
    #[serde(default = "default_num_cliques")]
    pub num_cliques: usize,
}

impl Default for CliqueConfig {
    fn default() -> Self {
        Self {
            clique_size: 15,
            num_cliques: 10,
        }
    }
}

/// Attribute anomaly settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeConfig {
    /// Candidate pool size per anomaly.
    pub num_candidates: usize,
    /// Number of nodes whose attributes are replaced.
    #[serde(default = "default_num_anomalies")]
    pub num_anomalies: usize,
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            num_candidates: 50,
            num_anomalies: 150,
        }
    }
}

fn default_num_cliques() -> usize {
    DEFAULT_NUM_CLIQUES
}

fn default_num_anomalies() -> usize {
    DEFAULT_NUM_ANOMALIES
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Complete injection run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionConfig {
    /// Seed for the run's random source.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Clique injection, if enabled.
    #[serde(default)]
    pub cliques: Option<CliqueConfig>,
    /// Attribute anomaly injection, if enabled.
    #[serde(default)]
    pub attributes: Option<AttributeConfig>,
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            cliques: Some(CliqueConfig::default()),
            attributes: Some(AttributeConfig::default()),
        }
    }
}

impl InjectionConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> DataResult<Self> {
        let config: InjectionConfig = toml::from_str(content)
            .map_err(|e| DataError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn from_file(path: &Path) -> DataResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DataError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Check values that are invalid regardless of the graph.
    pub fn validate(&self) -> DataResult<()> {
        if let Some(cliques) = &self.cliques {
            if cliques.clique_size == 0 {
                return Err(DataError::Config(
                    "cliques.clique_size must be greater than 0".into(),
                ));
            }
        }
        if let Some(attributes) = &self.attributes {
            if attributes.num_candidates == 0 {
                return Err(DataError::Config(
                    "attributes.num_candidates must be greater than 0".into(),
                ));
            }
        }
        Ok(())
    }

    /// Check sizes against a graph with `num_nodes` nodes.
    ///
    /// Lets a caller reject an oversized run before any injection starts.
    pub fn validate_for(&self, num_nodes: usize) -> DataResult<()> {
        self.validate()?;
        if let Some(cliques) = &self.cliques {
            if cliques.clique_size > num_nodes {
                return Err(DataError::Config(format!(
                    "cliques.clique_size {} exceeds node count {}",
                    cliques.clique_size, num_nodes
                )));
            }
        }
        if let Some(attributes) = &self.attributes {
            if attributes.num_candidates > num_nodes {
                return Err(DataError::Config(format!(
                    "attributes.num_candidates {} exceeds node count {}",
                    attributes.num_candidates, num_nodes
                )));
            }
            if attributes.num_anomalies > num_nodes {
                return Err(DataError::Config(format!(
                    "attributes.num_anomalies {} exceeds node count {}",
                    attributes.num_anomalies, num_nodes
                )));
            }
        }
        Ok(())
    }
}
