//! Injection run reports.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use graph_anomaly_core::{AnomalyMapping, CliqueRecord, CsrMatrix, Scalar};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// Attribute norms of the victims before and after replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormShift {
    /// Mean L2 norm of the victims' original rows.
    pub mean_original: f64,
    /// Mean L2 norm of the rows copied in from donors.
    pub mean_anomalous: f64,
}

impl NormShift {
    /// Compare victim rows of `original` against the same rows of `augmented`.
    ///
    /// Returns `None` for an empty mapping.
    pub fn measure<T: Scalar>(
        original: &CsrMatrix<T>,
        augmented: &CsrMatrix<T>,
        mapping: &AnomalyMapping,
    ) -> Option<Self> {
        if mapping.is_empty() {
            return None;
        }
        let n = mapping.len() as f64;
        let (before, after) = mapping.iter().fold((0.0, 0.0), |(b, a), pair| {
            (
                b + row_norm(original, pair.victim),
                a + row_norm(augmented, pair.victim),
            )
        });
        Some(Self {
            mean_original: before / n,
            mean_anomalous: after / n,
        })
    }
}

fn row_norm<T: Scalar>(m: &CsrMatrix<T>, r: usize) -> f64 {
    m.row(r)
        .values
        .iter()
        .map(|v| v.to_f64() * v.to_f64())
        .sum::<f64>()
        .sqrt()
}

/// What an injection run planted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectionReport {
    /// Seed of the run's random source.
    pub seed: u64,
    /// Node count of the graph.
    pub num_nodes: usize,
    /// Adjacency entries before injection.
    pub edges_before: usize,
    /// Adjacency entries after injection.
    pub edges_after: usize,
    /// Planted cliques, when clique injection ran.
    pub cliques: Option<CliqueRecord>,
    /// Victim/donor pairs, when attribute injection ran.
    pub attribute_anomalies: Option<AnomalyMapping>,
    /// Victim norm comparison, when attribute injection ran.
    pub norm_shift: Option<NormShift>,
}

impl InjectionReport {
    /// Human-readable summary.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Seed: {}", self.seed),
            format!("Nodes: {}", self.num_nodes),
            format!(
                "Edges: {} -> {} (+{})",
                self.edges_before,
                self.edges_after,
                self.edges_after.saturating_sub(self.edges_before)
            ),
        ];
        if let Some(cliques) = &self.cliques {
            lines.push(format!(
                "Cliques: {} x {} nodes",
                cliques.len(),
                cliques.clique_size()
            ));
        }
        if let Some(mapping) = &self.attribute_anomalies {
            lines.push(format!("Attribute anomalies: {}", mapping.len()));
        }
        if let Some(shift) = &self.norm_shift {
            lines.push(format!(
                "Victim attribute norm: {:.4} -> {:.4}",
                shift.mean_original, shift.mean_anomalous
            ));
        }
        lines.join("\n")
    }

    /// Write as pretty JSON.
    pub fn write_json(&self, path: &Path) -> DataResult<()> {
        let file = File::create(path).map_err(|e| DataError::io(path, e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .map_err(|e| DataError::json(path, e))?;
        tracing::info!("Saved injection report to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_anomaly_core::rng::seeded_rng;
    use graph_anomaly_core::inject_attribute_anomalies;

    #[test]
    fn test_norm_shift_of_spike() {
        let attrs = CsrMatrix::from_dense(&[
            vec![0.0f32, 0.0],
            vec![0.0, 0.0],
            vec![3.0, 4.0],
        ])
        .unwrap();
        // Victim 0 receives row 2
        let augmented = CsrMatrix::from_dense(&[
            vec![3.0f32, 4.0],
            vec![0.0, 0.0],
            vec![3.0, 4.0],
        ])
        .unwrap();
        let mapping: AnomalyMapping =
            serde_json::from_str(r#"[{"victim": 0, "donor": 2}]"#).unwrap();

        let shift = NormShift::measure(&attrs, &augmented, &mapping).unwrap();
        assert_eq!(shift.mean_original, 0.0);
        assert!((shift.mean_anomalous - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_norm_shift_empty_mapping() {
        let attrs = CsrMatrix::<f32>::zeros(3, 2);
        let (out, mapping) = inject_attribute_anomalies(&attrs, 1, 0, &mut seeded_rng(0)).unwrap();
        assert!(NormShift::measure(&attrs, &out, &mapping).is_none());
    }

    #[test]
    fn test_summary_and_json() {
        let report = InjectionReport {
            seed: 42,
            num_nodes: 10,
            edges_before: 4,
            edges_after: 10,
            cliques: None,
            attribute_anomalies: None,
            norm_shift: Some(NormShift {
                mean_original: 1.0,
                mean_anomalous: 2.5,
            }),
        };
        let summary = report.summary();
        assert!(summary.contains("4 -> 10 (+6)"));
        assert!(summary.contains("1.0000 -> 2.5000"));

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        report.write_json(&path).unwrap();
        let back: InjectionReport =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(back, report);
    }
}
