//! Local data directory resolution.

use std::path::{Path, PathBuf};

use crate::error::{DataError, DataResult};

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "GRAPH_ANOMALY_DATA";

/// Data root used when the environment variable is unset.
pub const DEFAULT_DATA_DIR: &str = "~/graph_anomaly_data";

/// Resolve the data root from an optional override, expanding a leading `~`.
///
/// Pure function of its inputs so tests do not touch process environment.
pub fn resolve_root(value: Option<&str>, home: Option<&Path>) -> PathBuf {
    let raw = value.unwrap_or(DEFAULT_DATA_DIR);
    match (raw.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(raw),
    }
}

/// Data root for this process: `$GRAPH_ANOMALY_DATA` or `~/graph_anomaly_data`.
pub fn data_root() -> PathBuf {
    let value = std::env::var(DATA_DIR_ENV).ok();
    let home = std::env::var_os("HOME").map(PathBuf::from);
    resolve_root(value.as_deref(), home.as_deref())
}

/// Join `parts` onto the data root, creating the root if needed.
pub fn data_dir<I, P>(parts: I) -> DataResult<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let root = data_root();
    std::fs::create_dir_all(&root).map_err(|e| DataError::io(&root, e))?;

    let mut path = root;
    for part in parts {
        path.push(part);
    }
    Ok(path)
}
