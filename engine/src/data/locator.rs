// File Locator: picks the sales export out of a data directory.
use crate::error::EngineError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Scans `dir` for `.csv` files and returns the one to load.
///
/// Preference order: the lexicographically first file whose name contains
/// `marker` (case-insensitive), else the lexicographically first CSV.
/// Sorting makes the fallback deterministic rather than filesystem-order
/// dependent. No CSV at all is a `MissingFileError`.
pub fn find_sales_csv(dir: &Path, marker: &str) -> Result<PathBuf, EngineError> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv {
            candidates.push(path);
        }
    }

    if candidates.is_empty() {
        return Err(EngineError::MissingFileError {
            dir: dir.to_path_buf(),
        });
    }

    candidates.sort();

    let marker_lower = marker.to_lowercase();
    let preferred = candidates.iter().find(|path| {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.to_lowercase().contains(&marker_lower))
            .unwrap_or(false)
    });

    let chosen = preferred.unwrap_or(&candidates[0]).clone();
    debug!(file = %chosen.display(), candidates = candidates.len(), "Selected sales CSV");
    Ok(chosen)
}
