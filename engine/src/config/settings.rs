// Dashboard settings, loadable from a JSON file with sensible defaults.
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One product canonicalization rule: any raw PrName containing `contains`
/// (case-insensitive) is rewritten to `canonical`. Rules are applied in
/// order and the first match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRule {
    pub contains: String,
    pub canonical: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Directory scanned for the sales export when no explicit file is given.
    pub data_dir: PathBuf,
    /// Case-insensitive substring preferred when picking among CSV files.
    pub file_marker: String,
    /// Candidate text encodings, tried in order.
    pub encodings: Vec<String>,
    /// Ordered product-name canonicalization rules; empty means no rewrite.
    pub product_rules: Vec<ProductRule>,
    /// Top-N cutoff for the branch leaderboard.
    pub leaderboard_size: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            data_dir: PathBuf::from("."),
            file_marker: "modern trade".to_string(),
            encodings: vec![
                "utf-8".to_string(),
                "tis-620".to_string(),
                "cp874".to_string(),
                "latin-1".to_string(),
            ],
            product_rules: Vec::new(),
            leaderboard_size: 10,
        }
    }
}

impl DashboardSettings {
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| {
            EngineError::ConfigError(format!("Invalid settings file '{}': {}", path.display(), e))
        })
    }

    /// Reads the settings file if it exists, otherwise falls back to the
    /// defaults. A present-but-invalid file is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, EngineError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = DashboardSettings::default();
        assert_eq!(settings.file_marker, "modern trade");
        assert_eq!(settings.encodings[0], "utf-8");
        assert_eq!(settings.encodings.len(), 4);
        assert!(settings.product_rules.is_empty());
        assert_eq!(settings.leaderboard_size, 10);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{ "file_marker": "export", "leaderboard_size": 5 }}"#
        )
        .unwrap();
        let settings = DashboardSettings::load(file.path()).unwrap();
        assert_eq!(settings.file_marker, "export");
        assert_eq!(settings.leaderboard_size, 5);
        // Unspecified fields keep their defaults.
        assert_eq!(settings.encodings.len(), 4);
    }

    #[test]
    fn test_load_invalid_json_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();
        let err = DashboardSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let settings =
            DashboardSettings::load_or_default(Path::new("no_such_settings.json")).unwrap();
        assert_eq!(settings.file_marker, "modern trade");
    }
}
