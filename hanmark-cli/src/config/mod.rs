//! Configuration module

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Extraction configuration
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Extraction-related configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct ExtractConfig {
    /// Name of the i18n call function
    pub function_name: String,

    /// Source language of the scanned text
    pub source_language: String,

    /// Target languages for translation and export
    pub languages: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            function_name: "$t".to_string(),
            source_language: "zh".to_string(),
            languages: Vec::new(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Default scan output format
    pub default_format: String,

    /// Export directory for generated message files
    pub export_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            export_dir: "i18n".to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Invalid config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.extract.function_name, "$t");
        assert_eq!(config.extract.source_language, "zh");
        assert_eq!(config.output.default_format, "text");
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hanmark.toml");
        fs::write(
            &path,
            "[extract]\nfunction_name = \"i18n.t\"\nsource_language = \"zh\"\nlanguages = [\"en\"]\n",
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.extract.function_name, "i18n.t");
        assert_eq!(config.extract.languages, vec!["en"]);
        assert_eq!(config.output.default_format, "text");
    }

    #[test]
    fn test_load_invalid_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hanmark.toml");
        fs::write(&path, "extract = 3").unwrap();
        assert!(CliConfig::load(&path).is_err());
    }
}
