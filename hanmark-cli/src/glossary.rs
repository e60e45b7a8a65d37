//! Glossary-file translation provider
//!
//! A TOML file with one table per target language maps source values to
//! translations:
//!
//! ```toml
//! [en]
//! "你好" = "hello"
//!
//! [ja]
//! "你好" = "こんにちは"
//! ```
//!
//! Remote providers plug in behind the same [`TranslationProvider`] trait;
//! this one keeps the lookup fully local.

use anyhow::{Context, Result};
use hanmark_core::{Error, Translation, TranslationProvider};
use std::collections::BTreeMap;
use std::path::Path;

/// Translation provider backed by a local glossary file
#[derive(Debug, Default)]
pub struct GlossaryProvider {
    tables: BTreeMap<String, BTreeMap<String, String>>,
}

impl GlossaryProvider {
    /// Load a glossary from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read glossary: {}", path.display()))?;
        let tables: BTreeMap<String, BTreeMap<String, String>> =
            toml::from_str(&text).with_context(|| format!("Invalid glossary: {}", path.display()))?;
        Ok(Self { tables })
    }

    /// Build a glossary from in-memory tables
    pub fn from_tables(tables: BTreeMap<String, BTreeMap<String, String>>) -> Self {
        Self { tables }
    }
}

impl TranslationProvider for GlossaryProvider {
    fn translate(
        &self,
        texts: &[String],
        _from: &str,
        to: &str,
    ) -> hanmark_core::Result<Vec<Translation>> {
        let table = self.tables.get(to).ok_or_else(|| Error::Translation {
            language: to.to_string(),
            message: "language not present in glossary".to_string(),
        })?;
        Ok(texts
            .iter()
            .filter_map(|text| {
                table.get(text).map(|translated| Translation {
                    source: text.clone(),
                    translated: translated.clone(),
                })
            })
            .collect())
    }
}
