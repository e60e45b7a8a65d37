//! Translation provider boundary
//!
//! Remote lookup (or any other transport) lives behind the
//! [`TranslationProvider`] trait; the core only batches keyed values per
//! target language and files the answers into the registry. A failure is
//! scoped to the one language that failed.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::registry::Registry;

/// One translated text as reported by a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// The source text that was submitted
    pub source: String,
    /// The provider's translation of it
    pub translated: String,
}

/// Batch lookup of translations for one target language
pub trait TranslationProvider {
    /// Translate `texts` from `from` into `to`
    ///
    /// Implementations report missing credentials or similar setup problems
    /// as [`Error::Configuration`]; any per-call failure as
    /// [`Error::Translation`].
    fn translate(&self, texts: &[String], from: &str, to: &str) -> Result<Vec<Translation>>;
}

/// Counters reported by one translation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationReport {
    /// Languages that completed
    pub languages_done: usize,
    /// Languages whose lookup failed and was skipped
    pub languages_failed: Vec<String>,
}

/// Fill the translation maps of every keyed entry
///
/// Each configured target language is one provider call over the keyed
/// values. A failed language is logged and skipped; a configuration error is
/// surfaced to the caller immediately (translation as a whole is
/// unavailable), leaving the registry untouched beyond languages already
/// filled.
pub fn translate_entries(
    registry: &mut Registry,
    provider: &dyn TranslationProvider,
    config: &Config,
) -> Result<TranslationReport> {
    let texts: Vec<String> = registry
        .entries()
        .iter()
        .filter(|e| e.has_key())
        .map(|e| e.value.clone())
        .collect();
    let mut report = TranslationReport::default();
    if texts.is_empty() || config.languages.is_empty() {
        return Ok(report);
    }

    for language in &config.languages {
        match provider.translate(&texts, &config.source_language, language) {
            Ok(items) => {
                for entry in registry.entries_mut() {
                    if entry.key.is_empty() {
                        continue;
                    }
                    let translated = items
                        .iter()
                        .find(|t| t.source == entry.value)
                        .map_or(String::new(), |t| t.translated.trim().to_string());
                    entry.translations.insert(language.clone(), translated);
                }
                report.languages_done += 1;
            }
            Err(Error::Configuration(message)) => {
                return Err(Error::Configuration(message));
            }
            Err(err) => {
                log::warn!("skipping language {language}: {err}");
                report.languages_failed.push(language.clone());
            }
        }
    }
    Ok(report)
}
