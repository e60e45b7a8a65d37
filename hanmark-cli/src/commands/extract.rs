//! Extract command implementation
//!
//! Scans each input file, assigns keys from a key map (and optionally an
//! auto-key prefix), rewrites keyed fragments into i18n call expressions,
//! and exports per-language message files plus a combined report.

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use hanmark_core::{
    rewrite, translate_entries, Config, Entry, Error, NoopHighlights, Registry, ScanMode, Scanner,
    TextBuffer,
};

use crate::config::CliConfig;
use crate::export::{export_stem, write_language_files, write_report};
use crate::glossary::GlossaryProvider;
use crate::input::{resolve_patterns, FileReader};
use crate::progress::ProgressReporter;

/// Arguments for the extract command
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// TOML key map assigning keys to discovered values
    #[arg(short, long, value_name = "FILE")]
    pub keys: Option<PathBuf>,

    /// Auto-assign keys `<PREFIX>1, <PREFIX>2, …` to entries the key map
    /// left unkeyed
    #[arg(long, value_name = "PREFIX")]
    pub key_prefix: Option<String>,

    /// Print rewritten documents to stdout instead of editing files
    #[arg(long)]
    pub dry_run: bool,

    /// Export directory for message files and the report
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Glossary file for local translation
    #[arg(short, long, value_name = "FILE")]
    pub glossary: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// i18n call function name (overrides configuration)
    #[arg(long, value_name = "NAME")]
    pub function_name: Option<String>,

    /// Target language (repeatable; overrides configuration)
    #[arg(short, long, value_name = "CODE")]
    pub language: Vec<String>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Default, Deserialize)]
struct KeyMapFile {
    #[serde(default)]
    keys: BTreeMap<String, String>,
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self) -> Result<()> {
        crate::commands::init_logging(self.quiet, self.verbose);

        let cli_config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let languages = if self.language.is_empty() {
            cli_config.extract.languages.clone()
        } else {
            self.language.clone()
        };
        let config = Config::builder()
            .function_name(
                self.function_name
                    .clone()
                    .unwrap_or(cli_config.extract.function_name),
            )
            .source_language(cli_config.extract.source_language)
            .languages(languages)
            .build()?;

        let key_map = match &self.keys {
            Some(path) => load_key_map(path)?,
            None => BTreeMap::new(),
        };
        let mut provider = match &self.glossary {
            Some(path) => Some(GlossaryProvider::load(path)?),
            None => None,
        };

        let out_dir = self
            .out
            .clone()
            .unwrap_or_else(|| PathBuf::from(&cli_config.output.export_dir));
        let files = resolve_patterns(&self.input)?;
        log::info!("extracting from {} file(s)", files.len());

        let mut progress = ProgressReporter::new(self.quiet || self.dry_run);
        progress.init_files(files.len() as u64);

        let mut auto_key = 0usize;
        let mut report_entries: Vec<Entry> = Vec::new();

        for file in &files {
            let display = file.to_string_lossy().to_string();
            let text = FileReader::read_text(file)?;
            let mut doc = TextBuffer::new(&text);
            let mut registry = Registry::new();
            let mut sink = NoopHighlights::new();
            Scanner::new(&mut registry, &mut sink).scan(&doc, ScanMode::for_path(&display));

            assign_keys(&mut registry, &key_map, self.key_prefix.as_deref(), &mut auto_key);

            let disable_translation = match provider.as_ref() {
                Some(active) => match translate_entries(&mut registry, active, &config) {
                    Ok(report) => {
                        for language in &report.languages_failed {
                            log::warn!("{display}: no translations for {language}");
                        }
                        false
                    }
                    Err(Error::Configuration(message)) => {
                        // Translation is unavailable as a whole; everything
                        // else proceeds.
                        log::warn!("translation disabled: {message}");
                        true
                    }
                    Err(err) => return Err(err.into()),
                },
                None => false,
            };
            if disable_translation {
                provider = None;
            }

            let report = rewrite(&mut doc, &registry, &config, &mut sink)
                .with_context(|| format!("rewrite failed for {display}"))?;
            if report.unknown_contexts > 0 {
                log::warn!(
                    "{display}: {} occurrence(s) used the degraded in-place wrap",
                    report.unknown_contexts
                );
            }

            if self.dry_run {
                println!("{}", doc.text());
            } else {
                FileReader::write_text(file, &doc.text())?;
                write_language_files(
                    &out_dir,
                    &export_stem(file),
                    registry.entries(),
                    &config.source_language,
                    &config.languages,
                )?;
            }

            report_entries.extend(registry.entries().iter().cloned());
            progress.file_completed(&display);
        }
        progress.finish();

        if !self.dry_run {
            let path = write_report(
                &out_dir,
                &report_entries,
                &config.source_language,
                &config.languages,
            )?;
            log::info!("report written to {}", path.display());
        }
        Ok(())
    }
}

fn load_key_map(path: &Path) -> Result<BTreeMap<String, String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read key map: {}", path.display()))?;
    let file: KeyMapFile =
        toml::from_str(&text).with_context(|| format!("Invalid key map: {}", path.display()))?;
    Ok(file.keys)
}

/// Assign keys from the map (value → key), then auto-keys for the rest
fn assign_keys(
    registry: &mut Registry,
    key_map: &BTreeMap<String, String>,
    prefix: Option<&str>,
    auto_key: &mut usize,
) {
    let pending: Vec<(hanmark_core::EntryId, String)> = registry
        .entries()
        .iter()
        .filter(|e| !e.has_key())
        .map(|e| (e.id, e.value.clone()))
        .collect();
    for (id, value) in pending {
        if let Some(key) = key_map.get(&value) {
            registry.update(id, key.clone(), value);
        } else if let Some(prefix) = prefix {
            *auto_key += 1;
            registry.update(id, format!("{prefix}{auto_key}"), value);
        }
    }
}
