//! Export of keyed entries to per-language message files and a report
//!
//! Message files are ES modules of the shape the host project imports:
//!
//! ```text
//! export default {
//!   greeting: '你好',
//!   '404': '页面不存在',
//! };
//! ```
//!
//! Keys beginning with a digit are quoted; embedded single quotes in values
//! are escaped. The combined report is one markdown table over all entries:
//! key, source value, one column per target language.

use anyhow::{Context, Result};
use hanmark_core::Entry;
use std::fs;
use std::path::{Path, PathBuf};

/// Module stem for a source file: the file stem, prefixed by its parent
/// directory name; a bare `index` collapses to the parent directory name
pub fn export_stem(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let parent = source
        .parent()
        .and_then(Path::file_name)
        .map(|s| s.to_string_lossy().to_string());
    match parent {
        Some(parent) if stem == "index" => parent,
        Some(parent) if !parent.is_empty() => format!("{parent}_{stem}"),
        _ => stem,
    }
}

fn format_key(key: &str) -> String {
    if key.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("'{key}'")
    } else {
        key.to_string()
    }
}

fn escape_value(value: &str) -> String {
    value.replace('\'', "\\'")
}

fn module_text<'a>(pairs: impl Iterator<Item = (&'a str, String)>) -> String {
    let mut out = String::from("export default {\n");
    for (key, value) in pairs {
        out.push_str(&format!("  {}: '{}',\n", format_key(key), escape_value(&value)));
    }
    out.push_str("};\n");
    out
}

/// Write the source-language module and one module per target language
///
/// Returns the paths written. Entries without a key are skipped; a language
/// column with no translation becomes an empty string, mirroring the report.
pub fn write_language_files(
    out_dir: &Path,
    stem: &str,
    entries: &[Entry],
    source_language: &str,
    languages: &[String],
) -> Result<Vec<PathBuf>> {
    let keyed: Vec<&Entry> = entries.iter().filter(|e| e.has_key()).collect();
    let mut written = Vec::new();

    let source_dir = out_dir.join(source_language);
    fs::create_dir_all(&source_dir)
        .with_context(|| format!("Failed to create {}", source_dir.display()))?;
    let path = source_dir.join(format!("{stem}.ts"));
    let text = module_text(keyed.iter().map(|e| (e.key.as_str(), e.value.clone())));
    fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    written.push(path);

    for language in languages {
        let lang_dir = out_dir.join(language);
        fs::create_dir_all(&lang_dir)
            .with_context(|| format!("Failed to create {}", lang_dir.display()))?;
        let path = lang_dir.join(format!("{stem}.ts"));
        let text = module_text(keyed.iter().map(|e| {
            (
                e.key.as_str(),
                e.translations.get(language).cloned().unwrap_or_default(),
            )
        }));
        fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

/// Write the combined tabular report over all entries of the run
pub fn write_report(
    out_dir: &Path,
    entries: &[Entry],
    source_language: &str,
    languages: &[String],
) -> Result<PathBuf> {
    let mut out = String::new();
    out.push_str(&format!("| key | {source_language} |"));
    for language in languages {
        out.push_str(&format!(" {language} |"));
    }
    out.push('\n');
    out.push_str("| --- | --- |");
    for _ in languages {
        out.push_str(" --- |");
    }
    out.push('\n');
    for entry in entries {
        out.push_str(&format!(
            "| {} | {} |",
            entry.key,
            entry.value.replace('|', "\\|").replace('\n', " ")
        ));
        for language in languages {
            out.push_str(&format!(
                " {} |",
                entry
                    .translations
                    .get(language)
                    .map(String::as_str)
                    .unwrap_or("")
            ));
        }
        out.push('\n');
    }

    fs::create_dir_all(out_dir).with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let path = out_dir.join("i18n.md");
    fs::write(&path, out).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
