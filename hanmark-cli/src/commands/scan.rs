//! Scan command implementation

use anyhow::Result;
use clap::Args;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use hanmark_core::{NoopHighlights, Registry, ScanMode, Scanner, TextBuffer};

use crate::input::{resolve_patterns, FileReader};
use crate::output::{EntryFormatter, JsonFormatter, MarkdownFormatter, TextFormatter};
use crate::progress::ProgressReporter;

/// Arguments for the scan command
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported scan output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// One occurrence per line
    Text,
    /// JSON array of entries with spans
    Json,
    /// Markdown table of entries
    Markdown,
}

impl ScanArgs {
    /// Execute the scan command
    pub fn execute(&self) -> Result<()> {
        crate::commands::init_logging(self.quiet, self.verbose);

        let files = resolve_patterns(&self.input)?;
        log::info!("scanning {} file(s)", files.len());

        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(File::create(path)?),
            None => Box::new(io::stdout()),
        };
        let mut formatter: Box<dyn EntryFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        };

        let mut progress = ProgressReporter::new(self.quiet || self.output.is_none());
        progress.init_files(files.len() as u64);

        for file in &files {
            let text = FileReader::read_text(file)?;
            let doc = TextBuffer::new(&text);
            let mut registry = Registry::new();
            let mut sink = NoopHighlights::new();
            let display = file.to_string_lossy();
            let summary =
                Scanner::new(&mut registry, &mut sink).scan(&doc, ScanMode::for_path(&display));
            log::debug!("{display}: {} spans in {} lines", summary.spans, summary.lines);

            for entry in registry.entries() {
                formatter.format_entry(&display, entry)?;
            }
            progress.file_completed(&display);
        }
        progress.finish();
        formatter.finish()?;
        Ok(())
    }
}
