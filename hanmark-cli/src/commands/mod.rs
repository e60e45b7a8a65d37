//! CLI command implementations

use clap::Subcommand;

pub mod extract;
pub mod scan;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan sources for hardcoded CJK fragments
    Scan(scan::ScanArgs),

    /// Scan, assign keys, rewrite documents, and export message files
    Extract(extract::ExtractArgs),
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(quiet: bool, verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level),
        )
        .try_init();
    }
}
