//! hanmark command-line entry point

use clap::Parser;
use hanmark_cli::commands::Commands;

/// Locate hardcoded CJK text, key it, rewrite it, export it
#[derive(Debug, Parser)]
#[command(name = "hanmark", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Scan(args) => args.execute(),
        Commands::Extract(args) => args.execute(),
    };
    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
