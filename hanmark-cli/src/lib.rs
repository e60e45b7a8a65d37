//! Hanmark CLI library
//!
//! This library provides the command-line interface for the hanmark CJK
//! fragment extraction and rewriting system.

pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod glossary;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
