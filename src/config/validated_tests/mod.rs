//! Tests for validated configuration.

use super::ConfigError;
use super::cli::Cli;
use super::file::FileConfig;
use super::validated::{RunMode, ValidatedConfig};

const TARGET: &str = "https://hooks.example.com/a";

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["pubip-notify"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse a TOML config
fn file(content: &str) -> FileConfig {
    FileConfig::parse_toml(content).unwrap()
}

/// CLI with a single target and nothing else
fn minimal_cli() -> Cli {
    cli(&["--target", TARGET])
}
