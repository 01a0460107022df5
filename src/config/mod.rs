//! Configuration layer for pubip-notify.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - Configuration file parsing, TOML or JSON ([`FileConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **Config file** - `--config`, or `pubip-notify.toml` in the working directory
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! List options (`--target`, `--lookup-url`) **replace** the file's lists
//! entirely rather than being merged with them.
//!
//! # File-Only Options
//!
//! Request shaping (`[notify]`), the retry policy (`[retry]`), the lookup
//! timeout and the self-test timing have no CLI flags.

mod cli;
pub mod defaults;
mod error;
mod file;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use file::{FileConfig, default_config_template};
pub use validated::{RunMode, ValidatedConfig, write_default_config};
