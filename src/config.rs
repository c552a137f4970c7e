//! Configuration management for the estimator.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML config file (explicit path, project file, user config dir)
//!
//! Command-line flags override the config file, which overrides defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::machine::{FeedUnits, RunOptions, UnknownAxisPolicy};

/// Name of the per-project config file, looked up from the working directory upwards
pub const PROJECT_CONFIG_FILE: &str = ".gcode-estimate.toml";

/// How results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Command-line arguments for the estimator
#[derive(Debug, Parser)]
#[command(name = "gcode-estimate")]
#[command(about = "Estimate distance, time and material of G-code toolpaths")]
#[command(version)]
pub struct Args {
    /// G-code files to estimate ("-" reads standard input)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Unit of the F word
    #[arg(long, value_enum)]
    pub feed_units: Option<FeedUnits>,

    /// Policy for moves on axes that were never homed or set
    #[arg(long, value_enum)]
    pub unknown_axes: Option<UnknownAxisPolicy>,

    /// Explicit config file (disables the default lookup)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level for diagnostics on stderr
    #[arg(long, help = "Log level (trace, debug, info, warn, error)")]
    pub log_level: Option<String>,
}

/// Contents of a config file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub format: Option<OutputFormat>,
    pub feed_units: Option<FeedUnits>,
    pub unknown_axes: Option<UnknownAxisPolicy>,
    pub log_level: Option<String>,
}

impl FileConfig {
    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub files: Vec<PathBuf>,
    pub format: OutputFormat,
    pub run_options: RunOptions,
    pub log_level: String,
    /// Config file that was applied, if any
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let config_file = match &args.config {
            Some(path) => Some(path.clone()),
            None => {
                let cwd = std::env::current_dir().context("failed to get working directory")?;
                discover_config_file(&cwd)
            }
        };

        let file = match &config_file {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        Ok(Self::merge(args, file, config_file))
    }

    /// Layer arguments over a config file
    pub fn merge(args: Args, file: FileConfig, config_file: Option<PathBuf>) -> Self {
        Config {
            files: args.files,
            format: args.format.or(file.format).unwrap_or_default(),
            run_options: RunOptions {
                feed_units: args.feed_units.or(file.feed_units).unwrap_or_default(),
                unknown_axes: args.unknown_axes.or(file.unknown_axes).unwrap_or_default(),
            },
            log_level: args
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| "warn".to_string()),
            config_file,
        }
    }

    pub fn has_config_file(&self) -> bool {
        self.config_file.is_some()
    }
}

/// Find a config file for a run started in `start_dir`
///
/// The nearest project file wins; otherwise the user-level file under the
/// platform config directory is used when it exists.
pub fn discover_config_file(start_dir: &Path) -> Option<PathBuf> {
    if let Some(project) = find_project_config(start_dir) {
        return Some(project);
    }

    let user = dirs::config_dir()?.join("gcode-estimate").join("config.toml");
    user.is_file().then_some(user)
}

/// Walk up from `start_dir` looking for a project config file
pub fn find_project_config(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}
