//! Configuration file loading for buildscope.
//!
//! Discovers and loads `buildscope.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "buildscope.toml";

/// Default directory scanned for `outcome.json` files.
pub const DEFAULT_OUTCOMES_DIR: &str = "artifacts/buildscope";

/// Output format for commands that print summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Top-level configuration from buildscope.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildscopeConfig {
    pub output: OutputConfig,
    pub results: ResultsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when `--format` is not given.
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResultsConfig {
    /// Directory scanned for `outcome.json` files, relative to the working directory.
    pub dir: Utf8PathBuf,

    /// Exit with code 2 when the aggregated results report failure.
    pub fail_on_error: bool,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            dir: Utf8PathBuf::from(DEFAULT_OUTCOMES_DIR),
            fail_on_error: false,
        }
    }
}

/// Discover the buildscope.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a buildscope.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<BuildscopeConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<BuildscopeConfig> {
    let config: BuildscopeConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load the explicit config if given, else discover one in `dir`, else use defaults.
pub fn load_or_default(
    explicit: Option<&Utf8Path>,
    dir: &Utf8Path,
) -> anyhow::Result<BuildscopeConfig> {
    match explicit.map(Utf8Path::to_path_buf).or_else(|| discover_config(dir)) {
        Some(path) => load_config(&path),
        None => Ok(BuildscopeConfig::default()),
    }
}

/// Settings after combining the config file with CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    pub format: OutputFormat,
    pub results_dir: Utf8PathBuf,
    pub fail_on_error: bool,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: BuildscopeConfig,
}

impl ConfigMerger {
    pub fn new(config: BuildscopeConfig) -> Self {
        Self { config }
    }

    /// Merge with CLI arguments.
    ///
    /// `format` and `dir` replace config values when given; `fail_on_error` is enabled by
    /// either source.
    pub fn merge(
        self,
        cli_format: Option<OutputFormat>,
        cli_dir: Option<&Utf8Path>,
        cli_fail_on_error: bool,
    ) -> MergedConfig {
        MergedConfig {
            format: cli_format.unwrap_or(self.config.output.format),
            results_dir: cli_dir
                .map(Utf8Path::to_path_buf)
                .unwrap_or(self.config.results.dir),
            fail_on_error: cli_fail_on_error || self.config.results.fail_on_error,
        }
    }
}
