//! Configuration file loading with precedence handling.

use crate::layout::{ColumnSpec, LayoutOptions, PlacementStrategy};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "WATERFALL_CONFIG";

/// Environment variable pinning a fixed column count.
pub const COLUMNS_ENV: &str = "WATERFALL_COLUMNS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path is empty or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/waterfall/config.toml`:
///
/// ```toml
/// gap = 1
/// padding = 1
/// estimate_height = 6
/// placement = "auto"
///
/// [columns]
/// default = 1
/// breakpoints = [
///     { min_width = 60, count = 2 },
///     { min_width = 100, count = 3 },
/// ]
/// ```
///
/// `columns = 3` pins a fixed count instead.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Fixed count or breakpoint table.
    #[serde(default)]
    pub columns: Option<ColumnSpec>,

    /// Space between columns and stacked items, in cells.
    #[serde(default)]
    pub gap: Option<f64>,

    /// Space around the content, in cells.
    #[serde(default)]
    pub padding: Option<f64>,

    /// Placeholder height for unmeasured items.
    #[serde(default)]
    pub estimate_height: Option<f64>,

    /// Extra rows materialized above and below the viewport.
    #[serde(default)]
    pub overscan: Option<f64>,

    /// Keep the first visible item steady while measurements arrive.
    #[serde(default)]
    pub anchor_scroll: Option<bool>,

    /// Shortest-column strategy.
    #[serde(default)]
    pub placement: Option<PlacementStrategy>,

    /// Rows moved per scroll step.
    #[serde(default)]
    pub scroll_step: Option<u16>,

    /// Frame interval in milliseconds.
    #[serde(default)]
    pub tick_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Engine options.
    pub layout: LayoutOptions,
    /// Rows moved per scroll step.
    pub scroll_step: u16,
    /// Frame interval in milliseconds.
    pub tick_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            scroll_step: 3,
            tick_ms: 16,
            log_file_path: default_log_path(),
        }
    }
}

/// Values given on the command line. `None` leaves the lower layer alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `--columns`
    pub columns: Option<usize>,
    /// `--gap`
    pub gap: Option<f64>,
    /// `--padding`
    pub padding: Option<f64>,
    /// `--estimate`
    pub estimate_height: Option<f64>,
    /// `--overscan`
    pub overscan: Option<f64>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/waterfall/waterfall.log` on Linux, or the
/// platform equivalent. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("waterfall").join("waterfall.log"),
        None => PathBuf::from("waterfall.log"),
    }
}

/// Resolve default config file path.
///
/// Returns `~/.config/waterfall/config.toml` on Linux, the platform
/// equivalent elsewhere, or `None` if no config directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("waterfall").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if the file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `WATERFALL_CONFIG` environment variable
/// 3. Default path `~/.config/waterfall/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error if a config file exists but cannot be read or parsed, or
/// if `WATERFALL_CONFIG` is set but empty.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let layout = defaults.layout;
    ResolvedConfig {
        layout: LayoutOptions {
            columns: config.columns.unwrap_or(layout.columns),
            gap: config.gap.unwrap_or(layout.gap),
            padding: config.padding.unwrap_or(layout.padding),
            estimate_height: config.estimate_height.unwrap_or(layout.estimate_height),
            overscan: config.overscan.or(layout.overscan),
            anchor_scroll: config.anchor_scroll.unwrap_or(layout.anchor_scroll),
            strategy: config.placement.unwrap_or(layout.strategy),
        },
        scroll_step: config.scroll_step.unwrap_or(defaults.scroll_step),
        tick_ms: config.tick_ms.unwrap_or(defaults.tick_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `WATERFALL_COLUMNS`: pin a fixed column count (unparsable values are
///   logged and ignored)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(COLUMNS_ENV) {
        match raw.trim().parse::<usize>() {
            Ok(count) if count > 0 => config.layout.columns = ColumnSpec::Fixed(count),
            _ => warn!(value = %raw, "ignoring invalid {COLUMNS_ENV}"),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: &CliOverrides) -> ResolvedConfig {
    if let Some(count) = cli.columns {
        config.layout.columns = ColumnSpec::Fixed(count);
    }
    if let Some(gap) = cli.gap {
        config.layout.gap = gap;
    }
    if let Some(padding) = cli.padding {
        config.layout.padding = padding;
    }
    if let Some(estimate) = cli.estimate_height {
        config.layout.estimate_height = estimate;
    }
    if let Some(overscan) = cli.overscan {
        config.layout.overscan = Some(overscan);
    }

    config
}

/// Run the full chain: file → defaults → env → CLI.
///
/// # Errors
///
/// See [`load_config_with_precedence`].
pub fn resolve_config(
    config_path: Option<PathBuf>,
    cli: &CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let config_file = load_config_with_precedence(config_path)?;
    let merged = merge_config(config_file);
    let with_env = apply_env_overrides(merged);
    Ok(apply_cli_overrides(with_env, cli))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
