//! Masonry styling configuration.
//!
//! Borders tell the user what the engine knows about each item: a dim border
//! for a placeholder height, a normal one once measured, and a highlighted
//! one for the selected item.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Explicitly enabled or disabled.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== ItemStyles =====

/// Styles for item blocks and the status bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemStyles {
    measured_border: Style,
    estimate_border: Style,
    selected_border: Style,
    status: Style,
}

impl ItemStyles {
    /// Styles for the given color configuration.
    ///
    /// Without colors, modifiers alone distinguish the states.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                measured_border: Style::default().fg(Color::Gray),
                estimate_border: Style::default().fg(Color::DarkGray),
                selected_border: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                status: Style::default().fg(Color::Black).bg(Color::Gray),
            }
        } else {
            Self {
                measured_border: Style::default(),
                estimate_border: Style::default().add_modifier(Modifier::DIM),
                selected_border: Style::default().add_modifier(Modifier::BOLD),
                status: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }

    /// Border style for an item.
    pub fn border(&self, is_estimate: bool, is_selected: bool) -> Style {
        if is_selected {
            self.selected_border
        } else if is_estimate {
            self.estimate_border
        } else {
            self.measured_border
        }
    }

    /// Status bar style.
    pub fn status(&self) -> Style {
        self.status
    }
}

impl Default for ItemStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
