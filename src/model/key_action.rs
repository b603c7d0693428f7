//! Domain-level keyboard actions independent of key bindings.

/// User intent, decoupled from the physical key.
///
/// The mapping from `crossterm::event::KeyEvent` to `KeyAction` is handled
/// by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll up by one step. Default: k/↑
    ScrollUp,
    /// Scroll down by one step. Default: j/↓
    ScrollDown,
    /// Scroll up by one viewport. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one viewport. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the top. Default: g/Home
    ScrollToTop,
    /// Jump to the bottom. Default: G/End
    ScrollToBottom,

    // Columns
    /// Pin one more column than currently shown. Default: +
    AddColumn,
    /// Pin one fewer column (never below one). Default: -
    RemoveColumn,
    /// Return to the configured column setting. Default: 0
    ResetColumns,

    // Measurement
    /// Drop every measurement and measure again. Default: r
    Remeasure,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// True for actions that only move the viewport.
    pub fn is_scroll(&self) -> bool {
        matches!(
            self,
            KeyAction::ScrollUp
                | KeyAction::ScrollDown
                | KeyAction::PageUp
                | KeyAction::PageDown
                | KeyAction::ScrollToTop
                | KeyAction::ScrollToBottom
        )
    }
}
