//! Terminal host for the masonry engine
//!
//! The host is everything the engine leaves to its caller: it reports the
//! terminal size, turns keys and the mouse wheel into scroll requests, and
//! measures each item once it has been drawn, feeding the real height back.
//! One [`Orchestrator::tick`] runs per frame interval, so a burst of input
//! costs at most one layout pass.

pub mod constants;
pub mod dump;
pub mod masonry;
pub mod measure;
pub mod status;
pub mod styles;

pub use dump::dump_frame;
pub use styles::{ColorConfig, ItemStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::layout::{ColumnSpec, DataChange, Frame, ItemIndex, Orchestrator, ScrollPosition};
use crate::model::{AppError, Item, KeyAction};
use constants::{FALLBACK_WIDTH, STATUS_BAR_HEIGHT};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] crate::model::InputError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    items: Vec<Item>,
    orchestrator: Orchestrator,
    key_bindings: KeyBindings,
    styles: ItemStyles,
    /// Column configuration to return to after `+`/`-`.
    configured_columns: ColumnSpec,
    scroll_step: u16,
    tick: Duration,
    selected: Option<ItemIndex>,
    /// Masonry pane of the last layout (everything above the status line).
    pane: Rect,
    needs_redraw: bool,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(
        items: Vec<Item>,
        config: &ResolvedConfig,
        styles: ItemStyles,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, items, config, styles))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Input is drained as it arrives; a frame
    /// is drawn at most once per tick, and only when something changed.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(self.tick)? {
                if self.handle_event(event::read()?) {
                    return Ok(());
                }
                while event::poll(Duration::ZERO)? {
                    if self.handle_event(event::read()?) {
                        return Ok(());
                    }
                }
            }

            if self.needs_redraw || self.orchestrator.is_dirty() {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build an app around an already initialised terminal.
    ///
    /// Used directly with `TestBackend`; [`TuiApp::new`] wraps it for a real
    /// terminal.
    pub fn with_terminal(
        terminal: Terminal<B>,
        items: Vec<Item>,
        config: &ResolvedConfig,
        styles: ItemStyles,
    ) -> Self {
        let mut orchestrator = Orchestrator::new(config.layout.clone());
        orchestrator.apply_data_change(DataChange::Reset { len: items.len() });

        let mut app = Self {
            terminal,
            items,
            orchestrator,
            key_bindings: KeyBindings::default(),
            styles,
            configured_columns: config.layout.columns.clone(),
            scroll_step: config.scroll_step.max(1),
            tick: Duration::from_millis(config.tick_ms.max(1)),
            selected: None,
            pane: Rect::default(),
            needs_redraw: true,
        };

        let (width, height) = match app.terminal.size() {
            Ok(size) => (size.width, size.height),
            Err(_) => (FALLBACK_WIDTH, 0),
        };
        app.apply_size(width, height);
        app
    }

    /// Handle one terminal event.
    ///
    /// Returns true if app should quit
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                false
            }
            Event::Resize(width, height) => {
                self.handle_resize(width, height);
                false
            }
            _ => false,
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        // Ctrl+C always quits, even if rebound
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.key_bindings.get(key) {
            Some(action) => self.apply_action(action),
            None => {
                trace!(?key, "unbound key");
                false
            }
        }
    }

    fn apply_action(&mut self, action: KeyAction) -> bool {
        let step = f64::from(self.scroll_step);
        let page = f64::from(self.pane.height.saturating_sub(1).max(1));

        match action {
            KeyAction::ScrollDown => self.orchestrator.scroll_by(step),
            KeyAction::ScrollUp => self.orchestrator.scroll_by(-step),
            KeyAction::PageDown => self.orchestrator.scroll_by(page),
            KeyAction::PageUp => self.orchestrator.scroll_by(-page),
            KeyAction::ScrollToTop => self.orchestrator.scroll_to(ScrollPosition::Top),
            KeyAction::ScrollToBottom => self.orchestrator.scroll_to(ScrollPosition::Bottom),
            KeyAction::AddColumn => {
                let count = self.orchestrator.column_count().saturating_add(1);
                self.orchestrator.set_columns(ColumnSpec::Fixed(count));
            }
            KeyAction::RemoveColumn => {
                let count = self.orchestrator.column_count().saturating_sub(1).max(1);
                self.orchestrator.set_columns(ColumnSpec::Fixed(count));
            }
            KeyAction::ResetColumns => {
                self.orchestrator.set_columns(self.configured_columns.clone());
            }
            KeyAction::Remeasure => self.orchestrator.clear_measurements(),
            KeyAction::Quit => return true,
        }

        debug!(?action, "key action");
        self.needs_redraw = true;
        false
    }

    /// Handle a single mouse event
    ///
    /// The wheel scrolls by the configured step; a left click selects the
    /// item under the pointer, or clears the selection on a gap.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let step = f64::from(self.scroll_step);
        match mouse.kind {
            MouseEventKind::ScrollDown => self.orchestrator.scroll_by(step),
            MouseEventKind::ScrollUp => self.orchestrator.scroll_by(-step),
            MouseEventKind::Down(MouseButton::Left) => {
                self.selected = self.item_at(mouse.column, mouse.row);
                self.needs_redraw = true;
            }
            _ => {}
        }
    }

    /// Item drawn at a terminal cell in the current frame.
    fn item_at(&self, column: u16, row: u16) -> Option<ItemIndex> {
        let frame = self.orchestrator.frame();
        let (x, y) = masonry::content_point(self.pane, column, row, frame.scroll_offset())?;
        frame.layout().hit_test(x, y).index()
    }

    /// Handle a terminal resize event
    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "terminal resized");
        self.apply_size(width, height);
    }

    /// Forward the terminal size to the engine: the full width is the
    /// container, everything above the status line is the viewport.
    fn apply_size(&mut self, width: u16, height: u16) {
        let width = if width > 0 { width } else { FALLBACK_WIDTH };
        let pane = Rect::new(0, 0, width, height.saturating_sub(STATUS_BAR_HEIGHT));
        if pane != self.pane {
            self.pane = pane;
            self.needs_redraw = true;
        }
        self.orchestrator.set_container_width(f64::from(pane.width));
        self.orchestrator.set_viewport_size(f64::from(pane.height));
    }

    /// Run the pending pass, render the frame, then report measurements
    /// for what was drawn.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        self.apply_size(size.width, size.height);

        self.orchestrator.tick();
        let frame = self.orchestrator.frame();
        let status = status::status_text(&frame, self.orchestrator.store());
        let pane = self.pane;
        let items = &self.items;
        let selected = self.selected;
        let styles = &self.styles;

        self.terminal.draw(|f| {
            let area = f.area();
            let pane = pane.intersection(area);
            let status_area = Rect::new(
                area.x,
                area.bottom().saturating_sub(STATUS_BAR_HEIGHT),
                area.width,
                STATUS_BAR_HEIGHT.min(area.height),
            );
            let buf = f.buffer_mut();
            masonry::render_masonry(buf, pane, &frame, items, selected, styles);
            status::render_status(buf, status_area, &status, styles);
        })?;

        self.report_measurements(&frame);
        self.needs_redraw = false;
        Ok(())
    }

    /// Report the wrapped height of every drawn item whose stored height is
    /// a placeholder or disagrees with what was just rendered.
    fn report_measurements(&mut self, frame: &Frame) {
        for visible in frame.items() {
            let Some(item) = self.items.get(visible.index.get()) else {
                continue;
            };
            let width = masonry::item_cells_width(visible);
            let measured = f64::from(measure::measure_height(item.text(), width));
            let stored = self.orchestrator.store().get(visible.index);
            if stored.is_estimate || stored.height != measured {
                self.orchestrator.report_height(visible.index, measured);
            }
        }
    }

    /// Engine state, for inspection.
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Currently selected item.
    pub fn selected(&self) -> Option<ItemIndex> {
        self.selected
    }

    /// The terminal, for inspecting a test backend's buffer.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Mutable terminal access, for resizing a test backend.
    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_items(
    items: Vec<Item>,
    config: &ResolvedConfig,
    styles: ItemStyles,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(items, config, styles)?;
    let result = app.run();
    restore_terminal()?;
    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
