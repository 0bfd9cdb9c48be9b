//! Application state and event handling
//!
//! Holds the three inputs of the table (fetch state, dark-mode flag,
//! viewport) plus the cursor, and reacts to keys, resizes and ticks.

use crate::config::Config;
use crate::data::{Event, Fetcher, PreferenceStore, ViewportTracker};
use crate::types::AssetUrls;
use crate::ui::table::{TableBuilder, TableModel, MEMBER_COLUMNS};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::info;

/// Leading clan column plus the score column
const FIXED_COLUMNS: usize = 2;

/// Main application state
pub struct App {
    pub should_quit: bool,
    pub config: Config,
    pub dark: bool,
    pub fetcher: Fetcher,
    pub viewport: ViewportTracker,

    // Cursor ("hover") position: data row and column
    pub cursor_row: usize,
    pub cursor_col: usize,

    preferences: Box<dyn PreferenceStore>,
    builder: TableBuilder,
}

impl App {
    /// Create a new App instance. The preference is read exactly once here.
    pub fn new(
        config: Config,
        preferences: Box<dyn PreferenceStore>,
        fetcher: Fetcher,
        viewport: ViewportTracker,
    ) -> Self {
        let dark = preferences.read();
        let builder = TableBuilder::new(&config.title, AssetUrls::new(&config.asset_host));

        Self {
            should_quit: false,
            config,
            dark,
            fetcher,
            viewport,
            cursor_row: 0,
            cursor_col: 0,
            preferences,
            builder,
        }
    }

    /// Derive the table for the current inputs
    pub fn model(&self) -> TableModel {
        self.builder
            .build(self.fetcher.state(), self.dark, self.viewport.size())
    }

    /// Flip the theme and persist the choice
    pub fn toggle_dark(&mut self) {
        self.dark = !self.dark;
        self.preferences.write(self.dark);
        info!(dark = self.dark, "theme toggled");
    }

    /// Pick up the fetch result once it arrives
    pub fn tick(&mut self) {
        if self.fetcher.poll() {
            self.clamp_cursor();
        }
    }

    /// Dispatch one terminal event. The fetch is checked on every event so
    /// a steady stream of input cannot hold back the result.
    pub fn handle_event(&mut self, event: Event) {
        self.tick();

        match event {
            Event::Tick => {}
            // Only handle key press events (not release)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Key(_) => {}
            Event::Resize(columns, rows) => self.handle_resize(columns, rows),
        }
    }

    pub fn handle_resize(&mut self, columns: u16, rows: u16) {
        self.viewport.on_resize(columns, rows);
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('d') | KeyCode::Char('D') => self.toggle_dark(),
            KeyCode::Char('j') | KeyCode::Down => {
                if self.cursor_row < self.row_count().saturating_sub(1) {
                    self.cursor_row += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor_row = self.cursor_row.saturating_sub(1);
            }
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
                if self.cursor_col < FIXED_COLUMNS + MEMBER_COLUMNS - 1 {
                    self.cursor_col += 1;
                }
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
                self.cursor_col = self.cursor_col.saturating_sub(1);
            }
            KeyCode::Char('g') | KeyCode::Home => self.cursor_row = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.cursor_row = self.row_count().saturating_sub(1);
            }
            _ => {}
        }
    }

    fn row_count(&self) -> usize {
        self.fetcher
            .state()
            .value()
            .map(|payload| payload.groups.len())
            .unwrap_or(0)
    }

    fn clamp_cursor(&mut self) {
        self.cursor_row = self.cursor_row.min(self.row_count().saturating_sub(1));
    }
}
