//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `screen`: Pure description of the current screen built from model snapshots
//! - `utils`: Shared utility functions (theme, truncation, scrollable lists)
//! - `layout`: Main layout structure (top bar, footer)
//! - `content`: Main content area rendering
//! - `overlays`: Modal overlays (notification toast, help)

mod screen;
mod utils;
mod layout;
mod content;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, Song, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, ui_state: &UiState, content_state: &ContentState, saved: &[Song]) {
        let screen = screen::describe(ui_state, content_state, saved);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Logo + search bar + library
                Constraint::Min(0),    // Main content
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], &screen);
        content::render_main_content(frame, chunks[1], &screen);
        layout::render_footer(frame, chunks[2]);

        if let Some(message) = &screen.notification {
            overlays::render_notification(frame, message);
        }

        // Help popup overlay (if open)
        if screen.show_help {
            overlays::render_help_popup(frame);
        }
    }
}
