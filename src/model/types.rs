//! Core type definitions for the application

use std::time::{Duration, Instant};

/// How long a notification stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Which screen is rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Main,
    Search,
    Detail,
    Saved,
}

/// Which part of the UI receives key input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSection {
    #[default]
    Search,
    Content,
}

impl ActiveSection {
    pub fn toggle(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Content,
            ActiveSection::Content => ActiveSection::Search,
        }
    }
}

/// A short-lived message, e.g. clipboard confirmation
#[derive(Clone, Debug)]
pub struct Notification {
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > NOTIFICATION_TTL
    }
}

/// UI state that is not song data
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    /// Cursor into the list of the current view
    pub selected_index: usize,
    pub notification: Option<Notification>,
    pub show_help_popup: bool,
}
