//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (view state, UI state, notifications)
//! - `song`: The song record and its URL templates
//! - `content`: Song data shown by the views and fetch bookkeeping
//! - `library`: Saved songs and the key-value persistence adapter
//! - `schema`: Response schemas sent to the oracle
//! - `normalize`: Strict decoding of oracle output into songs
//! - `gemini_client`: Gemini API client
//! - `discovery`: Featured pick, search and recommendations
//! - `app_model`: Main application model with state management methods

mod types;
mod song;
mod content;
mod library;
mod schema;
mod normalize;
mod gemini_client;
mod discovery;
mod app_model;

// Re-export all public types for convenient access
pub use types::{ActiveSection, UiState, ViewState};
#[cfg(test)]
pub use types::Notification;

pub use song::Song;

pub use content::ContentState;

pub use library::{FileStorage, LibraryStore};

pub use gemini_client::GeminiClient;

pub use discovery::{DiscoveryService, SongOracle, INITIAL_KOREAN_MVS};

pub use app_model::AppModel;
