//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and dispatches oracle fetches.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `navigation`: Featured pick, search, song detail and view switching
//! - `library`: Saving songs and copying them to the clipboard

mod input;
mod navigation;
mod library;

use std::sync::Arc;

use crate::clipboard::ClipboardSink;
use crate::model::{AppModel, SongOracle};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
    oracle: Arc<dyn SongOracle>,
    clipboard: Arc<dyn ClipboardSink>,
}

impl AppController {
    pub fn new(model: Arc<AppModel>, oracle: Arc<dyn SongOracle>, clipboard: Arc<dyn ClipboardSink>) -> Self {
        Self {
            model,
            oracle,
            clipboard,
        }
    }

    /// Runs a fetch in the background so the UI keeps drawing the loading state
    pub(crate) fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce(AppController) -> Fut,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(task(self.clone()));
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use super::AppController;
    use crate::clipboard::mocks::RecordingClipboard;
    use crate::model::testing::FixedOracle;
    use crate::model::{AppModel, LibraryStore};

    pub fn controller_with(oracle: FixedOracle) -> (AppController, Arc<FixedOracle>, Arc<RecordingClipboard>) {
        let oracle = Arc::new(oracle);
        let clipboard = Arc::new(RecordingClipboard::default());
        let model = Arc::new(AppModel::new(LibraryStore::in_memory()));
        let controller = AppController::new(model, oracle.clone(), clipboard.clone());
        (controller, oracle, clipboard)
    }
}
