//! Saving songs and copying them to the clipboard

use crate::model::Song;
use super::AppController;

impl AppController {
    pub async fn toggle_save(&self, song: &Song) {
        let saved = self.model.toggle_saved(song).await;
        let status = if saved { "added to" } else { "removed from" };
        tracing::info!(title = %song.title, artist = %song.artist, status, "Library updated");
    }

    /// Writes "<title> - <artist>"; failures are only logged
    pub async fn copy_to_clipboard(&self, song: &Song) {
        let text = song.clipboard_text();
        match self.clipboard.set_text(&text) {
            Ok(()) => self.model.notify(format!("Copied: {}", text)).await,
            Err(e) => tracing::error!(error = %e, "Failed to copy to clipboard"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::clipboard::mocks::RecordingClipboard;
    use crate::controller::testing::controller_with;
    use crate::controller::AppController;
    use crate::model::testing::{sample_song, FixedOracle};
    use crate::model::{AppModel, LibraryStore};

    #[tokio::test]
    async fn test_toggle_save_matches_on_title_and_artist() {
        let (controller, _, _) = controller_with(FixedOracle::default());
        controller.toggle_save(&sample_song("search-0-1", "Love, Maybe", "Melomance")).await;
        controller.toggle_save(&sample_song("rec-7-2", "Love, Maybe", "Melomance")).await;
        assert!(controller.model.get_saved_songs().await.is_empty());
    }

    #[tokio::test]
    async fn test_copy_shows_confirmation() {
        let (controller, _, clipboard) = controller_with(FixedOracle::default());
        controller.copy_to_clipboard(&sample_song("1", "Some", "BOL4")).await;

        assert_eq!(*clipboard.writes.lock().unwrap(), vec!["Some - BOL4".to_string()]);
        let notification = controller.model.get_ui_state().await.notification.unwrap();
        assert_eq!(notification.message, "Copied: Some - BOL4");
    }

    #[tokio::test]
    async fn test_copy_failure_changes_nothing() {
        let model = Arc::new(AppModel::new(LibraryStore::in_memory()));
        let clipboard = Arc::new(RecordingClipboard { fail: true, ..Default::default() });
        let controller = AppController::new(model, Arc::new(FixedOracle::default()), clipboard);

        controller.copy_to_clipboard(&sample_song("1", "Some", "BOL4")).await;
        assert!(controller.model.get_ui_state().await.notification.is_none());
    }

    #[tokio::test]
    async fn test_removing_last_library_entry_keeps_cursor_valid() {
        let (controller, _, _) = controller_with(FixedOracle::default());
        controller.toggle_save(&sample_song("1", "Gradation", "10CM")).await;
        controller.toggle_save(&sample_song("2", "Some", "BOL4")).await;
        controller.open_library().await;
        controller.model.content_move_down().await;

        let highlighted = controller.model.get_highlighted_song().await.unwrap();
        assert_eq!(highlighted.title, "Some");
        controller.toggle_save(&highlighted).await;

        assert_eq!(controller.model.get_ui_state().await.selected_index, 0);
        assert_eq!(controller.model.get_highlighted_song().await.unwrap().title, "Gradation");
    }
}
