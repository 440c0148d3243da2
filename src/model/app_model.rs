//! Main application model with state management

use std::sync::Arc;
use tokio::sync::Mutex;

use super::discovery::INITIAL_KOREAN_MVS;
use super::content::{ContentState, FetchSlot, FetchTicket, ReturnPoint};
use super::library::{Library, LibraryStore};
use super::song::Song;
use super::types::{ActiveSection, Notification, UiState, ViewState};

/// Main application model containing all state
pub struct AppModel {
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    library: Arc<Mutex<Library>>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(store: LibraryStore) -> Self {
        Self {
            ui_state: Arc::new(Mutex::new(UiState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            library: Arc::new(Mutex::new(Library::open(store))),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // UI State
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn toggle_active_section(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.toggle();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn search_query(&self) -> String {
        self.ui_state.lock().await.search_query.clone()
    }

    pub async fn update_search_query(&self, query: String) {
        let mut state = self.ui_state.lock().await;
        state.search_query = query;
    }

    pub async fn append_to_search(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        state.search_query.push(c);
    }

    pub async fn backspace_search(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_query.pop();
    }

    pub async fn notify(&self, message: impl Into<String>) {
        let mut state = self.ui_state.lock().await;
        state.notification = Some(Notification::new(message));
    }

    pub async fn auto_clear_notification(&self) {
        let mut state = self.ui_state.lock().await;
        if state.notification.as_ref().is_some_and(|n| n.is_expired()) {
            state.notification = None;
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn current_view(&self) -> ViewState {
        self.content_state.lock().await.view
    }

    async fn set_view(&self, view: ViewState, selected_index: usize) {
        self.content_state.lock().await.view = view;
        self.ui_state.lock().await.selected_index = selected_index;
    }

    pub async fn go_home(&self) {
        self.set_view(ViewState::Main, 0).await;
        self.content_state.lock().await.detail_return = None;
        self.update_search_query(String::new()).await;
    }

    pub async fn open_library(&self) {
        self.set_view(ViewState::Saved, 0).await;
        self.set_active_section(ActiveSection::Content).await;
    }

    /// Search → main, detail → where it was entered from, library → main
    pub async fn navigate_back(&self) {
        let (view, detail_return) = {
            let state = self.content_state.lock().await;
            (state.view, state.detail_return)
        };
        match view {
            ViewState::Main => {}
            ViewState::Search | ViewState::Saved => self.set_view(ViewState::Main, 0).await,
            ViewState::Detail => {
                let target = detail_return.unwrap_or(ReturnPoint { view: ViewState::Main, selected_index: 0 });
                self.content_state.lock().await.detail_return = None;
                self.set_view(target.view, target.selected_index).await;
            }
        }
    }

    pub async fn content_move_up(&self) {
        let mut state = self.ui_state.lock().await;
        state.selected_index = state.selected_index.saturating_sub(1);
    }

    pub async fn content_move_down(&self) {
        let len = self.visible_len().await;
        let mut state = self.ui_state.lock().await;
        if state.selected_index + 1 < len {
            state.selected_index += 1;
        }
    }

    /// Length of the list the cursor moves over; the starter list on the main view
    async fn visible_len(&self) -> usize {
        let library = self.library.lock().await;
        let content = self.content_state.lock().await;
        match content.view {
            ViewState::Main => INITIAL_KOREAN_MVS.len(),
            _ => content.visible_songs(library.songs()).len(),
        }
    }

    /// Song under the cursor; the featured song on the main view
    pub async fn get_highlighted_song(&self) -> Option<Song> {
        let index = self.ui_state.lock().await.selected_index;
        let library = self.library.lock().await;
        let content = self.content_state.lock().await;
        match content.view {
            ViewState::Main => content.featured_song.clone(),
            _ => content.visible_songs(library.songs()).get(index).cloned(),
        }
    }

    pub async fn get_selected_song(&self) -> Option<Song> {
        self.content_state.lock().await.selected_song.clone()
    }

    // ========================================================================
    // Fetch lifecycle
    // ========================================================================

    pub async fn begin_featured(&self) -> FetchTicket {
        self.content_state.lock().await.begin_fetch(FetchSlot::Featured)
    }

    pub async fn finish_featured(&self, ticket: FetchTicket, song: Song) {
        let mut state = self.content_state.lock().await;
        if state.finish_fetch(ticket) {
            state.featured_song = Some(song);
        } else {
            tracing::debug!(generation = ticket.generation, "Dropping stale featured song");
        }
    }

    pub async fn begin_search(&self) -> FetchTicket {
        let ticket = {
            let mut state = self.content_state.lock().await;
            state.view = ViewState::Search;
            state.detail_return = None;
            state.begin_fetch(FetchSlot::Search)
        };
        let mut ui = self.ui_state.lock().await;
        ui.selected_index = 0;
        ui.active_section = ActiveSection::Content;
        ticket
    }

    pub async fn finish_search(&self, ticket: FetchTicket, results: Vec<Song>) {
        let mut state = self.content_state.lock().await;
        if state.finish_fetch(ticket) {
            state.search_results = results;
            let on_search = state.view == ViewState::Search;
            drop(state);
            if on_search {
                self.ui_state.lock().await.selected_index = 0;
            }
        } else {
            tracing::debug!(generation = ticket.generation, "Dropping stale search results");
        }
    }

    /// Opens the detail view for `song` and registers its recommendation fetch
    pub async fn select_song(&self, song: Song) -> FetchTicket {
        let previous_index = self.ui_state.lock().await.selected_index;
        let ticket = {
            let mut state = self.content_state.lock().await;
            if state.view != ViewState::Detail {
                state.detail_return = Some(ReturnPoint { view: state.view, selected_index: previous_index });
            }
            state.selected_song = Some(song);
            state.view = ViewState::Detail;
            state.begin_fetch(FetchSlot::Recommendations)
        };
        self.ui_state.lock().await.selected_index = 0;
        ticket
    }

    /// Registers a recommendation fetch for the current selection
    pub async fn begin_recommendations(&self) -> Option<(FetchTicket, Song)> {
        let mut state = self.content_state.lock().await;
        let song = state.selected_song.clone()?;
        Some((state.begin_fetch(FetchSlot::Recommendations), song))
    }

    pub async fn finish_recommendations(&self, ticket: FetchTicket, recommendations: Vec<Song>) {
        let mut state = self.content_state.lock().await;
        if state.finish_fetch(ticket) {
            state.recommendations = recommendations;
            let on_detail = state.view == ViewState::Detail;
            drop(state);
            if on_detail {
                self.ui_state.lock().await.selected_index = 0;
            }
        } else {
            tracing::debug!(generation = ticket.generation, "Dropping stale recommendations");
        }
    }

    // ========================================================================
    // Library
    // ========================================================================

    pub async fn get_saved_songs(&self) -> Vec<Song> {
        self.library.lock().await.songs().to_vec()
    }

    /// Returns whether the song is saved afterwards
    pub async fn toggle_saved(&self, song: &Song) -> bool {
        let (saved, remaining) = {
            let mut library = self.library.lock().await;
            let saved = library.toggle(song);
            (saved, library.len())
        };

        // Keep the cursor inside the list after a removal from the library view
        if self.current_view().await == ViewState::Saved {
            let mut ui = self.ui_state.lock().await;
            ui.selected_index = ui.selected_index.min(remaining.saturating_sub(1));
        }
        saved
    }
}
