//! Navigation-related controller methods (featured pick, search, song detail)

use crate::model::{Song, INITIAL_KOREAN_MVS};
use super::AppController;

impl AppController {
    pub async fn load_featured(&self) {
        let ticket = self.model.begin_featured().await;
        let song = self.oracle.fetch_featured().await;
        tracing::info!(title = %song.title, artist = %song.artist, "Featured song loaded");
        self.model.finish_featured(ticket, song).await;
    }

    /// Searches for the current query; blank queries do nothing
    pub async fn perform_search(&self) {
        let query = self.model.search_query().await;
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        tracing::debug!(query, "Performing search");
        let ticket = self.model.begin_search().await;
        let results = self.oracle.search(query).await;
        tracing::info!(query, results = results.len(), "Search completed");
        self.model.finish_search(ticket, results).await;
    }

    /// Fills the search bar from the home view's starter list and searches
    pub async fn search_starter(&self, index: usize) {
        let Some((_, artist, title)) = INITIAL_KOREAN_MVS.get(index) else {
            return;
        };
        self.model.update_search_query(format!("{} {}", artist, title)).await;
        self.perform_search().await;
    }

    pub async fn select_song(&self, song: Song) {
        tracing::debug!(title = %song.title, artist = %song.artist, "Opening song detail");
        let ticket = self.model.select_song(song.clone()).await;
        let recommendations = self.oracle.recommend(&song).await;
        self.model.finish_recommendations(ticket, recommendations).await;
    }

    pub async fn refresh_recommendations(&self) {
        let Some((ticket, song)) = self.model.begin_recommendations().await else {
            return;
        };
        tracing::debug!(title = %song.title, "Refreshing recommendations");
        let recommendations = self.oracle.recommend(&song).await;
        self.model.finish_recommendations(ticket, recommendations).await;
    }

    pub async fn go_home(&self) {
        self.model.go_home().await;
    }

    pub async fn open_library(&self) {
        self.model.open_library().await;
    }

    pub async fn go_back(&self) {
        self.model.navigate_back().await;
    }
}
