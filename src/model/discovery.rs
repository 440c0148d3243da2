//! Featured pick, search and recommendations on top of the completion service.
//!
//! Every operation resolves to a value: failures are logged and replaced by the
//! fallback song or an empty list, so callers never see an error.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::gemini_client::{CompletionService, OracleError};
use super::normalize::{decode_song, decode_songs, FetchKind};
use super::schema::SongSchema;
use super::song::{youtube_thumbnail_url, Song};
use crate::{log_api_request, log_api_result};

pub const GENRES: [&str; 4] = ["K-Pop", "Korean Indie", "K-Drama OST", "Korean Singer-Songwriter"];

/// Draws above this force the first genre
const KPOP_BIAS_THRESHOLD: f64 = 0.6;

const FALLBACK_YOUTUBE_ID: &str = "f6YDKF0LVWw";

/// Known official videos, used as the home view's suggestions list
pub const INITIAL_KOREAN_MVS: [(&str, &str, &str); 10] = [
    ("f6YDKF0LVWw", "NewJeans", "OMG"),
    ("T8D8XUvR99c", "IVE", "I AM"),
    ("UuV2BmJ1p_I", "AKMU", "Love Lee"),
    ("h9uK_57S-hY", "BOL4", "Some"),
    ("SAn0_2_t78M", "IU", "Love wins all"),
    ("D1PvIWdJ8xo", "BIBI", "Bam Yang Gang"),
    ("Habb56J96Ic", "10CM", "Gradation"),
    ("V_Y867-X2I4", "Jannabi", "For Lovers Who Hesitate"),
    ("9Y0S5N8A99c", "DAY6", "You Were Beautiful"),
    ("GD6v61f_n0k", "Melomance", "Love, Maybe"),
];

/// The data-fetch seam between the controller and the oracle
#[async_trait]
pub trait SongOracle: Send + Sync {
    async fn fetch_featured(&self) -> Song;
    async fn search(&self, query: &str) -> Vec<Song>;
    async fn recommend(&self, seed: &Song) -> Vec<Song>;
}

/// Returned whenever the featured pick can not be produced
pub fn fallback_song() -> Song {
    Song {
        id: "fallback".to_string(),
        title: "OMG".to_string(),
        artist: "NewJeans".to_string(),
        album: "OMG".to_string(),
        year: None,
        duration: None,
        thumbnail: youtube_thumbnail_url(FALLBACK_YOUTUBE_ID),
        youtube_id: Some(FALLBACK_YOUTUBE_ID.to_string()),
        youtube_music_url: "https://music.youtube.com/search?q=NewJeans%20OMG".to_string(),
    }
}

/// Genre bucket for the featured prompt, biased towards K-Pop
pub fn pick_genre<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    let first: f64 = rng.random();
    let index = if first > KPOP_BIAS_THRESHOLD {
        0
    } else {
        rng.random_range(0..GENRES.len())
    };
    GENRES[index]
}

pub fn featured_prompt(genre: &str) -> String {
    format!(
        "Pick one random, high-quality Korean music video from {}. It must have a valid YouTube official video.",
        genre
    )
}

pub fn search_prompt(query: &str) -> String {
    format!(
        "Search for songs related to \"{}\". Include both Korean and international artists. \
         Provide the 10 most accurate and popular matches. Sort by popularity and exact title matches first.",
        query
    )
}

pub fn recommendation_prompt(seed: &Song) -> String {
    format!(
        "Recommend 10 songs similar to \"{}\" by \"{}\". Provide diverse suggestions but maintain the same vibe.",
        seed.title, seed.artist
    )
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Production `SongOracle` backed by any `CompletionService`
pub struct DiscoveryService<C: CompletionService> {
    completion: Arc<C>,
    rng: Mutex<StdRng>,
}

impl<C: CompletionService> DiscoveryService<C> {
    pub fn new(completion: Arc<C>) -> Self {
        Self {
            completion,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    #[cfg(test)]
    pub fn with_seed(completion: Arc<C>, seed: u64) -> Self {
        Self {
            completion,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn next_genre(&self) -> &'static str {
        match self.rng.lock() {
            Ok(mut rng) => pick_genre(&mut *rng),
            Err(poisoned) => pick_genre(&mut *poisoned.into_inner()),
        }
    }

    async fn try_featured(&self) -> Result<Song, OracleError> {
        let genre = self.next_genre();
        log_api_request!("featured", genre);
        let schema = SongSchema::featured();
        let body = self
            .completion
            .complete_json(&featured_prompt(genre), schema.to_json())
            .await?;
        Ok(decode_song(&body, &schema, FetchKind::Featured, now_ms())?)
    }

    async fn try_list(&self, prompt: String, schema: SongSchema, kind: FetchKind) -> Result<Vec<Song>, OracleError> {
        let body = self.completion.complete_json(&prompt, schema.to_json()).await?;
        Ok(decode_songs(&body, &schema, kind, now_ms())?)
    }
}

#[async_trait]
impl<C: CompletionService> SongOracle for DiscoveryService<C> {
    async fn fetch_featured(&self) -> Song {
        let result = self.try_featured().await;
        log_api_result!("featured", result);
        result.unwrap_or_else(|_| fallback_song())
    }

    async fn search(&self, query: &str) -> Vec<Song> {
        log_api_request!("search", query);
        let result = self
            .try_list(search_prompt(query), SongSchema::search(), FetchKind::Search)
            .await;
        log_api_result!("search", result);
        result.unwrap_or_default()
    }

    async fn recommend(&self, seed: &Song) -> Vec<Song> {
        log_api_request!("recommend", title = %seed.title, artist = %seed.artist);
        let result = self
            .try_list(recommendation_prompt(seed), SongSchema::recommendations(), FetchKind::Recommendation)
            .await;
        log_api_result!("recommend", result);
        result.unwrap_or_default()
    }
}

#[cfg(test)]
pub mod mocks {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    /// Canned oracle for controller tests
    #[derive(Default)]
    pub struct FixedOracle {
        pub featured: Option<Song>,
        pub results: Vec<Song>,
        /// Per-query overrides of `results`
        pub results_by_query: HashMap<String, Vec<Song>>,
        pub recommendations: Vec<Song>,
        pub search_calls: AtomicUsize,
        pub recommend_calls: AtomicUsize,
        /// Queries that take `slow_delay` to resolve
        pub slow_queries: Vec<String>,
        pub slow_delay: Duration,
    }

    #[async_trait]
    impl SongOracle for FixedOracle {
        async fn fetch_featured(&self) -> Song {
            self.featured.clone().unwrap_or_else(fallback_song)
        }

        async fn search(&self, query: &str) -> Vec<Song> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            if self.slow_queries.iter().any(|q| q == query) {
                tokio::time::sleep(self.slow_delay).await;
            }
            self.results_by_query
                .get(query)
                .unwrap_or(&self.results)
                .clone()
        }

        async fn recommend(&self, _seed: &Song) -> Vec<Song> {
            self.recommend_calls.fetch_add(1, Ordering::SeqCst);
            self.recommendations.clone()
        }
    }
}
