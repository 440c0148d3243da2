//! Pure description of what is on screen.
//!
//! `describe` turns model snapshots into a `Screen`; the ratatui renderers only
//! lay that description out, so everything shown can be checked without a terminal.

use crate::model::{ActiveSection, ContentState, Song, UiState, ViewState, INITIAL_KOREAN_MVS};

pub const LOGO: &str = "K-PULSE";
pub const FOOTER: &str = "© 2024 K-PULSE Music Digging Service. All rights reserved.";
pub const LOADING_TEXT: &str = "디깅 중...";
pub const EMPTY_LIBRARY_TEXT: &str = "저장된 노래가 없습니다. 디깅을 시작해보세요!";
pub const LIBRARY_HINT: &str = "Enter: copy title  x: remove";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    pub search_query: String,
    pub search_focused: bool,
    pub library_label: String,
    pub library_active: bool,
    pub content_focused: bool,
    pub body: Body,
    pub notification: Option<String>,
    pub show_help: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    Loading,
    Main {
        featured: Option<FeaturedCard>,
        starters: Vec<String>,
        selected: usize,
    },
    Search {
        rows: Vec<SongRow>,
        selected: usize,
    },
    Detail {
        card: DetailCard,
        recommendations: Vec<SongRow>,
        selected: usize,
    },
    Saved {
        rows: Vec<SongRow>,
        selected: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeaturedCard {
    pub title: String,
    pub artist: String,
    pub embed_url: Option<String>,
    pub music_url: String,
    pub saved: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailCard {
    pub title: String,
    pub artist: String,
    pub meta: String,
    pub thumbnail: String,
    pub music_url: String,
    pub saved: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongRow {
    pub title: String,
    pub subtitle: String,
    pub saved: bool,
}

fn is_saved(song: &Song, saved: &[Song]) -> bool {
    saved.iter().any(|s| s.same_track(song))
}

fn join_meta<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" • ")
}

fn row(song: &Song, subtitle: String, saved: &[Song]) -> SongRow {
    SongRow {
        title: song.title.clone(),
        subtitle,
        saved: is_saved(song, saved),
    }
}

fn search_row(song: &Song, saved: &[Song]) -> SongRow {
    let subtitle = join_meta([
        Some(song.artist.as_str()),
        Some(song.album.as_str()),
        song.duration.as_deref(),
    ]);
    row(song, subtitle, saved)
}

fn artist_row(song: &Song, saved: &[Song]) -> SongRow {
    row(song, song.artist.clone(), saved)
}

fn featured_card(song: &Song, saved: &[Song]) -> FeaturedCard {
    FeaturedCard {
        title: song.title.clone(),
        artist: song.artist.clone(),
        embed_url: song.embed_url(),
        music_url: song.youtube_music_url.clone(),
        saved: is_saved(song, saved),
    }
}

fn detail_card(song: &Song, saved: &[Song]) -> DetailCard {
    DetailCard {
        title: song.title.clone(),
        artist: song.artist.clone(),
        meta: join_meta([Some(song.album.as_str()), song.year.as_deref()]),
        thumbnail: song.thumbnail.clone(),
        music_url: song.youtube_music_url.clone(),
        saved: is_saved(song, saved),
    }
}

fn describe_body(ui: &UiState, content: &ContentState, saved: &[Song]) -> Body {
    if content.is_loading {
        return Body::Loading;
    }

    let selected = ui.selected_index;
    match content.view {
        ViewState::Main => Body::Main {
            featured: content.featured_song.as_ref().map(|s| featured_card(s, saved)),
            starters: INITIAL_KOREAN_MVS
                .iter()
                .map(|(_, artist, title)| format!("{} - {}", artist, title))
                .collect(),
            selected,
        },
        ViewState::Search => Body::Search {
            rows: content.search_results.iter().map(|s| search_row(s, saved)).collect(),
            selected,
        },
        ViewState::Detail => match &content.selected_song {
            Some(song) => Body::Detail {
                card: detail_card(song, saved),
                recommendations: content.recommendations.iter().map(|s| artist_row(s, saved)).collect(),
                selected,
            },
            // Nothing selected yet
            None => Body::Main {
                featured: None,
                starters: Vec::new(),
                selected: 0,
            },
        },
        ViewState::Saved => Body::Saved {
            rows: saved.iter().map(|s| artist_row(s, saved)).collect(),
            selected,
        },
    }
}

pub fn describe(ui: &UiState, content: &ContentState, saved: &[Song]) -> Screen {
    Screen {
        search_query: ui.search_query.clone(),
        search_focused: ui.active_section == ActiveSection::Search,
        library_label: format!("My Library ({})", saved.len()),
        library_active: content.view == ViewState::Saved,
        content_focused: ui.active_section == ActiveSection::Content,
        body: describe_body(ui, content, saved),
        notification: ui.notification.as_ref().map(|n| n.message.clone()),
        show_help: ui.show_help_popup,
    }
}
