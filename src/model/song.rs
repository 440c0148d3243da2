//! The song record shared by every view, plus the URL templates derived from it

use serde::{Deserialize, Serialize};

const YOUTUBE_THUMBNAIL_BASE: &str = "https://img.youtube.com/vi";
const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed";
const PLACEHOLDER_IMAGE_BASE: &str = "https://picsum.photos/seed";
const YOUTUBE_MUSIC_SEARCH: &str = "https://music.youtube.com/search?q=";

/// A fully populated song, ready to be rendered or saved
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
    pub youtube_music_url: String,
}

impl Song {
    /// Library identity: ids are regenerated per fetch, so (title, artist) is what stays stable.
    pub fn same_track(&self, other: &Song) -> bool {
        self.title == other.title && self.artist == other.artist
    }

    /// Text written to the clipboard
    pub fn clipboard_text(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }

    pub fn embed_url(&self) -> Option<String> {
        self.youtube_id.as_deref().map(embed_url)
    }
}

pub fn embed_url(youtube_id: &str) -> String {
    format!("{}/{}?autoplay=0&rel=0", YOUTUBE_EMBED_BASE, youtube_id)
}

pub fn youtube_thumbnail_url(youtube_id: &str) -> String {
    format!("{}/{}/maxresdefault.jpg", YOUTUBE_THUMBNAIL_BASE, youtube_id)
}

pub fn placeholder_thumbnail_url(title: &str) -> String {
    format!("{}/{}/300/300", PLACEHOLDER_IMAGE_BASE, urlencoding::encode(title))
}

pub fn youtube_music_search_url(title: &str, artist: &str) -> String {
    let query = format!("{} {}", title, artist);
    format!("{}{}", YOUTUBE_MUSIC_SEARCH, urlencoding::encode(&query))
}

#[cfg(test)]
pub fn sample_song(id: &str, title: &str, artist: &str) -> Song {
    Song {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        album: format!("{} (Single)", title),
        year: Some("2024".to_string()),
        duration: Some("3:21".to_string()),
        thumbnail: placeholder_thumbnail_url(title),
        youtube_id: None,
        youtube_music_url: youtube_music_search_url(title, artist),
    }
}
