//! Strict decoding of oracle output into complete `Song` records.
//!
//! The oracle is asked for schema-shaped JSON but nothing guarantees it. Required
//! fields are checked against the schema and their absence fails the decode;
//! optional display fields are filled in deterministically.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::schema::{Shape, SongField, SongSchema};
use super::song::{placeholder_thumbnail_url, youtube_music_search_url, youtube_thumbnail_url, Song};

/// Cap on songs kept from a single list response
pub const MAX_RESULTS: usize = 10;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("expected a JSON {0}")]
    UnexpectedShape(&'static str),
}

/// Which request produced the raw record; decides the synthesized defaults
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchKind {
    Featured,
    Search,
    Recommendation,
}

impl FetchKind {
    fn id_prefix(self) -> &'static str {
        match self {
            FetchKind::Featured => "rand",
            FetchKind::Search => "search",
            FetchKind::Recommendation => "rec",
        }
    }
}

/// Oracle record before validation; every field may be missing
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSong {
    id: Option<String>,
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    year: Option<String>,
    duration: Option<String>,
    thumbnail: Option<String>,
    youtube_id: Option<String>,
    youtube_music_url: Option<String>,
}

impl RawSong {
    fn field(&self, field: SongField) -> Option<&str> {
        let value = match field {
            SongField::Id => &self.id,
            SongField::Title => &self.title,
            SongField::Artist => &self.artist,
            SongField::Album => &self.album,
            SongField::Year => &self.year,
            SongField::Duration => &self.duration,
            SongField::Thumbnail => &self.thumbnail,
            SongField::YoutubeId => &self.youtube_id,
            SongField::YoutubeMusicUrl => &self.youtube_music_url,
        };
        value.as_deref().filter(|v| !v.trim().is_empty())
    }
}

/// Blank strings count as absent
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn normalize(
    raw: RawSong,
    schema: &SongSchema,
    kind: FetchKind,
    index: usize,
    timestamp_ms: i64,
) -> Result<Song, DecodeError> {
    if let Some(missing) = schema.required.iter().find(|f| raw.field(**f).is_none()) {
        return Err(DecodeError::MissingField(missing.wire_name()));
    }

    let title = present(raw.title).ok_or(DecodeError::MissingField("title"))?;
    let artist = present(raw.artist).ok_or(DecodeError::MissingField("artist"))?;
    let album = present(raw.album).unwrap_or_default();
    let youtube_id = present(raw.youtube_id);

    let id = present(raw.id).unwrap_or_else(|| match kind {
        FetchKind::Featured => format!("{}-{}", kind.id_prefix(), timestamp_ms),
        _ => format!("{}-{}-{}", kind.id_prefix(), index, timestamp_ms),
    });

    let thumbnail = present(raw.thumbnail).unwrap_or_else(|| match (kind, youtube_id.as_deref()) {
        (FetchKind::Featured, Some(video)) => youtube_thumbnail_url(video),
        _ => placeholder_thumbnail_url(&title),
    });

    let youtube_music_url =
        present(raw.youtube_music_url).unwrap_or_else(|| youtube_music_search_url(&title, &artist));

    Ok(Song {
        id,
        title,
        artist,
        album,
        year: present(raw.year),
        duration: present(raw.duration),
        thumbnail,
        youtube_id,
        youtube_music_url,
    })
}

/// Decode a single-object response
pub fn decode_song(
    body: &str,
    schema: &SongSchema,
    kind: FetchKind,
    timestamp_ms: i64,
) -> Result<Song, DecodeError> {
    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(DecodeError::UnexpectedShape("object"));
    }
    let raw: RawSong = serde_json::from_value(value)?;
    normalize(raw, schema, kind, 0, timestamp_ms)
}

/// Decode an array response; one malformed item rejects the whole batch
pub fn decode_songs(
    body: &str,
    schema: &SongSchema,
    kind: FetchKind,
    timestamp_ms: i64,
) -> Result<Vec<Song>, DecodeError> {
    let value: Value = serde_json::from_str(body)?;
    let Value::Array(items) = value else {
        return Err(DecodeError::UnexpectedShape("array"));
    };
    debug_assert_eq!(schema.shape, Shape::Array);

    items
        .into_iter()
        .take(MAX_RESULTS)
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(DecodeError::UnexpectedShape("object"));
            }
            let raw: RawSong = serde_json::from_value(item)?;
            normalize(raw, schema, kind, index, timestamp_ms)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: i64 = 1_700_000_000_000;

    #[test]
    fn test_search_item_gets_synthesized_fields() {
        let body = r#"[{"title": "Blueming", "artist": "IU", "album": "Love poem"}]"#;
        let songs = decode_songs(body, &SongSchema::search(), FetchKind::Search, TS).unwrap();

        assert_eq!(songs.len(), 1);
        let song = &songs[0];
        assert_eq!(song.id, format!("search-0-{}", TS));
        assert_eq!(song.thumbnail, "https://picsum.photos/seed/Blueming/300/300");
        assert_eq!(song.youtube_music_url, "https://music.youtube.com/search?q=Blueming%20IU");
        assert_eq!(song.year, None);
    }

    #[test]
    fn test_thumbnail_is_deterministic() {
        let body = r#"[{"title": "밤편지", "artist": "IU", "album": "Palette"}]"#;
        let first = decode_songs(body, &SongSchema::search(), FetchKind::Search, TS).unwrap();
        let second = decode_songs(body, &SongSchema::search(), FetchKind::Search, TS + 50).unwrap();
        assert_eq!(first[0].thumbnail, second[0].thumbnail);
        assert!(!first[0].thumbnail.is_empty());
        assert!(first[0].youtube_music_url.contains(&*urlencoding::encode("밤편지")));
    }

    #[test]
    fn test_provided_fields_are_kept() {
        let body = r#"[{
            "id": "abc",
            "title": "Hype Boy",
            "artist": "NewJeans",
            "album": "New Jeans",
            "thumbnail": "https://example.com/t.jpg",
            "youtubeId": "11cta61wi0g",
            "youtubeMusicUrl": "https://music.youtube.com/watch?v=x"
        }]"#;
        let songs = decode_songs(body, &SongSchema::recommendations(), FetchKind::Recommendation, TS).unwrap();
        let song = &songs[0];
        assert_eq!(song.id, "abc");
        assert_eq!(song.thumbnail, "https://example.com/t.jpg");
        assert_eq!(song.youtube_id.as_deref(), Some("11cta61wi0g"));
        assert_eq!(song.youtube_music_url, "https://music.youtube.com/watch?v=x");
    }

    #[test]
    fn test_blank_optional_fields_are_synthesized() {
        let body = r#"[{"id": "", "title": "Some", "artist": "BOL4", "album": "Red Diary", "thumbnail": ""}]"#;
        let songs = decode_songs(body, &SongSchema::recommendations(), FetchKind::Recommendation, TS).unwrap();
        assert_eq!(songs[0].id, format!("rec-0-{}", TS));
        assert_eq!(songs[0].thumbnail, "https://picsum.photos/seed/Some/300/300");
    }

    #[test]
    fn test_missing_required_field_rejects_batch() {
        let body = r#"[
            {"title": "Ditto", "artist": "NewJeans", "album": "OMG"},
            {"title": "Nameless", "album": "Unknown"}
        ]"#;
        let err = decode_songs(body, &SongSchema::search(), FetchKind::Search, TS).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField("artist")));
    }

    #[test]
    fn test_results_are_capped() {
        let items: Vec<String> = (0..14)
            .map(|i| format!(r#"{{"title": "Song {i}", "artist": "A", "album": "B"}}"#))
            .collect();
        let body = format!("[{}]", items.join(","));
        let songs = decode_songs(&body, &SongSchema::search(), FetchKind::Search, TS).unwrap();
        assert_eq!(songs.len(), MAX_RESULTS);
        assert_eq!(songs[9].id, format!("search-9-{}", TS));
    }

    #[test]
    fn test_featured_uses_youtube_thumbnail() {
        let body = r#"{"title": "Love Lee", "artist": "AKMU", "youtubeId": "UuV2BmJ1p_I"}"#;
        let song = decode_song(body, &SongSchema::featured(), FetchKind::Featured, TS).unwrap();
        assert_eq!(song.id, format!("rand-{}", TS));
        assert_eq!(song.thumbnail, "https://img.youtube.com/vi/UuV2BmJ1p_I/maxresdefault.jpg");
        assert_eq!(song.album, "");
    }

    #[test]
    fn test_featured_without_youtube_id_is_malformed() {
        let body = r#"{"title": "Love Lee", "artist": "AKMU"}"#;
        let err = decode_song(body, &SongSchema::featured(), FetchKind::Featured, TS).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField("youtubeId")));
    }

    #[test]
    fn test_wrong_shape() {
        let err = decode_songs("{}", &SongSchema::search(), FetchKind::Search, TS).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedShape("array")));

        let err = decode_song("[]", &SongSchema::featured(), FetchKind::Featured, TS).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedShape("object")));

        let err = decode_songs("not json", &SongSchema::search(), FetchKind::Search, TS).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }
}
