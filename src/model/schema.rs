//! Response schemas sent to the oracle.
//!
//! The same descriptor drives both the request (`responseSchema`) and the
//! decoder's required-field check, so the two can not drift apart.

use serde_json::{json, Map, Value};

/// Song fields the oracle may emit, in wire naming
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SongField {
    Id,
    Title,
    Artist,
    Album,
    Year,
    Duration,
    Thumbnail,
    YoutubeId,
    YoutubeMusicUrl,
}

impl SongField {
    pub fn wire_name(self) -> &'static str {
        match self {
            SongField::Id => "id",
            SongField::Title => "title",
            SongField::Artist => "artist",
            SongField::Album => "album",
            SongField::Year => "year",
            SongField::Duration => "duration",
            SongField::Thumbnail => "thumbnail",
            SongField::YoutubeId => "youtubeId",
            SongField::YoutubeMusicUrl => "youtubeMusicUrl",
        }
    }
}

/// Top-level shape of the expected response body
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Object,
    Array,
}

#[derive(Clone, Debug)]
pub struct SongSchema {
    pub shape: Shape,
    pub properties: &'static [SongField],
    pub required: &'static [SongField],
    pub thumbnail_hint: Option<&'static str>,
}

const LIST_PROPERTIES: &[SongField] = &[
    SongField::Id,
    SongField::Title,
    SongField::Artist,
    SongField::Album,
    SongField::Year,
    SongField::Duration,
    SongField::Thumbnail,
    SongField::YoutubeId,
    SongField::YoutubeMusicUrl,
];

const FEATURED_PROPERTIES: &[SongField] = &[
    SongField::Id,
    SongField::Title,
    SongField::Artist,
    SongField::Album,
    SongField::Year,
    SongField::YoutubeId,
    SongField::YoutubeMusicUrl,
    SongField::Thumbnail,
];

const LIST_REQUIRED: &[SongField] = &[SongField::Title, SongField::Artist, SongField::Album];
const FEATURED_REQUIRED: &[SongField] = &[SongField::Title, SongField::Artist, SongField::YoutubeId];

impl SongSchema {
    pub fn featured() -> Self {
        Self {
            shape: Shape::Object,
            properties: FEATURED_PROPERTIES,
            required: FEATURED_REQUIRED,
            thumbnail_hint: None,
        }
    }

    pub fn search() -> Self {
        Self {
            shape: Shape::Array,
            properties: LIST_PROPERTIES,
            required: LIST_REQUIRED,
            thumbnail_hint: Some("Use a valid placeholder from picsum if unknown"),
        }
    }

    pub fn recommendations() -> Self {
        Self {
            shape: Shape::Array,
            properties: LIST_PROPERTIES,
            required: LIST_REQUIRED,
            thumbnail_hint: None,
        }
    }

    /// Gemini `responseSchema` descriptor
    pub fn to_json(&self) -> Value {
        let mut properties = Map::new();
        for field in self.properties {
            let mut property = json!({ "type": "STRING" });
            if let (SongField::Thumbnail, Some(hint)) = (field, self.thumbnail_hint) {
                property["description"] = Value::String(hint.to_string());
            }
            properties.insert(field.wire_name().to_string(), property);
        }

        let required: Vec<&str> = self.required.iter().map(|f| f.wire_name()).collect();
        let object = json!({
            "type": "OBJECT",
            "properties": properties,
            "required": required,
        });

        match self.shape {
            Shape::Object => object,
            Shape::Array => json!({ "type": "ARRAY", "items": object }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_schema_is_array_of_objects() {
        let schema = SongSchema::search().to_json();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(schema["items"]["type"], "OBJECT");
        assert_eq!(schema["items"]["required"], json!(["title", "artist", "album"]));
        assert_eq!(
            schema["items"]["properties"]["thumbnail"]["description"],
            "Use a valid placeholder from picsum if unknown"
        );
        assert_eq!(schema["items"]["properties"].as_object().unwrap().len(), 9);
    }

    #[test]
    fn test_featured_schema_requires_youtube_id() {
        let schema = SongSchema::featured().to_json();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["required"], json!(["title", "artist", "youtubeId"]));
        assert!(schema["properties"].get("duration").is_none());
    }
}
