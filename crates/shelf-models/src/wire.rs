// Records as the backend and discovery feeds send them.
//
// Every field is optional and lenient: ids may arrive as strings or numbers,
// ratings as numbers or numeric strings, and anything malformed becomes None
// instead of failing the whole list.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use crate::{parse_year, ExternalItem, MediaType, TrackStatus, TrackedRecord};

/// One element of the discovery feed array
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub media_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub external_media_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub media_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub poster_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub backdrop_url: Option<String>,
}

impl DiscoveryRecord {
    /// Convert to an [`ExternalItem`].
    ///
    /// The canonical id is `mediaId`, else `externalMediaId`, else `id`; the
    /// remaining ids become aliases. A missing or unknown type falls back to
    /// the type of the collection being listed.
    pub fn into_external_item(self, collection_type: MediaType) -> ExternalItem {
        let mut ids = [self.media_id, self.external_media_id, self.id]
            .into_iter()
            .flatten();
        let canonical = ids.next().unwrap_or_default();
        let mut alias_ids: Vec<String> = Vec::new();
        for alias in ids {
            if alias != canonical && !alias_ids.contains(&alias) {
                alias_ids.push(alias);
            }
        }

        let media_type = self
            .media_type
            .as_deref()
            .and_then(MediaType::parse_lenient)
            .unwrap_or(collection_type);

        ExternalItem {
            href: media_type.href_for(&canonical),
            id: canonical,
            title: self.title.unwrap_or_default(),
            media_type,
            year: self.release_date.as_deref().and_then(parse_year),
            rating: self.rating,
            cover_url: self.poster_url.or(self.backdrop_url).unwrap_or_default(),
            alias_ids,
        }
    }
}

/// The `media` object nested in a user media record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    #[serde(default, deserialize_with = "lenient_id")]
    pub media_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub external_media_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub media_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub release_date: Option<String>,
}

/// One element of the "list user media" response
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserMediaRecord {
    #[serde(default, deserialize_with = "lenient_object")]
    pub media: Option<MediaRef>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
}

impl UserMediaRecord {
    pub fn into_tracked_record(self, collection_type: MediaType) -> TrackedRecord {
        let media = self.media.unwrap_or_default();
        TrackedRecord {
            media_id: media.media_id,
            external_media_id: media.external_media_id,
            title: media.title.unwrap_or_default(),
            release_date: media.release_date.unwrap_or_default(),
            media_type: media
                .media_type
                .as_deref()
                .and_then(MediaType::parse_lenient)
                .unwrap_or(collection_type),
            status: self.status.as_deref().and_then(TrackStatus::parse_lenient),
            rating: self.rating,
            row_id: self.id.unwrap_or_default(),
        }
    }
}

/// Decode a JSON array element by element, skipping elements that are not
/// objects. Returns the decoded records and the number skipped. A value that
/// is not an array decodes to an empty list.
pub fn records_from_value<T: DeserializeOwned>(value: Value) -> (Vec<T>, usize) {
    let Value::Array(elements) = value else {
        return (Vec::new(), 0);
    };

    let mut records = Vec::with_capacity(elements.len());
    let mut skipped = 0;
    for element in elements {
        match serde_json::from_value(element) {
            Ok(record) => records.push(record),
            Err(_) => skipped += 1,
        }
    }
    (records, skipped)
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_discovery_record_prefers_media_id() {
        let record: DiscoveryRecord = serde_json::from_value(json!({
            "mediaId": 7,
            "externalMediaId": "tmdb-438631",
            "title": "Dune",
            "type": "MOVIE",
            "releaseDate": "2021-09-15",
            "rating": "7.8",
            "backdropUrl": "https://img.example/dune-bg.jpg"
        }))
        .unwrap();

        let item = record.into_external_item(MediaType::Tv);
        assert_eq!(item.id, "7");
        assert_eq!(item.alias_ids, vec!["tmdb-438631".to_string()]);
        assert_eq!(item.media_type, MediaType::Movie);
        assert_eq!(item.year, Some(2021));
        assert_eq!(item.rating, Some(7.8));
        assert_eq!(item.cover_url, "https://img.example/dune-bg.jpg");
        assert_eq!(item.href, "/movie/7");
    }

    #[test]
    fn test_discovery_record_missing_fields_degrade() {
        let record: DiscoveryRecord = serde_json::from_value(json!({
            "id": "ext-1",
            "title": null,
            "releaseDate": "someday",
            "rating": {"avg": 3}
        }))
        .unwrap();

        let item = record.into_external_item(MediaType::Books);
        assert_eq!(item.id, "ext-1");
        assert_eq!(item.title, "");
        assert_eq!(item.media_type, MediaType::Books);
        assert_eq!(item.year, None);
        assert_eq!(item.rating, None);
        assert_eq!(item.cover_url, "");
        assert!(item.alias_ids.is_empty());
    }

    #[test]
    fn test_user_media_record_conversion() {
        let record: UserMediaRecord = serde_json::from_value(json!({
            "id": 991,
            "status": "watching",
            "rating": 8,
            "media": {
                "mediaId": "7",
                "externalMediaId": null,
                "title": "Dune",
                "type": "movie",
                "releaseDate": "2021-10-22"
            }
        }))
        .unwrap();

        let tracked = record.into_tracked_record(MediaType::Movie);
        assert_eq!(tracked.media_id.as_deref(), Some("7"));
        assert_eq!(tracked.external_media_id, None);
        assert_eq!(tracked.status, Some(TrackStatus::Watching));
        assert_eq!(tracked.rating, Some(8.0));
        assert_eq!(tracked.row_id, "991");
        assert_eq!(tracked.year(), Some(2021));
    }

    #[test]
    fn test_user_media_record_malformed_media() {
        let record: UserMediaRecord = serde_json::from_value(json!({
            "media": "not an object",
            "status": "SOMETHING_ELSE"
        }))
        .unwrap();

        let tracked = record.into_tracked_record(MediaType::Music);
        assert_eq!(tracked.title, "");
        assert_eq!(tracked.media_type, MediaType::Music);
        assert_eq!(tracked.status, None);
        assert_eq!(tracked.row_id, "");
    }

    #[test]
    fn test_records_from_value_skips_non_objects() {
        let (records, skipped) = records_from_value::<DiscoveryRecord>(json!([
            {"id": "1", "title": "A"},
            null,
            42,
            {"id": "2", "title": "B"}
        ]));
        assert_eq!(records.len(), 2);
        assert_eq!(skipped, 2);

        let (records, skipped) = records_from_value::<DiscoveryRecord>(json!({"error": "down"}));
        assert!(records.is_empty());
        assert_eq!(skipped, 0);
    }
}
