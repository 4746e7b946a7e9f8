use serde_json::Value;
use shelf_models::{records_from_value, DiscoveryRecord, ExternalItem, MediaType, TrackedRecord, UserMediaRecord};
use tracing::{debug, warn};

/// Decode a discovery feed body into items of the requested type
pub fn decode_discovery(value: Value, media_type: MediaType, origin: &str) -> Vec<ExternalItem> {
    if !value.is_array() {
        warn!("{}: discovery feed is not a JSON array, treating as empty", origin);
        return Vec::new();
    }
    let (records, skipped) = records_from_value::<DiscoveryRecord>(value);
    if skipped > 0 {
        warn!("{}: skipped {} malformed discovery entries", origin, skipped);
    }

    let total = records.len();
    let items: Vec<ExternalItem> = records
        .into_iter()
        .map(|record| record.into_external_item(media_type))
        .filter(|item| item.media_type == media_type)
        .collect();
    if items.len() < total {
        debug!("{}: dropped {} discovery entries of another type", origin, total - items.len());
    }
    items
}

/// Decode a "list user media" body into tracked records of the requested type
pub fn decode_user_media(value: Value, media_type: MediaType, origin: &str) -> Vec<TrackedRecord> {
    if !value.is_array() {
        warn!("{}: user media response is not a JSON array, treating as empty", origin);
        return Vec::new();
    }
    let (records, skipped) = records_from_value::<UserMediaRecord>(value);
    if skipped > 0 {
        warn!("{}: skipped {} malformed user media entries", origin, skipped);
    }

    let total = records.len();
    let tracked: Vec<TrackedRecord> = records
        .into_iter()
        .map(|record| record.into_tracked_record(media_type))
        .filter(|record| record.media_type == media_type)
        .collect();
    if tracked.len() < total {
        debug!("{}: dropped {} tracked records of another type", origin, total - tracked.len());
    }
    tracked
}
