use serde::{Deserialize, Serialize};
use crate::{parse_year, MediaType, TrackStatus};

/// A user's persisted status/rating entry for one media item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackedRecord {
    /// Backend's own media id
    pub media_id: Option<String>,
    /// Id of the media in the discovery provider
    pub external_media_id: Option<String>,
    pub title: String,
    pub release_date: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub status: Option<TrackStatus>,
    pub rating: Option<f64>,
    /// Id of the tracking row itself
    #[serde(default)]
    pub row_id: String,
}

impl TrackedRecord {
    pub fn new(title: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            media_id: None,
            external_media_id: None,
            title: title.into(),
            release_date: String::new(),
            media_type,
            status: None,
            rating: None,
            row_id: String::new(),
        }
    }

    pub fn with_media_id(mut self, id: impl Into<String>) -> Self {
        self.media_id = Some(id.into());
        self
    }

    pub fn with_external_media_id(mut self, id: impl Into<String>) -> Self {
        self.external_media_id = Some(id.into());
        self
    }

    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = date.into();
        self
    }

    pub fn with_status(mut self, status: TrackStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_row_id(mut self, row_id: impl Into<String>) -> Self {
        self.row_id = row_id.into();
        self
    }

    /// Internal id, None when absent or blank
    pub fn internal_id(&self) -> Option<&str> {
        non_blank(self.media_id.as_deref())
    }

    /// External id, None when absent or blank
    pub fn external_id(&self) -> Option<&str> {
        non_blank(self.external_media_id.as_deref())
    }

    pub fn year(&self) -> Option<i32> {
        parse_year(&self.release_date)
    }
}

fn non_blank(id: Option<&str>) -> Option<&str> {
    id.map(str::trim).filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_ids_are_absent() {
        let record = TrackedRecord::new("Dune", MediaType::Movie)
            .with_media_id("  ")
            .with_external_media_id("tmdb-438631");
        assert_eq!(record.internal_id(), None);
        assert_eq!(record.external_id(), Some("tmdb-438631"));
    }

    #[test]
    fn test_year_from_release_date() {
        let record = TrackedRecord::new("Dune", MediaType::Movie).with_release_date("2021-10-22");
        assert_eq!(record.year(), Some(2021));
        let record = TrackedRecord::new("Dune", MediaType::Movie).with_release_date("TBA");
        assert_eq!(record.year(), None);
    }
}
