use serde::{Deserialize, Serialize};
use crate::MediaType;

/// One entry of the discovery feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalItem {
    /// Canonical id for display purposes
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub cover_url: String,
    pub href: String,
    /// Other identifiers the feed gave for the same item (e.g. its external id
    /// when the internal one was chosen as canonical)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alias_ids: Vec<String>,
}

impl ExternalItem {
    /// Item with the navigation target derived from type and id
    pub fn new(id: impl Into<String>, title: impl Into<String>, media_type: MediaType) -> Self {
        let id = id.into();
        Self {
            href: media_type.href_for(&id),
            id,
            title: title.into(),
            media_type,
            year: None,
            rating: None,
            cover_url: String::new(),
            alias_ids: Vec::new(),
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_cover_url(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = cover_url.into();
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias_ids.push(alias.into());
        self
    }
}
