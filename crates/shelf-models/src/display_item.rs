use serde::{Deserialize, Serialize};
use crate::{MediaType, TrackStatus};

/// One merged entry of a collection grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub year: Option<i32>,
    pub cover_url: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TrackStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Set once any of the user's records has been merged into this entry,
    /// whether or not it carried a recognised status
    #[serde(default)]
    pub tracked: bool,
}

impl DisplayItem {
    pub fn is_tracked(&self) -> bool {
        self.tracked
    }
}
