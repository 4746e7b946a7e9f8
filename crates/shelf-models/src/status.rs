use serde::{Deserialize, Serialize};
use std::fmt;

/// Tracking status a user has set on a media item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackStatus {
    /// Want to watch/read/listen
    Planned,
    /// In progress (reading and listening included)
    Watching,
    Completed,
    OnHold,
    Dropped,
}

impl TrackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackStatus::Planned => "PLANNED",
            TrackStatus::Watching => "WATCHING",
            TrackStatus::Completed => "COMPLETED",
            TrackStatus::OnHold => "ON_HOLD",
            TrackStatus::Dropped => "DROPPED",
        }
    }

    /// Map a backend status string to a status, None when unrecognised
    pub fn parse_lenient(value: &str) -> Option<Self> {
        let normalized = value.trim().to_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "PLANNED" | "PLANNING" | "PLAN_TO_WATCH" | "PLAN_TO_READ" | "PLAN_TO_LISTEN" | "WATCHLIST" => {
                Some(TrackStatus::Planned)
            }
            "WATCHING" | "READING" | "LISTENING" | "IN_PROGRESS" | "CURRENT" => Some(TrackStatus::Watching),
            "COMPLETED" | "FINISHED" | "WATCHED" | "READ" => Some(TrackStatus::Completed),
            "ON_HOLD" | "HOLD" | "PAUSED" => Some(TrackStatus::OnHold),
            "DROPPED" | "ABANDONED" => Some(TrackStatus::Dropped),
            _ => None,
        }
    }
}

impl fmt::Display for TrackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient() {
        assert_eq!(TrackStatus::parse_lenient("COMPLETED"), Some(TrackStatus::Completed));
        assert_eq!(TrackStatus::parse_lenient("watching"), Some(TrackStatus::Watching));
        assert_eq!(TrackStatus::parse_lenient("reading"), Some(TrackStatus::Watching));
        assert_eq!(TrackStatus::parse_lenient("plan to watch"), Some(TrackStatus::Planned));
        assert_eq!(TrackStatus::parse_lenient("on-hold"), Some(TrackStatus::OnHold));
        assert_eq!(TrackStatus::parse_lenient("LOVED"), None);
    }

    #[test]
    fn test_serializes_screaming_snake() {
        assert_eq!(serde_json::to_string(&TrackStatus::OnHold).unwrap(), "\"ON_HOLD\"");
    }
}
