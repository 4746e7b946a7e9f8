use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of media a collection page lists
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
    Music,
    Books,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
            MediaType::Music => "music",
            MediaType::Books => "books",
        }
    }

    /// Parse a type name as the backend and discovery feeds spell it.
    ///
    /// Accepts any casing plus the handful of synonyms the feeds use
    /// ("show", "series", "album", "book", ...). Returns None for anything else.
    pub fn parse_lenient(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "movie" | "movies" | "film" => Some(MediaType::Movie),
            "tv" | "show" | "shows" | "series" | "tv_show" | "tvshow" => Some(MediaType::Tv),
            "music" | "album" | "albums" | "track" => Some(MediaType::Music),
            "books" | "book" => Some(MediaType::Books),
            _ => None,
        }
    }

    /// Navigation target for an item of this type
    pub fn href_for(&self, id: &str) -> String {
        format!("/{}/{}", self.as_str(), id)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| {
            format!("Invalid media type: {}. Use 'movie', 'tv', 'music', or 'books'", s)
        })
    }
}

/// Year taken from the leading four characters of a date string.
///
/// "2021-05-01" and "2021" both give 2021. Anything whose first four
/// characters are not all ASCII digits gives None.
pub fn parse_year(date: &str) -> Option<i32> {
    let head = date.trim().get(..4)?;
    if !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    head.parse().ok()
}
