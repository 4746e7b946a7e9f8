use async_trait::async_trait;
use serde_json::Value;
use shelf_models::{ExternalItem, MediaType, TrackedRecord};
use std::path::{Path, PathBuf};

use crate::decode::{decode_discovery, decode_user_media};
use crate::error::SourceError;
use crate::traits::ShelfSource;

/// Reads both lists from JSON files shaped like the API responses
pub struct FileSource {
    discovered: Option<PathBuf>,
    tracked: Option<PathBuf>,
}

impl FileSource {
    pub fn new(discovered: Option<PathBuf>, tracked: Option<PathBuf>) -> Self {
        Self { discovered, tracked }
    }

    async fn read_json(path: &Path) -> Result<Value, SourceError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SourceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| SourceError::Decode {
            origin: path.display().to_string(),
            source,
        })
    }
}

#[async_trait]
impl ShelfSource for FileSource {
    fn source_name(&self) -> &str {
        "file"
    }

    async fn discover(&self, media_type: MediaType) -> Result<Vec<ExternalItem>, SourceError> {
        let Some(path) = &self.discovered else {
            return Ok(Vec::new());
        };
        let value = Self::read_json(path).await?;
        Ok(decode_discovery(value, media_type, &path.display().to_string()))
    }

    async fn tracked(&self, media_type: MediaType) -> Result<Vec<TrackedRecord>, SourceError> {
        let Some(path) = &self.tracked else {
            return Ok(Vec::new());
        };
        let value = Self::read_json(path).await?;
        Ok(decode_user_media(value, media_type, &path.display().to_string()))
    }
}
