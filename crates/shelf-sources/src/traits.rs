use async_trait::async_trait;
use shelf_models::{ExternalItem, MediaType, TrackedRecord};
use tracing::warn;

use crate::error::SourceError;

/// Producer of the two lists a collection page merges
#[async_trait]
pub trait ShelfSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Whether `tracked` can be called at all
    fn is_authenticated(&self) -> bool {
        true
    }

    /// Discovery feed for one media type, in ranking order
    async fn discover(&self, media_type: MediaType) -> Result<Vec<ExternalItem>, SourceError>;

    /// The user's tracked records for one media type
    async fn tracked(&self, media_type: MediaType) -> Result<Vec<TrackedRecord>, SourceError>;

    /// Discovery feed, failing closed to an empty list
    async fn discover_or_empty(&self, media_type: MediaType) -> Vec<ExternalItem> {
        match self.discover(media_type).await {
            Ok(items) => items,
            Err(e) => {
                warn!("{}: discovery feed for {} unavailable, continuing without it: {}", self.source_name(), media_type, e);
                Vec::new()
            }
        }
    }

    /// Tracked records, failing closed to an empty list
    async fn tracked_or_empty(&self, media_type: MediaType) -> Vec<TrackedRecord> {
        match self.tracked(media_type).await {
            Ok(records) => records,
            Err(e) => {
                warn!("{}: tracked {} records unavailable, continuing without them: {}", self.source_name(), media_type, e);
                Vec::new()
            }
        }
    }
}
