use crate::output::Output;
use crate::ViewArgs;
use color_eyre::Result;
use shelf_core::reconcile_with_stats;
use shelf_models::{DisplayItem, MediaType};
use shelf_sources::ShelfSource;
use tracing::info;

/// Fetch both lists from `source`, merge them and print the collection
pub async fn show_collection(
    source: &dyn ShelfSource,
    media_type: MediaType,
    view: &ViewArgs,
    show_untracked: bool,
    output: &Output,
) -> Result<()> {
    let (external, tracked) = tokio::join!(
        source.discover_or_empty(media_type),
        source.tracked_or_empty(media_type)
    );
    info!(
        "{}: {} discovered and {} tracked {} items",
        source.source_name(),
        external.len(),
        tracked.len(),
        media_type
    );

    let (items, stats) = reconcile_with_stats(&external, &tracked);
    let items = visible_items(items, view.tracked_only || !show_untracked);
    output.collection(media_type, &items, &stats, view.stats);
    Ok(())
}

/// Keep only entries some tracked record was merged into when `tracked_only`
pub fn visible_items(items: Vec<DisplayItem>, tracked_only: bool) -> Vec<DisplayItem> {
    if !tracked_only {
        return items;
    }
    items.into_iter().filter(DisplayItem::is_tracked).collect()
}
