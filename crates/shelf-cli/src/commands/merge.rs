use super::view::show_collection;
use crate::output::Output;
use crate::ViewArgs;
use color_eyre::Result;
use shelf_config::{Config, PathManager};
use shelf_sources::FileSource;
use std::path::PathBuf;

pub async fn run_merge(
    discovered: Option<PathBuf>,
    tracked: Option<PathBuf>,
    view: &ViewArgs,
    output: &Output,
) -> Result<()> {
    tracing::debug!("Merge command started");

    if discovered.is_none() && tracked.is_none() {
        output.warn("Neither --discovered nor --tracked given; nothing to merge");
        return Ok(());
    }

    // Fall back to built-in defaults when there is no readable config file
    let config_file = PathManager::default().config_file();
    let config = if config_file.exists() {
        Config::load_from_file(&config_file).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable config {}: {}", config_file.display(), e);
            Config::default()
        })
    } else {
        Config::default()
    };

    let media_type = view.media_type.unwrap_or(config.display.default_type);
    let source = FileSource::new(discovered, tracked);
    show_collection(&source, media_type, view, config.display.show_untracked, output).await
}
