use super::view::show_collection;
use crate::output::Output;
use crate::ViewArgs;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use shelf_config::{Config, CredentialStore, PathManager};
use shelf_sources::{ApiClient, ShelfSource, SourceError};

pub async fn run_collection(view: &ViewArgs, output: &Output) -> Result<()> {
    tracing::debug!("Collection command started");

    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config = Config::load_or_create(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config.validate()
        .map_err(|e| eyre!("Configuration validation failed: {}", e))?;

    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store.load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    let mut client = ApiClient::new(&config)?;
    if let Some(session) = cred_store.session() {
        client = client.with_session(session);
    }
    if !client.is_authenticated() {
        return Err(SourceError::NotAuthenticated.into());
    }

    let media_type = view.media_type.unwrap_or(config.display.default_type);
    show_collection(&client, media_type, view, config.display.show_untracked, output).await
}
