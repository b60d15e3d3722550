pub mod browse;
pub mod config;
pub mod control;
mod prompts;

use std::sync::Arc;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use plexkit_api::{Entity, Item, Registry, Server};
use plexkit_config::{Config, CredentialStore, PathManager};
use tracing::debug;

/// Config, credentials and where they live.
pub struct Settings {
    pub paths: PathManager,
    pub config: Config,
    pub credentials: CredentialStore,
}

/// Loads config and credentials; a missing config file yields defaults.
pub fn load_settings() -> Result<Settings> {
    let paths = PathManager::default();
    let config_file = paths.config_file();
    let config = if config_file.exists() {
        Config::load_from_file(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?
    } else {
        Config::default()
    };

    let mut credentials = CredentialStore::new(paths.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    Ok(Settings { paths, config, credentials })
}

/// Registry built from the config plus the server selected by `--server`.
pub fn connect(settings: &Settings, server: Option<&str>) -> Result<(Registry, Arc<Server>)> {
    if settings.config.servers.is_empty() {
        return Err(eyre!(
            "No servers configured. Add one with 'plexkit config add-server <name> <address>'."
        ));
    }
    settings
        .config
        .validate()
        .map_err(|e| eyre!("Invalid configuration: {}", e))?;

    let registry = Registry::from_config(&settings.config, Some(&settings.credentials))
        .wrap_err("Failed to set up servers")?;
    let selected = match server {
        Some(name) => registry.server(name)?,
        None => registry.default_server()?,
    };
    let selected = Arc::clone(selected);
    debug!("using server {}", selected.name());
    Ok((registry, selected))
}

pub fn item_header() -> &'static [&'static str] {
    &["Key", "Type", "Title", "Year", "Index"]
}

pub fn item_row(item: &Item) -> Vec<String> {
    let common = item.common();
    let year = match item {
        Item::Grandparent(item) => item.data().grandparent.year,
        Item::Parent(item) => item.data().grandparent.year,
        Item::Child(item) => item.data().grandparent.year,
    };
    vec![
        item.key().map(|k| k.to_string()).unwrap_or_default(),
        item.kind().to_string(),
        item.title().unwrap_or("").to_string(),
        year.map(|y| y.to_string()).unwrap_or_default(),
        common.index.map(|i| i.to_string()).unwrap_or_default(),
    ]
}
