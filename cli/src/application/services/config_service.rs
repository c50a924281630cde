//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::AutodockConfig;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<AutodockConfig> {
    store.load()
}

/// Validate and persist a single setting; returns the updated config.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<AutodockConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}
