//! Assemble a ready-to-run adapter from resolved configuration.

use anyhow::{Context, Result};
use kudos_core::config::KudosConfig;
use std::sync::Arc;
use tracing::info;

use crate::award::AwardSink;
use crate::engine::Engine;
use crate::store::SqliteActivityStore;
use crate::trigger::TriggerAdapter;

/// Open the configured store and wrap it in an engine and adapter.
///
/// # Errors
///
/// Returns an error if the config is invalid, `store.path` is unset, or the
/// store cannot be opened and verified.
pub fn adapter_from_config(
    config: &KudosConfig,
    sink: Arc<dyn AwardSink>,
) -> Result<TriggerAdapter> {
    config.validate()?;
    let zone = config.calendar.zone()?;

    let path = config
        .store
        .path
        .as_deref()
        .context("store.path is not configured (set it or KUDOS_STORE_PATH)")?;
    info!(path = %path.display(), "opening task store");
    let store = SqliteActivityStore::open(path)?;

    let engine = Engine::from_store(Arc::new(store)).with_zone(zone);
    Ok(TriggerAdapter::new(
        Arc::new(engine),
        sink,
        config.trigger.clone(),
    ))
}
