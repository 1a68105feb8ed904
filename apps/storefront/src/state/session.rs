//! # Session State
//!
//! Binds the core store to the app configuration for one run of the app.

use std::path::Path;

use mango_core::{Catalog, Notification, NotificationQueue, Storefront};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::state::StoreConfig;

/// One storefront session: the store plus the config it was built from.
#[derive(Debug)]
pub struct Session {
    pub store: Storefront<NotificationQueue>,
    pub config: StoreConfig,
}

impl Session {
    /// Builds a session over `catalog`, applying the configured free
    /// shipping threshold.
    pub fn new(catalog: Catalog, config: StoreConfig) -> Self {
        let store = Storefront::with_notifier(catalog, NotificationQueue::new())
            .with_free_shipping_threshold(config.free_shipping_threshold());

        Session { store, config }
    }

    /// Loads the catalog named by `override_path`, else by the config,
    /// else uses the built-in catalog.
    pub fn load(config: StoreConfig, override_path: Option<&Path>) -> AppResult<Self> {
        let path = override_path.or(config.catalog_path.as_deref());

        let catalog = match path {
            Some(path) => load_catalog(path)?,
            None => {
                info!("Using built-in catalog");
                Catalog::builtin()
            }
        };

        Ok(Session::new(catalog, config))
    }

    /// Takes the toasts raised since the last call.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.store.notifier_mut().drain()
    }
}

/// Reads and validates a JSON catalog file.
pub fn load_catalog(path: &Path) -> AppResult<Catalog> {
    let json = std::fs::read_to_string(path).map_err(|source| AppError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = Catalog::from_json_str(&json).map_err(|source| AppError::Catalog {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}
