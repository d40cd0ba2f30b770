use std::sync::Arc;

use crate::config::Config;
use crate::database::Store;
use crate::error::StoreError;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Store,

    /// Shared link token for the read path; `None` locks the listing
    pub link_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(store: Store, link_token: Option<&str>) -> Self {
        Self {
            store,
            link_token: link_token.map(Arc::from),
        }
    }

    /// Opens the store named by the configuration
    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        let store = Store::open(&config.database_url)?;
        Ok(Self::new(store, config.link_token.as_deref()))
    }
}
