//! Shared application state.
//!
//! Contains the state that is shared across all request handlers. Every
//! field is immutable after startup, so handlers never contend.

use std::sync::Arc;

use crate::auth::{GoogleProvider, IdentityReconciler};
use crate::config::ConfigV1;
use crate::store::{create_store, UserStore};

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Validated configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Source of durable user records.
    pub store: Arc<dyn UserStore>,
    /// Refreshes tokens from the store.
    pub reconciler: Arc<IdentityReconciler>,
    /// OAuth provider used for sign-in.
    pub google: Arc<GoogleProvider>,
}

impl AppState {
    /// Build the state from an already validated configuration.
    pub fn new(config: Arc<ConfigV1>) -> Self {
        let store = create_store(&config.store);
        Self::with_store(config, store)
    }

    /// Build the state around an existing store.
    pub fn with_store(config: Arc<ConfigV1>, store: Arc<dyn UserStore>) -> Self {
        let reconciler = Arc::new(IdentityReconciler::new(store.clone()));
        let google = Arc::new(GoogleProvider::new(&config.oauth.google));
        AppState {
            config,
            store,
            reconciler,
            google,
        }
    }
}
