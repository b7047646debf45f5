// Library exports for the binaries and tests
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use config::ServerConfig;
use services::broadcast_store::BroadcastStore;

/// Application state shared across all handlers of the reference server.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub store: Arc<BroadcastStore>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(BroadcastStore::default()),
            http: reqwest::Client::builder().build()?,
        })
    }
}
