//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ApiConfig;
use crate::sampler::{Snapshot, SnapshotFeed};
use crate::websocket::{ConnectionHub, HubConfig};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only subscription to the sampler's snapshots
    pub feed: SnapshotFeed,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// WebSocket connection hub for real-time streaming
    pub ws_hub: Arc<ConnectionHub>,
}

impl AppState {
    /// Create a new AppState with a hub sized from the API config
    pub fn new(feed: SnapshotFeed, config: ApiConfig) -> Self {
        let hub_config = HubConfig {
            max_connections: config.max_connections,
        };
        Self::with_hub(feed, config, Arc::new(ConnectionHub::new(hub_config)))
    }

    /// Create AppState sharing an existing WebSocket hub
    pub fn with_hub(feed: SnapshotFeed, config: ApiConfig, ws_hub: Arc<ConnectionHub>) -> Self {
        Self {
            feed,
            config: Arc::new(config),
            start_time: Instant::now(),
            ws_hub,
        }
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.feed.current()
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get WebSocket connection count
    pub async fn ws_connection_count(&self) -> usize {
        self.ws_hub.connection_count().await
    }
}
