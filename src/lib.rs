//! # Polarwatch
//!
//! A live-updating dashboard service that simulates periodic temperature
//! readings for the Arctic and Antarctica and serves them as text, a table,
//! and a chart series.
//!
//! ## Features
//!
//! - **Single-writer sampler**: one task ticks on a fixed interval and owns the history
//! - **Bounded history**: a rolling window of the most recent readings
//! - **Consistent views**: every view is derived from one immutable snapshot
//! - **Real-time**: WebSocket updates for live dashboards on every tick
//!
//! ## Modules
//!
//! - [`sampler`]: Reading generation, history, and snapshot publication
//! - [`views`]: Text, comparison, table, and chart projections
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Live update hub
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use polarwatch::config::SamplerConfig;
//! use polarwatch::sampler::{Location, Sampler};
//! use polarwatch::views;
//!
//! let mut sampler = Sampler::new(&SamplerConfig::default());
//! sampler.tick();
//!
//! let snapshot = sampler.snapshot();
//! println!("{:?}", views::latest_temperature(&snapshot, Location::Arctic));
//! if let Some(comparison) = views::compare(&snapshot) {
//!     println!("{}", comparison);
//! }
//! ```

pub mod api;
pub mod config;
pub mod logging;
pub mod sampler;
pub mod views;
pub mod websocket;

// Re-export top-level types for convenience
pub use sampler::{
    Clock, History, Location, Reading, Sampler, SamplerHandle, Snapshot, SnapshotFeed,
    SystemClock, TemperatureSource, UniformSource,
};

pub use views::{
    ChartSeries, Comparison, DashboardView, Outcome, Table, TableRow, TrendLine, ViewError,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use websocket::{
    spawn_relay, websocket_handler, ClientMessage, ConnectionHub, HubConfig, HubError,
    ServerMessage, WsEvent,
};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, SamplerConfig};
