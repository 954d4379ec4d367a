//! Data Transfer Objects
//!
//! Response types for the API endpoints.
//! Derived views that are already serializable are returned as-is; these
//! types cover the shapes that only exist at the HTTP boundary.

use serde::{Deserialize, Serialize};

use crate::sampler::{Location, Reading, Snapshot};
use crate::views::{format_temperature, Comparison, Outcome};

// ============================================
// SNAPSHOT DTOs
// ============================================

/// Full history window plus the latest reading
#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    /// Readings oldest first
    pub readings: Vec<Reading>,
    /// Most recent reading, null before the first tick
    pub latest: Option<Reading>,
    /// Number of readings in the window
    pub count: usize,
    /// Maximum number of readings retained
    pub capacity: usize,
    /// Total ticks since startup
    pub sequence: u64,
}

impl From<&Snapshot> for SnapshotResponse {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            readings: snapshot.readings.clone(),
            latest: snapshot.latest().copied(),
            count: snapshot.len(),
            capacity: snapshot.capacity,
            sequence: snapshot.sequence,
        }
    }
}

// ============================================
// LATEST DTOs
// ============================================

/// One location's latest value
#[derive(Debug, Serialize)]
pub struct LocationReading {
    pub location: Location,
    pub temperature: f64,
    /// Rendered text, e.g. "-17.3 C"
    pub text: String,
}

impl LocationReading {
    pub fn new(reading: &Reading, location: Location) -> Self {
        let temperature = reading.temperature(location);
        Self {
            location,
            temperature,
            text: format_temperature(temperature),
        }
    }
}

/// Latest values for both locations
#[derive(Debug, Serialize)]
pub struct LatestResponse {
    pub timestamp: Option<String>,
    pub arctic: Option<LocationReading>,
    pub antarctic: Option<LocationReading>,
}

impl From<&Snapshot> for LatestResponse {
    fn from(snapshot: &Snapshot) -> Self {
        let latest = snapshot.latest();
        Self {
            timestamp: latest.map(Reading::timestamp_label),
            arctic: latest.map(|r| LocationReading::new(r, Location::Arctic)),
            antarctic: latest.map(|r| LocationReading::new(r, Location::Antarctic)),
        }
    }
}

/// Latest value for a single location
#[derive(Debug, Serialize)]
pub struct LocationLatestResponse {
    pub location: Location,
    pub timestamp: Option<String>,
    pub temperature: Option<f64>,
    pub text: Option<String>,
}

// ============================================
// COMPARISON DTOs
// ============================================

/// Warmer-location comparison at the latest reading
#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub outcome: Outcome,
    /// Warmer location, null on a tie
    pub warmer: Option<Location>,
    pub text: String,
    pub timestamp: String,
    pub arctic_temp: f64,
    pub antarctic_temp: f64,
}

impl From<&Comparison> for ComparisonResponse {
    fn from(comparison: &Comparison) -> Self {
        Self {
            outcome: comparison.outcome,
            warmer: comparison.outcome.warmer(),
            text: comparison.text(),
            timestamp: comparison
                .timestamp
                .format(crate::sampler::TIMESTAMP_FORMAT)
                .to_string(),
            arctic_temp: comparison.arctic_temp,
            antarctic_temp: comparison.antarctic_temp,
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, starting
    pub status: String,
    /// Readings currently held
    pub readings: usize,
    /// History capacity
    pub capacity: usize,
    /// Total ticks since startup
    pub sequence: u64,
    /// Timestamp of the latest reading
    pub last_reading: Option<String>,
    /// Open WebSocket connections
    pub ws_connections: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

// ============================================
// EXPORT DTOs
// ============================================

/// Export query parameters
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Format: csv, json, ndjson
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}
