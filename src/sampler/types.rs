//! Core data types for the Polarwatch sampler
//!
//! This module defines the fundamental types shared by the sampler and views:
//! - `Location`: Which of the two monitored sites a value belongs to
//! - `Reading`: One timestamped pair of temperatures
//! - `Snapshot`: An immutable copy of the history at a point in time

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fixed format used for every rendered timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A monitored location
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Location A, the northern site
    Arctic,
    /// Location B, the southern site
    Antarctic,
}

impl Location {
    /// Get all locations in display order
    pub fn all() -> &'static [Location] {
        &[Location::Arctic, Location::Antarctic]
    }

    /// Human-readable place name used in rendered text
    pub fn place_name(&self) -> &'static str {
        match self {
            Location::Arctic => "the Arctic",
            Location::Antarctic => "Antarctica",
        }
    }

    /// Series label used in tables and charts
    pub fn label(&self) -> &'static str {
        match self {
            Location::Arctic => "Arctic Temperature",
            Location::Antarctic => "Antarctic Temperature",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Arctic => write!(f, "arctic"),
            Location::Antarctic => write!(f, "antarctic"),
        }
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arctic" | "north" | "a" => Ok(Location::Arctic),
            "antarctic" | "antarctica" | "south" | "b" => Ok(Location::Antarctic),
            other => Err(format!("Unknown location: {}", other)),
        }
    }
}

/// A single simulated reading
///
/// Readings are created once per tick and never mutated afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    /// Temperature at location A in degrees Celsius
    pub arctic_temp: f64,
    /// Temperature at location B in degrees Celsius
    pub antarctic_temp: f64,
    /// Local wall-clock time the reading was taken
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
}

impl Reading {
    pub fn new(arctic_temp: f64, antarctic_temp: f64, timestamp: NaiveDateTime) -> Self {
        Self {
            arctic_temp,
            antarctic_temp,
            timestamp,
        }
    }

    /// Temperature recorded for a location
    pub fn temperature(&self, location: Location) -> f64 {
        match location {
            Location::Arctic => self.arctic_temp,
            Location::Antarctic => self.antarctic_temp,
        }
    }

    /// Timestamp rendered in the fixed display format
    pub fn timestamp_label(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Read-only view of the history at a point in time
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Snapshot {
    /// Readings in insertion order, oldest first
    pub readings: Vec<Reading>,
    /// Maximum number of readings the history retains
    pub capacity: usize,
    /// Total number of ticks produced since startup
    pub sequence: u64,
}

impl Snapshot {
    /// Snapshot of a history that has not been ticked yet
    pub fn empty(capacity: usize) -> Self {
        Self {
            readings: Vec::new(),
            capacity,
            sequence: 0,
        }
    }

    /// Most recent reading, if any
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.last()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Serde adapter rendering `NaiveDateTime` in [`TIMESTAMP_FORMAT`]
pub mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
