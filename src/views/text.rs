//! Text views
//!
//! Latest-value strings and the warmer-location comparison.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::cmp::Ordering;

use crate::sampler::{timestamp_format, Location, Reading, Snapshot, TIMESTAMP_FORMAT};

/// Render a temperature the way every text view shows it
pub fn format_temperature(value: f64) -> String {
    format!("{:.1} C", value)
}

/// Latest temperature for one location, e.g. `-17.3 C`
///
/// Returns `None` before the first reading.
pub fn latest_temperature(snapshot: &Snapshot, location: Location) -> Option<String> {
    snapshot
        .latest()
        .map(|reading| format_temperature(reading.temperature(location)))
}

/// Which location is warmer in a reading
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    ArcticWarmer,
    AntarcticWarmer,
    Same,
}

impl Outcome {
    /// The warmer location, `None` on a tie
    pub fn warmer(&self) -> Option<Location> {
        match self {
            Outcome::ArcticWarmer => Some(Location::Arctic),
            Outcome::AntarcticWarmer => Some(Location::Antarctic),
            Outcome::Same => None,
        }
    }
}

/// Comparison of the two temperatures of one reading
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Comparison {
    pub outcome: Outcome,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub arctic_temp: f64,
    pub antarctic_temp: f64,
}

impl Comparison {
    pub fn from_reading(reading: &Reading) -> Self {
        let outcome = match reading.arctic_temp.partial_cmp(&reading.antarctic_temp) {
            Some(Ordering::Greater) => Outcome::ArcticWarmer,
            Some(Ordering::Less) => Outcome::AntarcticWarmer,
            _ => Outcome::Same,
        };

        Self {
            outcome,
            timestamp: reading.timestamp,
            arctic_temp: reading.arctic_temp,
            antarctic_temp: reading.antarctic_temp,
        }
    }

    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let at = self.timestamp.format(TIMESTAMP_FORMAT);
        match self.outcome.warmer() {
            Some(location) => write!(f, "At {} it is warmer in {}", at, location.place_name()),
            None => write!(
                f,
                "At {} it is the same temperature in {} and {}",
                at,
                Location::Arctic.place_name(),
                Location::Antarctic.place_name()
            ),
        }
    }
}

/// Compare the two latest temperatures. `None` before the first reading.
pub fn compare(snapshot: &Snapshot) -> Option<Comparison> {
    snapshot.latest().map(Comparison::from_reading)
}
