//! Sampler
//!
//! Produces simulated temperature readings on a fixed schedule and keeps the
//! most recent ones in a bounded history.
//!
//! ## Components
//!
//! - [`History`]: FIFO ring of readings with a fixed capacity
//! - [`TemperatureSource`] / [`Clock`]: where values and timestamps come from
//! - [`Sampler`]: the single writer; `tick()` appends and publishes a snapshot
//! - [`SnapshotFeed`]: read-only subscription handed to every view

mod engine;
mod history;
mod source;
mod types;

pub use engine::{Sampler, SamplerHandle, SnapshotFeed};
pub use history::History;
pub use source::{round_to, Clock, SystemClock, TemperatureSource, UniformSource};
pub use types::{timestamp_format, Location, Reading, Snapshot, TIMESTAMP_FORMAT};

#[cfg(test)]
pub(crate) use source::testing;
