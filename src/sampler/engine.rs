//! Sampler engine
//!
//! Owns the history and is its only writer. Each tick generates a reading,
//! appends it, and publishes a fresh snapshot on a watch channel. Readers hold
//! a [`SnapshotFeed`] and only ever observe complete snapshots.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::history::History;
use super::source::{Clock, SystemClock, TemperatureSource, UniformSource};
use super::types::{Location, Reading, Snapshot};
use crate::config::SamplerConfig;

/// Single-writer producer of readings
pub struct Sampler {
    history: History,
    source: Box<dyn TemperatureSource>,
    clock: Box<dyn Clock>,
    sequence: u64,
    publisher: watch::Sender<Arc<Snapshot>>,
}

impl Sampler {
    /// Sampler drawing uniform random temperatures stamped with local time
    pub fn new(config: &SamplerConfig) -> Self {
        Self::with_sources(
            config.capacity,
            UniformSource::new(config.min_temp, config.max_temp, config.precision),
            SystemClock,
        )
    }

    /// Sampler with explicit value and time sources
    pub fn with_sources(
        capacity: usize,
        source: impl TemperatureSource + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        let history = History::new(capacity);
        let (publisher, _) = watch::channel(Arc::new(history.snapshot(0)));

        Self {
            history,
            source: Box::new(source),
            clock: Box::new(clock),
            sequence: 0,
            publisher,
        }
    }

    /// Produce one reading, append it, and publish the new snapshot
    pub fn tick(&mut self) -> Reading {
        let arctic_temp = self.source.sample(Location::Arctic);
        let antarctic_temp = self.source.sample(Location::Antarctic);

        // Timestamps never go backwards even if the wall clock does.
        let mut timestamp = self.clock.now();
        if let Some(last) = self.history.latest() {
            timestamp = timestamp.max(last.timestamp);
        }

        let reading = Reading::new(arctic_temp, antarctic_temp, timestamp);
        self.sequence += 1;

        if let Some(evicted) = self.history.push(reading) {
            tracing::trace!(
                evicted_at = %evicted.timestamp_label(),
                "Evicted oldest reading"
            );
        }

        tracing::debug!(
            sequence = self.sequence,
            arctic_temp,
            antarctic_temp,
            timestamp = %reading.timestamp_label(),
            history_len = self.history.len(),
            "Generated reading"
        );

        self.publisher
            .send_replace(Arc::new(self.history.snapshot(self.sequence)));

        reading
    }

    /// Current history and latest reading
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.publisher.borrow())
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Number of ticks produced so far
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Read-only handle that observes every published snapshot
    pub fn subscribe(&self) -> SnapshotFeed {
        SnapshotFeed {
            receiver: self.publisher.subscribe(),
        }
    }

    /// Run `tick` on a fixed schedule in a background task
    ///
    /// The first tick fires immediately. Ticks that fall behind are delayed
    /// rather than bursted.
    pub fn spawn(mut self, period: Duration) -> SamplerHandle {
        let feed = self.subscribe();
        let period = period.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::info!(
                interval_ms = period.as_millis() as u64,
                capacity = self.history.capacity(),
                "Sampler started"
            );

            loop {
                interval.tick().await;
                self.tick();
            }
        });

        SamplerHandle { task, feed }
    }
}

/// Read-only subscription to the sampler's snapshots
#[derive(Clone)]
pub struct SnapshotFeed {
    receiver: watch::Receiver<Arc<Snapshot>>,
}

impl SnapshotFeed {
    /// Feed that always returns the given snapshot
    pub fn fixed(snapshot: Snapshot) -> Self {
        let (_, receiver) = watch::channel(Arc::new(snapshot));
        Self { receiver }
    }

    /// Latest published snapshot
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.receiver.borrow())
    }

    /// Wait for the next snapshot. Returns `None` once the sampler is gone.
    pub async fn next(&mut self) -> Option<Arc<Snapshot>> {
        self.receiver.changed().await.ok()?;
        Some(Arc::clone(&*self.receiver.borrow_and_update()))
    }
}

/// Handle to a running sampler task
pub struct SamplerHandle {
    task: JoinHandle<()>,
    feed: SnapshotFeed,
}

impl SamplerHandle {
    pub fn feed(&self) -> SnapshotFeed {
        self.feed.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop ticking
    pub fn shutdown(self) {
        self.task.abort();
        tracing::info!("Sampler stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::source::testing::{ManualClock, ScriptedSource};
    use crate::views::{self, Outcome};
    use chrono::{NaiveDate, NaiveDateTime};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn sampler(capacity: usize, pairs: Vec<(f64, f64)>) -> (Sampler, ManualClock) {
        let clock = ManualClock::new(start());
        let sampler = Sampler::with_sources(capacity, ScriptedSource::new(pairs), clock.clone());
        (sampler, clock)
    }

    #[test]
    fn test_len_tracks_ticks_up_to_capacity() {
        let (mut sampler, clock) = sampler(20, vec![]);
        for n in 1..=25 {
            sampler.tick();
            clock.advance_secs(5);
            assert_eq!(sampler.history().len(), n.min(20));
        }
        assert_eq!(sampler.sequence(), 25);
    }

    #[test]
    fn test_first_reading_gone_after_capacity_plus_one() {
        let (mut sampler, clock) = sampler(3, vec![]);
        let first = sampler.tick();
        for _ in 0..3 {
            clock.advance_secs(5);
            sampler.tick();
        }

        let snapshot = sampler.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert!(!snapshot.readings.contains(&first));
    }

    #[test]
    fn test_capacity_three_keeps_last_three_ticks() {
        let (mut sampler, clock) = sampler(
            3,
            vec![(-17.0, -16.5), (-16.0, -17.2), (-17.5, -17.5), (-16.8, -16.1)],
        );

        let mut produced = Vec::new();
        for _ in 0..4 {
            produced.push(sampler.tick());
            clock.advance_secs(5);
        }

        let snapshot = sampler.snapshot();
        assert_eq!(snapshot.readings, produced[1..].to_vec());
        let latest = snapshot.latest().unwrap();
        assert_eq!(latest.arctic_temp, -16.8);
        assert_eq!(latest.antarctic_temp, -16.1);

        let comparison = views::compare(&snapshot).unwrap();
        assert_eq!(comparison.outcome, Outcome::AntarcticWarmer);
        assert_eq!(comparison.timestamp, produced[3].timestamp);
    }

    #[test]
    fn test_timestamps_never_decrease() {
        let (mut sampler, clock) = sampler(10, vec![]);
        let first = sampler.tick();

        clock.set(start() - chrono::Duration::hours(1));
        let second = sampler.tick();

        assert_eq!(second.timestamp, first.timestamp);
    }

    #[test]
    fn test_snapshot_before_first_tick_is_empty() {
        let (sampler, _) = sampler(20, vec![]);
        let snapshot = sampler.snapshot();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.sequence, 0);
        assert_eq!(snapshot.capacity, 20);
    }

    #[tokio::test]
    async fn test_feed_observes_each_tick() {
        let (mut sampler, _) = sampler(5, vec![(-17.0, -16.0)]);
        let mut feed = sampler.subscribe();

        sampler.tick();
        let snapshot = feed.next().await.unwrap();
        assert_eq!(snapshot.sequence, 1);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(feed.current().sequence, 1);
    }

    #[tokio::test]
    async fn test_feed_ends_when_sampler_dropped() {
        let (sampler, _) = sampler(5, vec![]);
        let mut feed = sampler.subscribe();
        drop(sampler);
        assert!(feed.next().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_sampler_ticks_on_schedule() {
        let (sampler, _) = sampler(20, vec![]);
        let handle = sampler.spawn(Duration::from_secs(5));
        let mut feed = handle.feed();

        let first = feed.next().await.unwrap();
        assert_eq!(first.sequence, 1);

        let second = feed.next().await.unwrap();
        assert_eq!(second.sequence, 2);

        assert!(handle.is_running());
        handle.shutdown();
    }

    #[test]
    fn test_fixed_feed_returns_snapshot() {
        let feed = SnapshotFeed::fixed(Snapshot::empty(7));
        assert_eq!(feed.current().capacity, 7);
    }
}
