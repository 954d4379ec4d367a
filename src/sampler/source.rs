//! Value and time sources for the sampler
//!
//! The sampler never reads randomness or the wall clock directly; it goes
//! through these traits so ticks can be replayed deterministically.

use chrono::{Local, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::Location;

/// Produces one temperature per location per tick
pub trait TemperatureSource: Send {
    fn sample(&mut self, location: Location) -> f64;
}

/// Produces the timestamp for a tick
pub trait Clock: Send {
    fn now(&self) -> NaiveDateTime;
}

/// Uniformly distributed temperatures in a fixed range
pub struct UniformSource<R = StdRng> {
    rng: R,
    min: f64,
    max: f64,
    precision: u32,
}

impl UniformSource<StdRng> {
    /// Source seeded from OS entropy
    pub fn new(min: f64, max: f64, precision: u32) -> Self {
        Self::with_rng(StdRng::from_entropy(), min, max, precision)
    }

    /// Reproducible source for a given seed
    pub fn seeded(seed: u64, min: f64, max: f64, precision: u32) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), min, max, precision)
    }
}

impl<R: Rng> UniformSource<R> {
    pub fn with_rng(rng: R, min: f64, max: f64, precision: u32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            rng,
            min,
            max,
            precision,
        }
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl<R: Rng + Send> TemperatureSource for UniformSource<R> {
    fn sample(&mut self, _location: Location) -> f64 {
        let raw = self.rng.gen_range(self.min..=self.max);
        // Rounding can push a value just past a bound that isn't itself round.
        round_to(raw, self.precision).clamp(self.min, self.max)
    }
}

/// Local wall-clock time truncated to whole seconds
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Round to a number of decimal places
///
/// Precisions too fine for `f64` leave the value unchanged.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(i32::MAX as u32) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Replays a fixed sequence of (arctic, antarctic) pairs, repeating the last
    pub struct ScriptedSource {
        pairs: VecDeque<(f64, f64)>,
        current: (f64, f64),
    }

    impl ScriptedSource {
        pub fn new(pairs: Vec<(f64, f64)>) -> Self {
            Self {
                pairs: pairs.into(),
                current: (-17.0, -17.0),
            }
        }
    }

    impl TemperatureSource for ScriptedSource {
        fn sample(&mut self, location: Location) -> f64 {
            match location {
                Location::Arctic => {
                    if let Some(next) = self.pairs.pop_front() {
                        self.current = next;
                    }
                    self.current.0
                }
                Location::Antarctic => self.current.1,
            }
        }
    }

    /// Clock that a test advances by hand
    #[derive(Clone)]
    pub struct ManualClock {
        now: Arc<Mutex<NaiveDateTime>>,
    }

    impl ManualClock {
        pub fn new(start: NaiveDateTime) -> Self {
            Self {
                now: Arc::new(Mutex::new(start)),
            }
        }

        pub fn set(&self, at: NaiveDateTime) {
            *self.now.lock().unwrap() = at;
        }

        pub fn advance_secs(&self, secs: i64) {
            let mut now = self.now.lock().unwrap();
            *now += chrono::Duration::seconds(secs);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> NaiveDateTime {
            *self.now.lock().unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_source_stays_in_range() {
        let mut source = UniformSource::seeded(42, -18.0, -16.0, 1);
        for _ in 0..1000 {
            for &location in Location::all() {
                let value = source.sample(location);
                assert!((-18.0..=-16.0).contains(&value), "out of range: {}", value);
            }
        }
    }

    #[test]
    fn test_uniform_source_rounds_to_precision() {
        let mut source = UniformSource::seeded(7, -18.0, -16.0, 1);
        for _ in 0..200 {
            let value = source.sample(Location::Arctic);
            assert!(((value * 10.0).round() - value * 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_uniform_source_is_reproducible() {
        let mut a = UniformSource::seeded(99, -18.0, -16.0, 1);
        let mut b = UniformSource::seeded(99, -18.0, -16.0, 1);
        for _ in 0..50 {
            assert_eq!(a.sample(Location::Arctic), b.sample(Location::Arctic));
        }
    }

    #[test]
    fn test_reversed_bounds_are_normalized() {
        let source = UniformSource::seeded(1, -16.0, -18.0, 1);
        assert_eq!(source.range(), (-18.0, -16.0));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(-17.26, 1), -17.3);
        assert_eq!(round_to(-16.04, 1), -16.0);
        assert_eq!(round_to(-16.555, 0), -17.0);
    }

    #[test]
    fn test_extreme_precision_keeps_value() {
        assert_eq!(round_to(-17.25, 400), -17.25);

        let mut source = UniformSource::seeded(3, -18.0, -16.0, 400);
        for _ in 0..100 {
            let value = source.sample(Location::Antarctic);
            assert!(value.is_finite());
            assert!((-18.0..=-16.0).contains(&value));
        }
    }

    #[test]
    fn test_system_clock_has_whole_seconds() {
        assert_eq!(SystemClock.now().nanosecond(), 0);
    }
}
