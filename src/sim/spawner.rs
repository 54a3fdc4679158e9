//! Enemy spawn pacing
//!
//! The interval shrinks by a fixed step after every spawn until it reaches
//! the floor, so pressure only ever rises within a run.

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    /// Milliseconds since the last spawn
    pub timer_ms: f32,
    /// Milliseconds required between spawns
    pub interval_ms: f32,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            timer_ms: 0.0,
            interval_ms: tuning.spawn_interval_start_ms,
        }
    }

    /// Back to the run-start pacing
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Accumulate elapsed time; returns true when an enemy is due
    pub fn advance(&mut self, dt_ms: f32, tuning: &Tuning) -> bool {
        self.timer_ms += dt_ms;
        if self.timer_ms <= self.interval_ms {
            return false;
        }
        self.timer_ms = 0.0;
        self.interval_ms =
            (self.interval_ms - tuning.spawn_interval_step_ms).max(tuning.spawn_interval_floor_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawns_after_interval() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning);
        assert!(!spawner.advance(1000.0, &tuning));
        // Exactly reaching the interval is not enough
        assert!(!spawner.advance(1000.0, &tuning));
        assert!(spawner.advance(1.0, &tuning));
        assert_eq!(spawner.timer_ms, 0.0);
        assert_eq!(spawner.interval_ms, 1995.0);
    }

    #[test]
    fn test_interval_floor() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning);
        let mut spawns = 0;
        while spawner.interval_ms > tuning.spawn_interval_floor_ms {
            if spawner.advance(2001.0, &tuning) {
                spawns += 1;
            }
        }
        // (2000 - 800) / 5 steps down to the floor
        assert_eq!(spawns, 240);
        assert!(spawner.advance(801.0, &tuning));
        assert_eq!(spawner.interval_ms, 800.0);
    }

    #[test]
    fn test_reset() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning);
        spawner.advance(5000.0, &tuning);
        spawner.advance(300.0, &tuning);
        spawner.reset(&tuning);
        assert_eq!(spawner, Spawner::new(&tuning));
    }

    proptest! {
        #[test]
        fn prop_interval_non_increasing_and_floored(deltas in prop::collection::vec(0.0f32..3000.0, 1..400)) {
            let tuning = Tuning::default();
            let mut spawner = Spawner::new(&tuning);
            let mut previous = spawner.interval_ms;
            for dt in deltas {
                spawner.advance(dt, &tuning);
                prop_assert!(spawner.interval_ms <= previous);
                prop_assert!(spawner.interval_ms >= tuning.spawn_interval_floor_ms);
                previous = spawner.interval_ms;
            }
        }
    }
}
