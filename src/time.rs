use std::collections::VecDeque;
use std::time::Instant;

/// Source of per-tick delta time, in seconds.
pub trait TimeSource {
    /// Seconds elapsed since the previous call. Never negative.
    fn advance(&mut self) -> f32;
}

/// Wall-clock delta keeper. The first call yields 0; later deltas are capped at
/// `max_delta` so a stalled window does not fling the animation forward.
#[derive(Debug)]
pub struct TimeKeeper {
    last: Option<Instant>,
    max_delta: f32,
}

impl TimeKeeper {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last: None,
            max_delta: max_delta.max(0.0),
        }
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    fn advance_to(&mut self, now: Instant) -> f32 {
        let delta = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        delta.min(self.max_delta)
    }
}

impl Default for TimeKeeper {
    fn default() -> Self {
        Self::new(0.064)
    }
}

impl TimeSource for TimeKeeper {
    fn advance(&mut self) -> f32 {
        self.advance_to(Instant::now())
    }
}

/// Scripted deltas for headless runs and tests. Once the script runs out,
/// `fallback` is returned.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    deltas: VecDeque<f32>,
    fallback: f32,
}

impl ManualTime {
    pub fn new(fallback: f32) -> Self {
        Self {
            deltas: VecDeque::new(),
            fallback: fallback.max(0.0),
        }
    }

    pub fn with_deltas(deltas: impl IntoIterator<Item = f32>) -> Self {
        let mut time = Self::new(0.0);
        time.deltas.extend(deltas);
        time
    }

    pub fn push(&mut self, delta: f32) {
        self.deltas.push_back(delta);
    }

    pub fn remaining(&self) -> usize {
        self.deltas.len()
    }
}

impl TimeSource for ManualTime {
    fn advance(&mut self) -> f32 {
        self.deltas.pop_front().unwrap_or(self.fallback).max(0.0)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Box<T> {
    fn advance(&mut self) -> f32 {
        (**self).advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_tick_is_zero_then_clamped() {
        let mut keeper = TimeKeeper::new(0.05);
        let start = Instant::now();
        assert_eq!(keeper.advance_to(start), 0.0);

        let delta = keeper.advance_to(start + Duration::from_millis(20));
        assert!((delta - 0.02).abs() < 1e-4);

        assert_eq!(keeper.advance_to(start + Duration::from_secs(3)), 0.05);
    }

    #[test]
    fn clock_going_backwards_yields_zero() {
        let mut keeper = TimeKeeper::default();
        let start = Instant::now() + Duration::from_secs(1);
        keeper.advance_to(start);
        assert_eq!(keeper.advance_to(start - Duration::from_millis(500)), 0.0);
    }

    #[test]
    fn manual_time_replays_script_then_falls_back() {
        let mut time = ManualTime::with_deltas([0.1, 0.2]);
        time.fallback = 0.5;
        assert_eq!(time.advance(), 0.1);
        assert_eq!(time.advance(), 0.2);
        assert_eq!(time.remaining(), 0);
        assert_eq!(time.advance(), 0.5);
    }
}
