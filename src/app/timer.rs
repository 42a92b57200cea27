//! Wall-clock play timer.

use std::time::{Duration, Instant};

/// Elapsed play time: a banked duration plus the current running stretch.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameTimer {
    banked: Duration,
    running_since: Option<Instant>,
}

impl GameTimer {
    /// A stopped timer at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to zero and start running.
    pub fn restart(&mut self) {
        self.banked = Duration::ZERO;
        self.running_since = Some(Instant::now());
    }

    /// Add previously accumulated time, e.g. from a restored session.
    pub fn add(&mut self, duration: Duration) {
        self.banked += duration;
    }

    /// Stop and pin the reading to `elapsed`.
    pub fn freeze_at(&mut self, elapsed: Duration) {
        self.banked = elapsed;
        self.running_since = None;
    }

    /// Stop, keeping the current reading.
    pub fn stop(&mut self) -> Duration {
        let elapsed = self.elapsed();
        self.freeze_at(elapsed);
        elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        let running = self
            .running_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or_default();
        self.banked + running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_stopped_at_zero() {
        let timer = GameTimer::new();
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_restored_time_is_added_to_running_time() {
        let mut timer = GameTimer::new();
        timer.restart();
        timer.add(Duration::from_secs(90));

        let later = Instant::now() + Duration::from_secs(5);
        assert!(timer.elapsed_at(later) >= Duration::from_secs(95));
    }

    #[test]
    fn test_freeze_pins_reading() {
        let mut timer = GameTimer::new();
        timer.restart();
        timer.freeze_at(Duration::from_secs(42));

        let later = Instant::now() + Duration::from_secs(60);
        assert_eq!(timer.elapsed_at(later), Duration::from_secs(42));
        assert!(!timer.is_running());
    }

    #[test]
    fn test_stop_keeps_reading() {
        let mut timer = GameTimer::new();
        timer.add(Duration::from_secs(3));
        assert_eq!(timer.stop(), Duration::from_secs(3));
    }
}
