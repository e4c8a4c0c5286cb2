//! Pause-aware automatic advance timer.
//!
//! The timer accumulates running time only while not paused. Pausing
//! freezes the accumulated budget; resuming continues from it, so a deadline
//! computed before the pause still applies afterwards. Callers pass `now`
//! explicitly, which keeps the timer a pure value.

use core::time::Duration;

use tokio::time::Instant;

/// Interval timer that does not count paused time.
#[derive(Debug, Clone)]
pub struct SlideTimer {
    interval: Duration,
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl SlideTimer {
    /// A running timer whose budget starts at `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
            running_since: Some(now),
        }
    }

    /// Configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// `true` while paused.
    pub fn is_paused(&self) -> bool {
        self.running_since.is_none()
    }

    /// Restart the budget from `now`. A paused timer stays paused.
    pub fn reset(&mut self, now: Instant) {
        self.accumulated = Duration::ZERO;
        if self.running_since.is_some() {
            self.running_since = Some(now);
        }
    }

    /// Stop accumulating time. No-op when already paused.
    pub fn pause(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += now.saturating_duration_since(since);
        }
    }

    /// Continue accumulating from `now`, keeping the budget already spent.
    pub fn resume(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// Running time counted towards the interval.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.accumulated
            + self
                .running_since
                .map_or(Duration::ZERO, |since| now.saturating_duration_since(since))
    }

    /// Budget left before the next automatic advance.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.interval.saturating_sub(self.elapsed(now))
    }

    /// `true` once the interval has run out. A paused timer never expires.
    pub fn expired(&self, now: Instant) -> bool {
        !self.is_paused() && self.elapsed(now) >= self.interval
    }

    /// When the timer will expire, or `None` while paused.
    pub fn deadline(&self, now: Instant) -> Option<Instant> {
        (!self.is_paused()).then(|| now + self.remaining(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_secs(180);

    #[test]
    fn test_expires_after_interval() {
        let t0 = Instant::now();
        let timer = SlideTimer::new(INTERVAL, t0);
        assert!(!timer.expired(t0 + Duration::from_secs(179)));
        assert!(timer.expired(t0 + INTERVAL));
    }

    #[test]
    fn test_paused_timer_never_expires() {
        let t0 = Instant::now();
        let mut timer = SlideTimer::new(INTERVAL, t0);
        timer.pause(t0);
        assert!(!timer.expired(t0 + Duration::from_secs(300)));
        assert_eq!(timer.deadline(t0 + Duration::from_secs(300)), None);
    }

    #[test]
    fn test_resume_keeps_remaining_budget() {
        let t0 = Instant::now();
        let mut timer = SlideTimer::new(INTERVAL, t0);
        timer.pause(t0 + Duration::from_secs(100));
        let t1 = t0 + Duration::from_secs(400);
        timer.resume(t1);
        assert_eq!(timer.remaining(t1), Duration::from_secs(80));
        assert!(!timer.expired(t1 + Duration::from_secs(1)));
        assert!(timer.expired(t1 + Duration::from_secs(80)));
        assert_eq!(timer.deadline(t1), Some(t1 + Duration::from_secs(80)));
    }

    #[test]
    fn test_reset_restarts_budget() {
        let t0 = Instant::now();
        let mut timer = SlideTimer::new(INTERVAL, t0);
        let t1 = t0 + Duration::from_secs(170);
        timer.reset(t1);
        assert_eq!(timer.remaining(t1), INTERVAL);
    }

    #[test]
    fn test_reset_while_paused_stays_paused() {
        let t0 = Instant::now();
        let mut timer = SlideTimer::new(INTERVAL, t0);
        timer.pause(t0 + Duration::from_secs(50));
        timer.reset(t0 + Duration::from_secs(60));
        assert!(timer.is_paused());
        assert_eq!(timer.elapsed(t0 + Duration::from_secs(500)), Duration::ZERO);
    }
}
