//! Tick pacing without catch-up bursts.
//!
//! Deadlines lie on a fixed grid `start + k * period`. When a tick runs past
//! one or more deadlines, those deadlines are dropped instead of being
//! queued, so ticks never overlap and never fire back to back.

use embassy_time::{Duration, Instant};

/// Result of completing a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaceResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick.
    pub sleep_duration: Duration,
    /// Deadlines dropped because the last tick overran them.
    pub skipped: u64,
}

/// Fixed period tick pacer.
///
/// # Usage
///
/// ```ignore
/// let mut pacer = TickPacer::new(Instant::now(), Duration::from_millis(500));
///
/// loop {
///     Timer::at(pacer.deadline()).await;
///     do_work().await;
///     pacer.complete(Instant::now());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TickPacer {
    deadline: Instant,
    period: Duration,
}

impl TickPacer {
    /// Create a pacer whose first deadline is one period after `start`.
    pub fn new(start: Instant, period: Duration) -> Self {
        Self {
            deadline: start + period,
            period,
        }
    }

    /// Deadline of the next tick
    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Mark the current tick done and move to the next deadline after `now`.
    pub fn complete(&mut self, now: Instant) -> PaceResult {
        let period_ms = self.period.as_millis().max(1);
        let mut next_ms = self.deadline.as_millis() + period_ms;
        let mut skipped = 0;

        if next_ms <= now.as_millis() {
            skipped = (now.as_millis() - next_ms) / period_ms + 1;
            next_ms += skipped * period_ms;
        }
        self.deadline = Instant::from_millis(next_ms);

        PaceResult {
            next_deadline: self.deadline,
            sleep_duration: Duration::from_millis(next_ms - now.as_millis()),
            skipped,
        }
    }
}
