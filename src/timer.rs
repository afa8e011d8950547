use std::time::Duration;
use std::time::Instant;

/// One-shot timer for the event loop.
///
/// The owner decides what happens when it fires; the timer only remembers when. All methods take
/// the current time so nothing here reads the clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm the timer to fire `after` from `now`, replacing any pending deadline
    pub fn schedule(&mut self, now: Instant, after: Duration) {
        self.deadline = Some(now + after);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline, `None` when disarmed
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Returns true, and disarms, if the deadline has passed
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if d <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
