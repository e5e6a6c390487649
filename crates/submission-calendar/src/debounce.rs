//! Trailing-edge debounce for search input.
//!
//! Every trigger pushes the deadline back to `now + wait`; the pending call
//! fires once, at the first poll on or after the deadline. Time is passed in
//! by the caller so the host's event loop stays in charge of scheduling.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Record an input event, replacing any pending deadline.
    ///
    /// A wait too long to represent as an `Instant` never comes due.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = now.checked_add(self.wait);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending call is due, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True exactly once per burst, when `now` has reached the deadline.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
