//! Rotating progress captions so a long render never looks stalled.

use std::time::{Duration, Instant};

use crate::status_messages::PROGRESS_MESSAGES;

pub(crate) const ROTATION_INTERVAL: Duration = Duration::from_millis(5_000);

#[derive(Debug)]
pub(crate) struct MessageRotation {
    active: bool,
    index: usize,
    next_step_at: Option<Instant>,
}

impl MessageRotation {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            index: 0,
            next_step_at: None,
        }
    }

    /// Restart from the first caption and schedule the next step.
    pub(crate) fn start(&mut self, now: Instant) {
        self.active = true;
        self.index = 0;
        self.next_step_at = Some(now + ROTATION_INTERVAL);
    }

    pub(crate) fn stop(&mut self) {
        self.active = false;
        self.index = 0;
        self.next_step_at = None;
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    /// Advance once the interval elapsed; returns whether the caption changed.
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        if !self.active {
            return false;
        }
        let Some(due) = self.next_step_at else {
            return false;
        };
        if now < due {
            return false;
        }
        self.index = (self.index + 1) % PROGRESS_MESSAGES.len();
        self.next_step_at = Some(now + ROTATION_INTERVAL);
        true
    }

    pub(crate) fn current(&self) -> &'static str {
        PROGRESS_MESSAGES[self.index % PROGRESS_MESSAGES.len()]
    }
}
