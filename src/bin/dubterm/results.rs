//! Completed-dub presentation state: reveal pacing and player availability.

use std::time::{Duration, Instant};

use dubterm::api::TranslationResult;

/// Short hold before the result panel appears, letting the overlay clear first.
pub(crate) const REVEAL_DELAY: Duration = Duration::from_millis(100);
/// How long the rendered-video probe may stay silent before the panel falls
/// back to the direct link.
pub(crate) const VIDEO_PROBE_FALLBACK: Duration = Duration::from_millis(2_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VideoStatus {
    /// Probe in flight; show the player placeholder.
    Loading,
    /// Probe fetched bytes; the rendered file is streamable.
    Ready,
    /// Probe failed or timed out; point at the direct link instead.
    Unavailable,
}

#[derive(Debug)]
pub(crate) struct ResultsState {
    pub(crate) result: TranslationResult,
    pub(crate) video_status: VideoStatus,
    pub(crate) revealed: bool,
    reveal_at: Instant,
    probe_fallback_at: Instant,
}

impl ResultsState {
    pub(crate) fn new(result: TranslationResult, now: Instant) -> Self {
        Self {
            result,
            video_status: VideoStatus::Loading,
            revealed: false,
            reveal_at: now + REVEAL_DELAY,
            probe_fallback_at: now + VIDEO_PROBE_FALLBACK,
        }
    }

    /// Flip hidden to shown once the delay passed; returns whether it changed.
    pub(crate) fn tick_reveal(&mut self, now: Instant) -> bool {
        if !self.revealed && now >= self.reveal_at {
            self.revealed = true;
            return true;
        }
        false
    }

    /// Time out a probe that never reported; returns whether status changed.
    pub(crate) fn tick_probe_fallback(&mut self, now: Instant) -> bool {
        if self.video_status == VideoStatus::Loading && now >= self.probe_fallback_at {
            self.video_status = VideoStatus::Unavailable;
            return true;
        }
        false
    }

    /// A probe that fetched bytes always wins, even after the fallback fired.
    pub(crate) fn probe_ready(&mut self) -> bool {
        if self.video_status != VideoStatus::Ready {
            self.video_status = VideoStatus::Ready;
            return true;
        }
        false
    }

    pub(crate) fn probe_unavailable(&mut self) -> bool {
        if self.video_status == VideoStatus::Loading {
            self.video_status = VideoStatus::Unavailable;
            return true;
        }
        false
    }
}
