//! Event loop state containers: UI state, deadlines, and runtime handles.

use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};

use dubterm::client::TranslatorApi;
use dubterm::job::{SubmissionJob, VideoProbeJob};

use crate::color_mode::ColorMode;
use crate::config::{materialize, DubConfig};
use crate::form::FormState;
use crate::input::InputEvent;
use crate::overlays::OverlayMode;
use crate::results::ResultsState;
use crate::rotation::MessageRotation;
use crate::status_line::Phase;
use crate::status_messages::{STATUS_CHECKING, STATUS_COMPLETE, STATUS_FAILED, STATUS_IDLE};
use crate::theme::{spinner_frames, Theme, ThemeColors};
use crate::writer::WriterMessage;

/// Alert panel content, kept so theme cycles and resizes can repaint it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AlertContent {
    pub(crate) heading: String,
    pub(crate) body: String,
}

/// Mutable UI state owned by the event loop.
pub(crate) struct UiState {
    pub(crate) form: FormState,
    pub(crate) results: Option<ResultsState>,
    pub(crate) phase: Phase,
    pub(crate) overlay_mode: OverlayMode,
    pub(crate) alert: Option<AlertContent>,
    pub(crate) rotation: MessageRotation,
    pub(crate) current_status: Option<String>,
    pub(crate) theme: Theme,
    pub(crate) color_mode: ColorMode,
    pub(crate) ascii: bool,
    pub(crate) spinner_idx: usize,
    pub(crate) terminal_rows: u16,
    pub(crate) terminal_cols: u16,
    pub(crate) server: String,
}

impl UiState {
    pub(crate) fn new(
        config: &DubConfig,
        theme: Theme,
        server: String,
        rows: u16,
        cols: u16,
    ) -> Self {
        let mut form = FormState::new(&config.language, config.starting_voice());
        if let Some(path) = &config.video {
            form.video_path = path.display().to_string();
        }
        if let Some(url) = &config.video_url {
            form.video_url = url.clone();
        }
        Self {
            form,
            results: None,
            phase: Phase::Idle,
            overlay_mode: OverlayMode::None,
            alert: None,
            rotation: MessageRotation::new(),
            current_status: None,
            theme,
            color_mode: config.color_mode(),
            ascii: config.ascii,
            spinner_idx: 0,
            terminal_rows: rows,
            terminal_cols: cols,
            server,
        }
    }

    /// Colors for the current theme after capability and glyph policy.
    pub(crate) fn palette(&self) -> ThemeColors {
        materialize(self.theme, self.color_mode, self.ascii)
    }

    /// Advance to the next theme in the cycle.
    pub(crate) fn cycle_theme(&mut self) {
        self.theme = self.theme.next_in_cycle();
    }

    /// Current spinner frame, empty outside busy phases.
    pub(crate) fn spinner_frame(&self, colors: &ThemeColors) -> &'static str {
        if !self.phase.is_busy() {
            return "";
        }
        let frames = spinner_frames(colors.glyph_set);
        frames[self.spinner_idx % frames.len()]
    }

    pub(crate) fn has_revealed_result(&self) -> bool {
        self.results.as_ref().is_some_and(|r| r.revealed)
    }

    /// Status-row text: a transient message wins, then the phase default.
    pub(crate) fn status_text(&self) -> String {
        if let Some(status) = &self.current_status {
            return status.clone();
        }
        match self.phase {
            Phase::Idle if self.has_revealed_result() => STATUS_COMPLETE.to_string(),
            Phase::Idle => STATUS_IDLE.to_string(),
            Phase::Checking => STATUS_CHECKING.to_string(),
            Phase::Submitting => self.rotation.current().to_string(),
            Phase::Failed => STATUS_FAILED.to_string(),
        }
    }
}

/// Deadlines the periodic pass checks each tick.
#[derive(Debug, Default)]
pub(crate) struct Deadlines {
    pub(crate) status_clear_deadline: Option<Instant>,
    pub(crate) last_spinner_tick: Option<Instant>,
}

/// Channels and job handles the loop drives.
pub(crate) struct Wiring {
    pub(crate) client: Arc<dyn TranslatorApi>,
    pub(crate) writer_tx: Sender<WriterMessage>,
    pub(crate) input_rx: Receiver<InputEvent>,
    pub(crate) submission: Option<SubmissionJob>,
    pub(crate) probe: Option<VideoProbeJob>,
}
