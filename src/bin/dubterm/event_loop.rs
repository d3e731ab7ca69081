//! Core runtime loop that coordinates input events, background jobs, and repaints.

mod input_dispatch;
mod job_drain;
mod tick;

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::select;
use dubterm::api::{SubmissionRequest, TranslationResult};
use dubterm::job::{ProbeMessage, SubmissionJob, SubmissionMessage, VideoProbeJob};
use dubterm::{log_debug, log_debug_content};

use crate::event_state::{AlertContent, Deadlines, UiState, Wiring};
use crate::input::InputEvent;
use crate::overlays::{show_alert_overlay, show_help_overlay, show_progress_overlay, OverlayMode};
use crate::prefs::{save_prefs, snapshot};
use crate::results::ResultsState;
use crate::screen::{format_screen, ScreenView};
use crate::status_line::Phase;
use crate::status_messages::{
    FAILURE_HEADING, HEALTH_ALERT_BODY, HEALTH_ALERT_HEADING, HEALTH_OK_LOG,
};
use crate::writer::{try_send_message, WriterMessage};
use input_dispatch::dispatch_input;
use job_drain::{drain_probe_messages, drain_submission_messages};
use tick::run_tick;

/// Ceiling on how long the loop sleeps before the next tick pass runs.
const TICK_INTERVAL: Duration = Duration::from_millis(20);
/// Spinner advance cadence while a submission is in flight.
const SPINNER_FRAME_INTERVAL: Duration = Duration::from_millis(120);
/// How long a transient status message stays up before the phase text returns.
const TRANSIENT_STATUS_TTL: Duration = Duration::from_secs(3);

pub(crate) fn run_event_loop(state: &mut UiState, deadlines: &mut Deadlines, wiring: &mut Wiring) {
    let mut last_tick = Instant::now();
    render_screen(state, wiring);
    loop {
        let now = Instant::now();
        if now.duration_since(last_tick) >= TICK_INTERVAL {
            run_tick(state, deadlines, wiring, now);
            last_tick = now;
        }
        let input_rx = &wiring.input_rx;
        select! {
            recv(input_rx) -> event => {
                // A closed channel means the capture thread is gone; shut down.
                let Ok(event) = event else { return };
                if dispatch_input(state, deadlines, wiring, event).is_break() {
                    return;
                }
            }
            default(TICK_INTERVAL) => {}
        }
    }
}

/// Rebuild the full frame for the current state and hand it to the writer.
fn render_screen(state: &UiState, wiring: &Wiring) {
    let colors = state.palette();
    let status = state.status_text();
    let view = ScreenView {
        colors: &colors,
        form: &state.form,
        results: state.results.as_ref(),
        phase: state.phase,
        status: &status,
        spinner: state.spinner_frame(&colors),
        rows: state.terminal_rows,
        cols: state.terminal_cols,
    };
    let _ = try_send_message(
        &wiring.writer_tx,
        WriterMessage::Screen {
            lines: format_screen(&view),
        },
    );
}

fn render_overlay_for_state(state: &UiState, wiring: &Wiring) {
    let colors = state.palette();
    match state.overlay_mode {
        OverlayMode::Progress => show_progress_overlay(
            &wiring.writer_tx,
            &colors,
            state.terminal_cols,
            state.spinner_frame(&colors),
            state.rotation.current(),
        ),
        OverlayMode::Alert => {
            if let Some(alert) = &state.alert {
                show_alert_overlay(
                    &wiring.writer_tx,
                    &colors,
                    state.terminal_cols,
                    &alert.heading,
                    &alert.body,
                );
            }
        }
        OverlayMode::Help => show_help_overlay(&wiring.writer_tx, &colors, state.terminal_cols),
        OverlayMode::None => {}
    }
}

fn close_overlay(state: &mut UiState, wiring: &Wiring) {
    state.overlay_mode = OverlayMode::None;
    let _ = try_send_message(&wiring.writer_tx, WriterMessage::ClearOverlay);
}

/// Show `message` in the status row, optionally reverting after a deadline.
fn set_transient_status(
    state: &mut UiState,
    deadlines: &mut Deadlines,
    wiring: &Wiring,
    message: &str,
    clear_after: Option<Duration>,
) {
    state.current_status = Some(message.to_string());
    deadlines.status_clear_deadline = clear_after.map(|after| Instant::now() + after);
    render_screen(state, wiring);
}

/// Kick off the health-then-translate worker and switch the UI into the
/// busy flow: progress overlay up, captions rotating, prior result gone.
fn start_submission(
    state: &mut UiState,
    deadlines: &mut Deadlines,
    wiring: &mut Wiring,
    request: SubmissionRequest,
) {
    log_debug(&format!(
        "submitting dub request: language '{}', voice '{}'",
        request.target_language, request.voice_id
    ));
    log_debug_content(&format!("dub source: {}", request.video.describe()));
    wiring.submission = Some(SubmissionJob::spawn(Arc::clone(&wiring.client), request));
    state.phase = Phase::Checking;
    state.results = None;
    state.current_status = None;
    deadlines.status_clear_deadline = None;
    state.spinner_idx = 0;
    state.rotation.start(Instant::now());
    state.overlay_mode = OverlayMode::Progress;
    render_screen(state, wiring);
    render_overlay_for_state(state, wiring);
}

fn fail_submission(
    state: &mut UiState,
    deadlines: &mut Deadlines,
    wiring: &mut Wiring,
    heading: &str,
    body: String,
) {
    wiring.submission = None;
    state.phase = Phase::Failed;
    state.rotation.stop();
    state.current_status = None;
    deadlines.status_clear_deadline = None;
    state.alert = Some(AlertContent {
        heading: heading.to_string(),
        body,
    });
    state.overlay_mode = OverlayMode::Alert;
    render_screen(state, wiring);
    // Replaces the progress panel in place; the writer scrubs the old frame.
    render_overlay_for_state(state, wiring);
}

fn complete_submission(
    state: &mut UiState,
    deadlines: &mut Deadlines,
    wiring: &mut Wiring,
    mut result: TranslationResult,
    now: Instant,
) {
    result.output_video_url = wiring.client.resolve_media_url(&result.output_video_url);
    log_debug("dub completed, probing the rendered video");
    log_debug_content(&format!("dub output: {}", result.output_video_url));
    wiring.probe = Some(VideoProbeJob::spawn(
        Arc::clone(&wiring.client),
        result.output_video_url.clone(),
    ));
    wiring.submission = None;
    state.results = Some(ResultsState::new(result, now));
    state.phase = Phase::Idle;
    state.rotation.stop();
    state.current_status = None;
    deadlines.status_clear_deadline = None;
    close_overlay(state, wiring);
    render_screen(state, wiring);
}

fn dismiss_alert(state: &mut UiState, wiring: &Wiring) {
    state.alert = None;
    if state.phase == Phase::Failed {
        state.phase = Phase::Idle;
    }
    close_overlay(state, wiring);
    render_screen(state, wiring);
}

fn cycle_theme_and_save(state: &mut UiState, deadlines: &mut Deadlines, wiring: &Wiring) {
    state.cycle_theme();
    save_prefs(&snapshot(state.theme, &state.server));
    set_transient_status(
        state,
        deadlines,
        wiring,
        &format!("Theme: {}", state.theme),
        Some(TRANSIENT_STATUS_TTL),
    );
    render_overlay_for_state(state, wiring);
}

fn apply_resize(state: &mut UiState, wiring: &Wiring, rows: u16, cols: u16) {
    if state.terminal_rows == rows && state.terminal_cols == cols {
        return;
    }
    state.terminal_rows = rows;
    state.terminal_cols = cols;
    let _ = try_send_message(&wiring.writer_tx, WriterMessage::Resize { rows, cols });
    render_screen(state, wiring);
    render_overlay_for_state(state, wiring);
}

#[cfg(test)]
mod tests;
