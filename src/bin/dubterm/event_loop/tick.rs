//! Time-driven work: job drains, spinner and caption cadence, status expiry.

use super::*;

pub(super) fn run_tick(
    state: &mut UiState,
    deadlines: &mut Deadlines,
    wiring: &mut Wiring,
    now: Instant,
) {
    drain_submission_messages(state, deadlines, wiring, now);
    drain_probe_messages(state, wiring);

    if state.rotation.tick(now) {
        render_screen(state, wiring);
        if state.overlay_mode == OverlayMode::Progress {
            render_overlay_for_state(state, wiring);
        }
    }

    if state.phase.is_busy() {
        let due = deadlines
            .last_spinner_tick
            .is_none_or(|last| now.duration_since(last) >= SPINNER_FRAME_INTERVAL);
        if due {
            state.spinner_idx = state.spinner_idx.wrapping_add(1);
            deadlines.last_spinner_tick = Some(now);
            render_screen(state, wiring);
            if state.overlay_mode == OverlayMode::Progress {
                render_overlay_for_state(state, wiring);
            }
        }
    } else {
        deadlines.last_spinner_tick = None;
    }

    let mut repaint = false;
    if let Some(results) = state.results.as_mut() {
        if results.tick_reveal(now) {
            repaint = true;
        }
        if results.tick_probe_fallback(now) {
            log_debug("video probe timed out, offering the direct link");
            if results.revealed {
                repaint = true;
            }
        }
    }
    if repaint {
        render_screen(state, wiring);
    }

    if let Some(deadline) = deadlines.status_clear_deadline {
        if now >= deadline {
            deadlines.status_clear_deadline = None;
            state.current_status = None;
            render_screen(state, wiring);
        }
    }
}
