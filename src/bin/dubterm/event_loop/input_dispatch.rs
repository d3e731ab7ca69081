//! Routes key events to the form or to whichever overlay is on top.

use super::*;

pub(super) fn dispatch_input(
    state: &mut UiState,
    deadlines: &mut Deadlines,
    wiring: &mut Wiring,
    evt: InputEvent,
) -> ControlFlow<()> {
    if state.overlay_mode != OverlayMode::None {
        return dispatch_overlay_input(state, deadlines, wiring, evt);
    }

    match evt {
        InputEvent::Char(c) => {
            state.form.insert_char(c);
            render_screen(state, wiring);
        }
        InputEvent::Backspace => {
            state.form.backspace();
            render_screen(state, wiring);
        }
        InputEvent::FocusNext => {
            state.form.focus_next();
            render_screen(state, wiring);
        }
        InputEvent::FocusPrev => {
            state.form.focus_prev();
            render_screen(state, wiring);
        }
        InputEvent::CycleLeft => {
            state.form.cycle_selection(-1);
            render_screen(state, wiring);
        }
        InputEvent::CycleRight => {
            state.form.cycle_selection(1);
            render_screen(state, wiring);
        }
        InputEvent::Submit => submit_form(state, deadlines, wiring),
        InputEvent::ClearForm => {
            // Mirrors the clear button: the form resets and any shown result
            // goes away. An in-flight submission keeps running.
            state.form.clear();
            state.results = None;
            render_screen(state, wiring);
        }
        InputEvent::CycleTheme => cycle_theme_and_save(state, deadlines, wiring),
        InputEvent::HelpToggle => {
            state.overlay_mode = OverlayMode::Help;
            render_overlay_for_state(state, wiring);
        }
        InputEvent::Dismiss => {
            if state.phase == Phase::Failed {
                state.phase = Phase::Idle;
                render_screen(state, wiring);
            }
        }
        InputEvent::Exit => return ControlFlow::Break(()),
        InputEvent::Resize { cols, rows } => apply_resize(state, wiring, rows, cols),
    }
    ControlFlow::Continue(())
}

fn submit_form(state: &mut UiState, deadlines: &mut Deadlines, wiring: &mut Wiring) {
    // The progress overlay normally swallows Enter first; this guard keeps a
    // second submission impossible even if it ever does not.
    if state.phase.is_busy() {
        return;
    }
    match state.form.build_request() {
        Ok(request) => start_submission(state, deadlines, wiring, request),
        Err(reason) => {
            set_transient_status(state, deadlines, wiring, reason, Some(TRANSIENT_STATUS_TTL));
        }
    }
}

fn dispatch_overlay_input(
    state: &mut UiState,
    deadlines: &mut Deadlines,
    wiring: &mut Wiring,
    evt: InputEvent,
) -> ControlFlow<()> {
    match evt {
        InputEvent::Dismiss | InputEvent::Submit => match state.overlay_mode {
            OverlayMode::Alert => dismiss_alert(state, wiring),
            OverlayMode::Help => {
                close_overlay(state, wiring);
                render_screen(state, wiring);
            }
            // The progress panel stays up until the job reports back.
            OverlayMode::Progress | OverlayMode::None => {}
        },
        InputEvent::HelpToggle => {
            if state.overlay_mode == OverlayMode::Help {
                close_overlay(state, wiring);
                render_screen(state, wiring);
            }
        }
        InputEvent::CycleTheme => cycle_theme_and_save(state, deadlines, wiring),
        InputEvent::Exit => return ControlFlow::Break(()),
        InputEvent::Resize { cols, rows } => apply_resize(state, wiring, rows, cols),
        _ => {}
    }
    ControlFlow::Continue(())
}
