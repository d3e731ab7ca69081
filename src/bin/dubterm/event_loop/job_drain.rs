//! Draining of background-job channels, run from the periodic pass.

use super::*;

pub(super) fn drain_submission_messages(
    state: &mut UiState,
    deadlines: &mut Deadlines,
    wiring: &mut Wiring,
    now: Instant,
) {
    loop {
        let Some(message) = wiring.submission.as_ref().and_then(SubmissionJob::try_recv) else {
            return;
        };
        // Terminal messages clear the job handle, which also ends this loop.
        match message {
            SubmissionMessage::HealthOk(_) => {
                log_debug(HEALTH_OK_LOG);
                state.phase = Phase::Submitting;
                render_screen(state, wiring);
            }
            SubmissionMessage::HealthFailed { reason } => {
                log_debug(&format!("health probe failed: {reason}"));
                fail_submission(
                    state,
                    deadlines,
                    wiring,
                    HEALTH_ALERT_HEADING,
                    HEALTH_ALERT_BODY.to_string(),
                );
            }
            SubmissionMessage::Completed(result) => {
                complete_submission(state, deadlines, wiring, result, now);
            }
            SubmissionMessage::Failed { reason } => {
                log_debug(&format!("translation failed: {reason}"));
                fail_submission(state, deadlines, wiring, FAILURE_HEADING, reason);
            }
        }
    }
}

pub(super) fn drain_probe_messages(state: &mut UiState, wiring: &mut Wiring) {
    let Some(message) = wiring.probe.as_ref().and_then(VideoProbeJob::try_recv) else {
        return;
    };
    wiring.probe = None;
    // Ctrl+L may have dropped the result while the probe was in flight.
    let Some(results) = state.results.as_mut() else {
        return;
    };
    let changed = match message {
        ProbeMessage::Ready => results.probe_ready(),
        ProbeMessage::Unavailable { reason } => {
            log_debug(&format!("video probe failed: {reason}"));
            results.probe_unavailable()
        }
    };
    let revealed = results.revealed;
    if changed && revealed {
        render_screen(state, wiring);
    }
}
