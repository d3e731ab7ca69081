use super::*;
use clap::Parser;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use async_trait::async_trait;
use dubterm::api::{ApiError, HealthReport, TranslationReply};
use dubterm::client::TranslatorApi;

use crate::config::DubConfig;
use crate::form::MISSING_SOURCE_ERROR;
use crate::prefs::{self, load_prefs, CONFIG_DIR_ENV};
use crate::results::VideoStatus;
use crate::status_messages::{STATUS_COMPLETE, STATUS_IDLE};
use crate::theme::Theme;

struct StubApi {
    healthy: bool,
    reply: Option<TranslationReply>,
    reject_detail: String,
    translate_delay: Duration,
    health_calls: AtomicUsize,
}

impl StubApi {
    fn healthy_with(reply: TranslationReply) -> Arc<Self> {
        Arc::new(Self {
            healthy: true,
            reply: Some(reply),
            reject_detail: String::new(),
            translate_delay: Duration::ZERO,
            health_calls: AtomicUsize::new(0),
        })
    }

    fn healthy_slow(reply: TranslationReply, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            healthy: true,
            reply: Some(reply),
            reject_detail: String::new(),
            translate_delay: delay,
            health_calls: AtomicUsize::new(0),
        })
    }

    fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            healthy: false,
            reply: None,
            reject_detail: String::new(),
            translate_delay: Duration::ZERO,
            health_calls: AtomicUsize::new(0),
        })
    }

    fn rejecting(detail: &str) -> Arc<Self> {
        Arc::new(Self {
            healthy: true,
            reply: None,
            reject_detail: detail.to_string(),
            translate_delay: Duration::ZERO,
            health_calls: AtomicUsize::new(0),
        })
    }

    fn sample_reply() -> TranslationReply {
        TranslationReply {
            output_video_url: Some("/static/output/dubbed.mp4".to_string()),
            original_text: Some("hello there".to_string()),
            translated_text: Some("bonjour".to_string()),
            ..TranslationReply::default()
        }
    }
}

#[async_trait]
impl TranslatorApi for StubApi {
    async fn health(&self) -> Result<HealthReport, ApiError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        if self.healthy {
            Ok(HealthReport::default())
        } else {
            Err(ApiError::Unreachable {
                reason: "connection refused".to_string(),
            })
        }
    }

    async fn translate(&self, _request: &SubmissionRequest) -> Result<TranslationReply, ApiError> {
        if !self.translate_delay.is_zero() {
            tokio::time::sleep(self.translate_delay).await;
        }
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(ApiError::Rejected {
                status: 500,
                detail: self.reject_detail.clone(),
            }),
        }
    }

    async fn probe_video(&self, _url: &str) -> Result<(), ApiError> {
        Ok(())
    }
}

fn rig(
    client: Arc<dyn TranslatorApi>,
) -> (
    UiState,
    Deadlines,
    Wiring,
    Receiver<WriterMessage>,
    Sender<InputEvent>,
) {
    let config = DubConfig::parse_from(["dubterm"]);
    let state = UiState::new(
        &config,
        Theme::None,
        "http://127.0.0.1:8001".to_string(),
        24,
        80,
    );
    let (writer_tx, writer_rx) = bounded(256);
    let (input_tx, input_rx) = bounded(16);
    let wiring = Wiring {
        client,
        writer_tx,
        input_rx,
        submission: None,
        probe: None,
    };
    (state, Deadlines::default(), wiring, writer_rx, input_tx)
}

fn press(state: &mut UiState, deadlines: &mut Deadlines, wiring: &mut Wiring, evt: InputEvent) {
    let flow = dispatch_input(state, deadlines, wiring, evt);
    assert!(flow.is_continue(), "event should not stop the loop");
}

fn pump_until(
    state: &mut UiState,
    deadlines: &mut Deadlines,
    wiring: &mut Wiring,
    what: &str,
    mut done: impl FnMut(&UiState, &Wiring) -> bool,
) {
    let give_up = Instant::now() + Duration::from_secs(5);
    while Instant::now() < give_up {
        run_tick(state, deadlines, wiring, Instant::now());
        if done(state, wiring) {
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!("timed out waiting for {what}");
}

fn wait_for_finish(handle: thread::JoinHandle<()>, what: &str) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !handle.is_finished() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    assert!(handle.is_finished(), "{what}");
    handle.join().expect("loop thread");
}

#[test]
fn typing_targets_the_focused_field_and_repaints() {
    let (mut state, mut deadlines, mut wiring, writer_rx, _input_tx) =
        rig(StubApi::healthy_with(StubApi::sample_reply()));
    press(&mut state, &mut deadlines, &mut wiring, InputEvent::Char('a'));
    press(&mut state, &mut deadlines, &mut wiring, InputEvent::Char('b'));
    press(&mut state, &mut deadlines, &mut wiring, InputEvent::Backspace);

    assert_eq!(state.form.video_path, "a");
    let frames = writer_rx
        .try_iter()
        .filter(|message| matches!(message, WriterMessage::Screen { .. }))
        .count();
    assert!(frames >= 3, "each edit should repaint, got {frames}");
}

#[test]
fn submitting_an_empty_form_flags_the_missing_source() {
    let (mut state, mut deadlines, mut wiring, _writer_rx, _input_tx) =
        rig(StubApi::healthy_with(StubApi::sample_reply()));
    press(&mut state, &mut deadlines, &mut wiring, InputEvent::Submit);

    assert_eq!(state.status_text(), MISSING_SOURCE_ERROR);
    assert!(deadlines.status_clear_deadline.is_some());
    assert!(wiring.submission.is_none());
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.overlay_mode, OverlayMode::None);
}

#[test]
fn a_successful_submission_walks_checking_rendering_and_reveals_results() {
    let api = StubApi::healthy_slow(StubApi::sample_reply(), Duration::from_millis(250));
    let (mut state, mut deadlines, mut wiring, _writer_rx, _input_tx) = rig(api);
    state.form.video_url = "https://example.com/talk.mp4".to_string();

    press(&mut state, &mut deadlines, &mut wiring, InputEvent::Submit);
    assert_eq!(state.phase, Phase::Checking);
    assert_eq!(state.overlay_mode, OverlayMode::Progress);
    assert!(wiring.submission.is_some());
    assert!(state.rotation.is_active());

    pump_until(&mut state, &mut deadlines, &mut wiring, "health pass", |state, _| {
        state.phase == Phase::Submitting
    });
    assert_eq!(state.overlay_mode, OverlayMode::Progress);

    pump_until(&mut state, &mut deadlines, &mut wiring, "completion", |state, _| {
        state.results.is_some()
    });
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.overlay_mode, OverlayMode::None);
    assert!(wiring.submission.is_none());
    assert!(!state.rotation.is_active());

    pump_until(&mut state, &mut deadlines, &mut wiring, "reveal", |state, _| {
        state.has_revealed_result()
    });
    pump_until(&mut state, &mut deadlines, &mut wiring, "video probe", |state, _| {
        state
            .results
            .as_ref()
            .is_some_and(|results| results.video_status == VideoStatus::Ready)
    });
    let results = state.results.as_ref().expect("results");
    assert_eq!(results.result.output_video_url, "/static/output/dubbed.mp4");
    assert_eq!(results.result.translated_text, "bonjour");
    assert_eq!(state.status_text(), STATUS_COMPLETE);
}

#[test]
fn enter_during_a_flight_never_starts_a_second_job() {
    let api = StubApi::healthy_slow(StubApi::sample_reply(), Duration::from_millis(150));
    let (mut state, mut deadlines, mut wiring, _writer_rx, _input_tx) =
        rig(api.clone() as Arc<dyn TranslatorApi>);
    state.form.video_url = "https://example.com/talk.mp4".to_string();

    press(&mut state, &mut deadlines, &mut wiring, InputEvent::Submit);
    press(&mut state, &mut deadlines, &mut wiring, InputEvent::Submit);
    pump_until(&mut state, &mut deadlines, &mut wiring, "completion", |state, _| {
        state.results.is_some()
    });

    assert_eq!(api.health_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn a_failed_health_probe_raises_the_backend_alert() {
    let (mut state, mut deadlines, mut wiring, _writer_rx, _input_tx) =
        rig(StubApi::unreachable());
    state.form.video_url = "https://example.com/talk.mp4".to_string();

    press(&mut state, &mut deadlines, &mut wiring, InputEvent::Submit);
    pump_until(&mut state, &mut deadlines, &mut wiring, "health alert", |state, _| {
        state.overlay_mode == OverlayMode::Alert
    });

    assert_eq!(state.phase, Phase::Failed);
    assert!(wiring.submission.is_none());
    assert!(!state.rotation.is_active());
    let alert = state.alert.as_ref().expect("alert content");
    assert_eq!(alert.heading, HEALTH_ALERT_HEADING);
    assert_eq!(alert.body, HEALTH_ALERT_BODY);

    press(&mut state, &mut deadlines, &mut wiring, InputEvent::Dismiss);
    assert_eq!(state.overlay_mode, OverlayMode::None);
    assert_eq!(state.phase, Phase::Idle);
    assert!(state.alert.is_none());
}

#[test]
fn a_rejected_upload_shows_the_server_detail() {
    let api = StubApi::rejecting("Either video_url or video_file must be provided");
    let (mut state, mut deadlines, mut wiring, _writer_rx, _input_tx) = rig(api);
    state.form.video_url = "https://example.com/talk.mp4".to_string();

    press(&mut state, &mut deadlines, &mut wiring, InputEvent::Submit);
    pump_until(&mut state, &mut deadlines, &mut wiring, "failure alert", |state, _| {
        state.overlay_mode == OverlayMode::Alert
    });

    assert_eq!(state.phase, Phase::Failed);
    let alert = state.alert.as_ref().expect("alert content");
    assert_eq!(alert.heading, FAILURE_HEADING);
    assert_eq!(alert.body, "Either video_url or video_file must be provided");
}

#[test]
fn clear_form_drops_the_result_panel_too() {
    let (mut state, mut deadlines, mut wiring, _writer_rx, _input_tx) =
        rig(StubApi::healthy_with(StubApi::sample_reply()));
    state.form.video_url = "https://example.com/talk.mp4".to_string();
    press(&mut state, &mut deadlines, &mut wiring, InputEvent::Submit);
    pump_until(&mut state, &mut deadlines, &mut wiring, "reveal", |state, _| {
        state.has_revealed_result()
    });

    press(&mut state, &mut deadlines, &mut wiring, InputEvent::ClearForm);
    assert!(state.results.is_none());
    assert_eq!(state.form.video_url, "");
    assert_eq!(state.status_text(), STATUS_IDLE);
}

#[test]
fn help_overlay_opens_and_esc_closes_it() {
    let (mut state, mut deadlines, mut wiring, writer_rx, _input_tx) =
        rig(StubApi::healthy_with(StubApi::sample_reply()));

    press(&mut state, &mut deadlines, &mut wiring, InputEvent::HelpToggle);
    assert_eq!(state.overlay_mode, OverlayMode::Help);
    press(&mut state, &mut deadlines, &mut wiring, InputEvent::Dismiss);
    assert_eq!(state.overlay_mode, OverlayMode::None);

    let mut saw_overlay = false;
    let mut saw_clear = false;
    for message in writer_rx.try_iter() {
        match message {
            WriterMessage::ShowOverlay { .. } => saw_overlay = true,
            WriterMessage::ClearOverlay => saw_clear = true,
            _ => {}
        }
    }
    assert!(saw_overlay, "opening help should paint an overlay");
    assert!(saw_clear, "Esc should clear the overlay");
}

#[test]
fn cycling_the_theme_persists_the_choice() {
    let _guard = prefs::env_lock()
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().expect("temp dir");
    std::env::set_var(CONFIG_DIR_ENV, dir.path());

    let (mut state, mut deadlines, mut wiring, _writer_rx, _input_tx) =
        rig(StubApi::healthy_with(StubApi::sample_reply()));
    press(&mut state, &mut deadlines, &mut wiring, InputEvent::CycleTheme);

    let saved = load_prefs();
    std::env::remove_var(CONFIG_DIR_ENV);

    assert_eq!(state.theme, Theme::Teal);
    assert_eq!(saved.theme.as_deref(), Some("teal"));
    assert_eq!(saved.server.as_deref(), Some("http://127.0.0.1:8001"));
    assert_eq!(state.status_text(), "Theme: teal");
}

#[test]
fn resize_updates_geometry_and_notifies_the_writer() {
    let (mut state, mut deadlines, mut wiring, writer_rx, _input_tx) =
        rig(StubApi::healthy_with(StubApi::sample_reply()));

    press(
        &mut state,
        &mut deadlines,
        &mut wiring,
        InputEvent::Resize {
            cols: 100,
            rows: 30,
        },
    );

    assert_eq!(state.terminal_cols, 100);
    assert_eq!(state.terminal_rows, 30);
    assert!(writer_rx
        .try_iter()
        .any(|message| matches!(message, WriterMessage::Resize { rows: 30, cols: 100 })));
}

#[test]
fn event_loop_exits_on_exit_event() {
    let (mut state, mut deadlines, mut wiring, _writer_rx, input_tx) =
        rig(StubApi::healthy_with(StubApi::sample_reply()));
    input_tx.send(InputEvent::Exit).expect("queue exit");

    let handle = thread::spawn(move || run_event_loop(&mut state, &mut deadlines, &mut wiring));
    wait_for_finish(handle, "event loop should stop on Exit");
}

#[test]
fn event_loop_exits_when_the_input_channel_closes() {
    let (mut state, mut deadlines, mut wiring, _writer_rx, input_tx) =
        rig(StubApi::healthy_with(StubApi::sample_reply()));
    drop(input_tx);

    let handle = thread::spawn(move || run_event_loop(&mut state, &mut deadlines, &mut wiring));
    wait_for_finish(handle, "event loop should stop when input disconnects");
}
