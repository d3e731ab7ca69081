//! dubterm entrypoint wiring the form UI, input capture, and server client together.
//!
//! Presents a fullscreen form for submitting a video to the dubbing server and
//! renders the dubbed result inline once the server answers.
//!
//! # Architecture
//!
//! - Input thread: reads terminal events and maps them to form actions
//! - Writer thread: owns stdout so frames and overlays never interleave
//! - Event loop: drives the form, phase transitions, and repaints
//! - Jobs: the health-then-upload submission and the result video probe run
//!   on background Tokio runtimes and report over channels

mod color_mode;
mod config;
mod event_loop;
mod event_state;
mod form;
mod frame;
mod input;
mod overlays;
mod prefs;
mod results;
mod rotation;
mod screen;
mod status_line;
mod status_messages;
mod theme;
mod writer;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use crossterm::terminal::size as terminal_size;
use std::io;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use dubterm::terminal_restore::TerminalGuard;
use dubterm::{
    init_logging, init_telemetry, log_debug, log_file_path, HttpTranslator, TranslatorApi,
};

use crate::config::{DubConfig, DEFAULT_SERVER};
use crate::event_loop::run_event_loop;
use crate::event_state::{Deadlines, UiState, Wiring};
use crate::input::spawn_input_thread;
use crate::prefs::load_prefs;
use crate::status_messages::with_log_path;
use crate::writer::{spawn_writer_thread, WriterMessage};

/// Frames the writer may queue before the event loop blocks.
const FRAME_QUEUE_DEPTH: usize = 512;

/// Key events the input thread may queue before it blocks.
const INPUT_QUEUE_DEPTH: usize = 256;

const JOIN_POLL_INTERVAL: Duration = Duration::from_millis(10);
const WRITER_EXIT_GRACE: Duration = Duration::from_millis(500);
const INPUT_EXIT_GRACE: Duration = Duration::from_millis(100);

/// Geometry used when the terminal will not report its size.
const FALLBACK_ROWS: u16 = 24;
const FALLBACK_COLS: u16 = 80;

/// Server base address: CLI flag wins, then the saved value, then the default.
fn resolve_server(config: &DubConfig, saved: Option<&str>) -> String {
    let cli = config
        .server
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());
    let saved = saved.map(str::trim).filter(|value| !value.is_empty());
    cli.or(saved).unwrap_or(DEFAULT_SERVER).to_string()
}

/// Wait for a worker thread, but never hang shutdown: once the grace period
/// runs out the thread is detached and process exit cleans it up.
fn join_or_detach(name: &str, handle: thread::JoinHandle<()>, grace: Duration) {
    let deadline = Instant::now() + grace;
    while !handle.is_finished() {
        if Instant::now() >= deadline {
            log_debug(&format!(
                "{name} thread still running after {}ms, detaching",
                grace.as_millis()
            ));
            return;
        }
        thread::sleep(JOIN_POLL_INTERVAL);
    }
    if let Err(panic) = handle.join() {
        log_debug(&format!("{name} thread panicked on shutdown: {panic:?}"));
    }
}

fn main() -> Result<()> {
    let config = DubConfig::parse();
    if config.print_log_path {
        println!("{}", log_file_path().display());
        return Ok(());
    }

    init_logging(!config.no_logs, config.log_content);
    init_telemetry(config.trace && !config.no_logs);
    log_debug("=== dubterm started ===");
    log_debug(&format!("log file: {:?}", log_file_path()));

    let user_config = load_prefs();
    let server = resolve_server(&config, user_config.server.as_deref());
    let theme = config.resolved_theme(user_config.theme.as_deref());
    log_debug(&format!(
        "server {server}, theme {theme}, colors {}",
        config.color_mode()
    ));

    // Bad --server values should fail with a plain error, so build the client
    // before the terminal goes raw.
    let client: Arc<dyn TranslatorApi> = Arc::new(
        HttpTranslator::new(&server)
            .with_context(|| with_log_path("cannot set up the dubbing client"))?,
    );

    let terminal_guard = TerminalGuard::new();
    terminal_guard.enter_raw_mode()?;
    terminal_guard.enter_alternate_screen(&mut io::stdout())?;

    let (cols, rows) = terminal_size().unwrap_or((FALLBACK_COLS, FALLBACK_ROWS));

    let (writer_tx, writer_rx) = bounded(FRAME_QUEUE_DEPTH);
    let writer_handle = spawn_writer_thread(writer_rx);
    let _ = writer_tx.send(WriterMessage::Resize { rows, cols });

    let (input_tx, input_rx) = bounded(INPUT_QUEUE_DEPTH);
    let input_handle = spawn_input_thread(input_tx);

    let mut state = UiState::new(&config, theme, server, rows, cols);
    let mut deadlines = Deadlines::default();
    let mut wiring = Wiring {
        client,
        writer_tx,
        input_rx,
        submission: None,
        probe: None,
    };

    run_event_loop(&mut state, &mut deadlines, &mut wiring);

    let _ = wiring.writer_tx.send(WriterMessage::Shutdown);
    terminal_guard.restore();
    // Dropping the senders disconnects both threads even if the shutdown
    // message was dropped on a full channel.
    drop(wiring);
    join_or_detach("writer", writer_handle, WRITER_EXIT_GRACE);
    join_or_detach("input", input_handle, INPUT_EXIT_GRACE);
    log_debug("=== dubterm exiting ===");
    Ok(())
}
