//! JSON event traces for request debugging.
//!
//! Enabled with `--trace`. Events land as one JSON object per line so a
//! stalled upload or slow server turnaround can be replayed after the fact.

use std::env;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};
use tracing_subscriber::fmt::time::UtcTime;

static TRACE_INIT: Once = Once::new();

/// Where trace lines land. `DUBTERM_TRACE_LOG` overrides the default.
pub fn trace_log_path() -> PathBuf {
    match env::var_os("DUBTERM_TRACE_LOG") {
        Some(path) => PathBuf::from(path),
        None => env::temp_dir().join("dubterm_trace.jsonl"),
    }
}

/// Install the JSON trace subscriber when tracing is requested.
///
/// Failure to open the trace file is deliberately silent: tracing is a debug
/// aid and must never stop the client from starting.
pub fn init_telemetry(enabled: bool) {
    if !enabled {
        return;
    }
    TRACE_INIT.call_once(|| {
        try_init_at(&trace_log_path());
    });
}

/// Open `path` for appending and point the global subscriber at it.
/// Returns whether the trace file could be opened.
fn try_init_at(path: &Path) -> bool {
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };
    // Client events are debug level; the fmt default of INFO would drop them.
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::DEBUG)
        .with_timer(UtcTime::rfc_3339())
        .with_writer(Arc::new(file))
        .with_current_span(false)
        .with_span_list(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    true
}
