//! Size-capped debug log kept out of the UI's way, plus the crash log.
//!
//! Raw mode makes stderr useless while the form is up, so diagnostics go to a
//! temp file instead. The file starts over once it crosses its cap, so long
//! dubbing sessions never fill a disk. Crash records bypass the enable flag
//! entirely; a panic should leave a trace even with logging off.

use std::env;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

const LOG_CAP_BYTES: u64 = 5 * 1024 * 1024;

static LOG_ENABLED: AtomicBool = AtomicBool::new(false);
static CONTENT_OK: AtomicBool = AtomicBool::new(false);
static SINK: Mutex<Option<CappedLog>> = Mutex::new(None);

/// Path of the debug log, shared with `--print-log-path`.
pub fn log_file_path() -> PathBuf {
    env::temp_dir().join("dubterm_debug.log")
}

/// Path of the crash record written by the panic hook.
pub fn crash_log_path() -> PathBuf {
    env::temp_dir().join("dubterm_crash.log")
}

/// Append-only log file that starts over when it outgrows its cap.
struct CappedLog {
    file: File,
    len: u64,
    cap: u64,
}

impl CappedLog {
    fn open(path: &Path, cap: u64) -> Option<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()?;
        let mut log = Self {
            len: file.metadata().map_or(0, |meta| meta.len()),
            file,
            cap,
        };
        if log.len > log.cap {
            log.reset();
        }
        Some(log)
    }

    /// Empty the file in place; append mode then writes from the new end.
    fn reset(&mut self) {
        if self.file.set_len(0).is_ok() {
            self.len = 0;
        }
    }

    fn append(&mut self, line: &str) {
        if self.len.saturating_add(line.len() as u64) > self.cap {
            self.reset();
        }
        if self.file.write_all(line.as_bytes()).is_ok() {
            self.len += line.len() as u64;
        }
    }
}

fn sink() -> MutexGuard<'static, Option<CappedLog>> {
    SINK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Configure debug logging. `content_enabled` additionally allows lines that
/// quote user material (video addresses, transcript snippets).
pub fn init_logging(enabled: bool, content_enabled: bool) {
    LOG_ENABLED.store(enabled, Ordering::Relaxed);
    CONTENT_OK.store(enabled && content_enabled, Ordering::Relaxed);
    *sink() = if enabled {
        CappedLog::open(&log_file_path(), LOG_CAP_BYTES)
    } else {
        None
    };
}

fn stamp(msg: &str) -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("[{secs}] {msg}\n")
}

/// Record a diagnostic line when logging is on.
pub fn log_debug(msg: &str) {
    if !LOG_ENABLED.load(Ordering::Relaxed) {
        return;
    }
    let line = stamp(msg);
    if let Some(log) = sink().as_mut() {
        log.append(&line);
    }
}

/// Record a line that quotes user material. Dropped unless both logging and
/// content logging were requested.
pub fn log_debug_content(msg: &str) {
    if CONTENT_OK.load(Ordering::Relaxed) {
        log_debug(msg);
    }
}

/// Append a crash record. Runs from the panic hook, so it ignores the enable
/// flag and never panics itself.
pub fn log_panic(location: &str, payload: &str) {
    let line = stamp(&format!("panic at {location}: {payload}"));
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(crash_log_path())
    {
        let _ = file.write_all(line.as_bytes());
    }
}
