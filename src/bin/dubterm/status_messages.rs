//! User-facing copy for the submission flow so wording stays in one place.

use dubterm::log_file_path;

/// Rotating captions shown while a dub renders on the backend.
pub(crate) const PROGRESS_MESSAGES: &[&str] = &[
    "DUBBING VIDEO...",
    "TRANSCRIBING AUDIO...",
    "TRANSLATING TEXT...",
    "GENERATING AI VOICE...",
    "MIXING VIDEO & AUDIO...",
];

pub(crate) const SUBMIT_LABEL_IDLE: &str = "Translate Video";
pub(crate) const SUBMIT_LABEL_BUSY: &str = "DUBBING...";

pub(crate) const HEALTH_ALERT_HEADING: &str = "⚠ Backend Server Error";
pub(crate) const HEALTH_ALERT_BODY: &str =
    "Cannot reach the translation engine. Please make sure the server is running.";

pub(crate) const FAILURE_HEADING: &str = "🚨 Translation Error";

/// Resting status-row text per flow phase.
pub(crate) const STATUS_IDLE: &str = "Fill the form and press Enter to translate.";
pub(crate) const STATUS_COMPLETE: &str = "Dub complete. Ctrl+L starts a new one.";
pub(crate) const STATUS_CHECKING: &str = "Checking server health...";
pub(crate) const STATUS_FAILED: &str = "Translation failed. Esc to dismiss.";

/// Logged once the health probe passes, right before the upload starts.
pub(crate) const HEALTH_OK_LOG: &str = "Server is healthy, starting translation...";

/// Point an error message at the debug log.
#[must_use]
pub(crate) fn with_log_path(message: &str) -> String {
    format!("{message}; details in {}", log_file_path().display())
}
