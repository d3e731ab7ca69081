//! Shared dubterm library exports that keep the binary aligned on common behavior.

pub mod api;
pub mod catalog;
pub mod client;
pub mod job;
mod logging;
mod telemetry;
pub mod terminal_restore;

pub use logging::{
    crash_log_path, init_logging, log_debug, log_debug_content, log_file_path, log_panic,
};
pub use telemetry::{init_telemetry, trace_log_path};

pub use client::{HttpTranslator, TranslatorApi};
pub use job::{ProbeMessage, SubmissionJob, SubmissionMessage, VideoProbeJob};
