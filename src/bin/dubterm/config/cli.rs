//! CLI flag schema so startup behavior is explicit and discoverable.

use clap::Parser;
use std::path::PathBuf;

use dubterm::catalog;
use dubterm::log_debug;

pub(crate) const DEFAULT_SERVER: &str = "http://127.0.0.1:8001";

#[derive(Debug, Parser, Clone)]
#[command(about = "Terminal client for the AI video dubbing server", author, version)]
pub(crate) struct DubConfig {
    /// Base URL of the dubbing server (falls back to the saved value, then the default)
    #[arg(long = "server", env = "DUBTERM_SERVER")]
    pub(crate) server: Option<String>,

    /// Language code preselected in the form (en, hi, es, ja, fr, de, ta, ml)
    #[arg(long = "language", default_value = catalog::DEFAULT_LANGUAGE, value_parser = parse_language)]
    pub(crate) language: String,

    /// Voice id preselected in the form; must belong to the chosen language
    #[arg(long = "voice")]
    pub(crate) voice: Option<String>,

    /// Local video file to prefill into the form
    #[arg(long = "video")]
    pub(crate) video: Option<PathBuf>,

    /// Video URL to prefill into the form
    #[arg(long = "video-url")]
    pub(crate) video_url: Option<String>,

    /// Color theme (teal, nord, gruvbox, ansi, none)
    #[arg(long = "theme")]
    pub(crate) theme_name: Option<String>,

    /// Disable colors in all output
    #[arg(long = "no-color", default_value_t = false)]
    pub(crate) no_color: bool,

    /// Use plain ASCII borders and glyphs
    #[arg(long = "ascii", default_value_t = false)]
    pub(crate) ascii: bool,

    /// Disable debug logging to the log file
    #[arg(long = "no-logs", default_value_t = false)]
    pub(crate) no_logs: bool,

    /// Allow URLs and transcript snippets in the debug log
    #[arg(long = "log-content", default_value_t = false)]
    pub(crate) log_content: bool,

    /// Write JSON trace events for request debugging (DUBTERM_TRACE_LOG sets the path)
    #[arg(long = "trace", default_value_t = false)]
    pub(crate) trace: bool,

    /// Print the log file path and exit
    #[arg(long = "print-log-path", default_value_t = false)]
    pub(crate) print_log_path: bool,
}

impl DubConfig {
    /// Voice to preselect, dropped with a log line when it does not belong
    /// to the starting language.
    pub(crate) fn starting_voice(&self) -> Option<&str> {
        let voice = self.voice.as_deref()?;
        if catalog::voice_available(&self.language, voice) {
            Some(voice)
        } else {
            log_debug(&format!(
                "voice '{voice}' is not available for language '{}', using the default",
                self.language
            ));
            None
        }
    }
}

fn parse_language(raw: &str) -> Result<String, String> {
    let code = raw.trim().to_lowercase();
    if code.is_empty() {
        return Err("language code must not be empty".to_string());
    }
    Ok(code)
}
