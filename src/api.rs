//! Wire types for the dubbing server's HTTP API and the pure response rules.
//!
//! Interpretation of server replies lives here as plain functions so the
//! submission worker and the tests share one set of rules: a success body
//! without `output_video_url` is a failure, and a rejection body without a
//! `detail` field falls back to a generic message.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Fallback shown when a rejection body carries no usable `detail` field.
pub const GENERIC_FAILURE: &str = "Translation failed";

/// Payload served by `GET /api/health`. Only reachability is load-bearing;
/// the fields are logged for operator context.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
}

/// Raw success body from `POST /api/translate`, before validation.
///
/// The server also echoes `status: "completed"` and the submitted source as
/// `video_url`; both are tolerated here and surface only in logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslationReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub original_text: Option<String>,
    #[serde(default)]
    pub translated_text: Option<String>,
    #[serde(default)]
    pub output_video_url: Option<String>,
}

/// Failure body shape for non-success responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorReply {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Validated translation outcome handed to the result renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub output_video_url: String,
    pub original_text: String,
    pub translated_text: String,
}

/// What the user is submitting for dubbing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Local file streamed up as the `video_file` multipart part.
    File(PathBuf),
    /// Remote address sent as the `video_url` form field.
    Url(String),
}

impl VideoSource {
    /// Short human description for status lines and logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            VideoSource::File(path) => path.display().to_string(),
            VideoSource::Url(url) => url.clone(),
        }
    }
}

/// Form fields serialized into the multipart translate request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub video: VideoSource,
    pub target_language: String,
    pub voice_id: String,
}

/// Failures talking to or interpreting the dubbing server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Health probe failed, by transport error or non-success status.
    #[error("server unreachable: {reason}")]
    Unreachable { reason: String },
    /// Translate endpoint answered with a non-success status.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    /// Success body parsed but the dubbed video URL is absent.
    #[error("No video URL returned from server")]
    MissingVideoUrl,
    /// The configured server address does not parse as a base URL.
    #[error("invalid server URL {url:?}: {reason}")]
    InvalidBase { url: String, reason: String },
    /// The selected video file could not be read for upload.
    #[error("cannot read video file {path}: {source}")]
    VideoFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Validate a success reply into a renderable result.
///
/// # Errors
///
/// Returns [`ApiError::MissingVideoUrl`] when `output_video_url` is absent or
/// blank. Missing transcript fields degrade to empty strings rather than
/// failing the whole submission.
pub fn interpret_reply(reply: TranslationReply) -> Result<TranslationResult, ApiError> {
    let output_video_url = reply
        .output_video_url
        .filter(|url| !url.trim().is_empty())
        .ok_or(ApiError::MissingVideoUrl)?;
    Ok(TranslationResult {
        output_video_url,
        original_text: reply.original_text.unwrap_or_default(),
        translated_text: reply.translated_text.unwrap_or_default(),
    })
}

/// Extract the user-facing reason from a rejection body.
///
/// Accepts the raw body text so unparsable replies (HTML error pages, empty
/// bodies) still produce the generic fallback instead of a serde error.
#[must_use]
pub fn rejection_detail(body: &str) -> String {
    serde_json::from_str::<ErrorReply>(body)
        .ok()
        .and_then(|reply| reply.detail)
        .filter(|detail| !detail.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}
