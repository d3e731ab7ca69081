//! HTTP access to the dubbing server.
//!
//! The UI never talks to `reqwest` directly; it goes through the
//! [`TranslatorApi`] trait so the event loop can be exercised against a stub.
//! [`HttpTranslator`] is the real implementation, pinned to the server's
//! multipart contract.

use crate::api::{
    rejection_detail, ApiError, HealthReport, SubmissionRequest, TranslationReply, VideoSource,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use std::path::Path;
use std::time::Duration;

/// Probes must answer quickly; translation itself is deliberately unbounded
/// because dubbing a long video can take minutes.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Server operations the submission flow depends on.
#[async_trait]
pub trait TranslatorApi: Send + Sync {
    /// Reachability check gating every submission.
    async fn health(&self) -> Result<HealthReport, ApiError>;

    /// Upload the request and wait for the dubbed result. No client timeout.
    async fn translate(&self, request: &SubmissionRequest) -> Result<TranslationReply, ApiError>;

    /// Confirm the dubbed video is fetchable by pulling its first bytes.
    async fn probe_video(&self, url: &str) -> Result<(), ApiError>;

    /// Turn a server-reported media path into something fetchable.
    fn resolve_media_url(&self, raw: &str) -> String {
        raw.to_string()
    }
}

/// [`TranslatorApi`] over HTTP, speaking the server's JSON/multipart dialect.
#[derive(Debug)]
pub struct HttpTranslator {
    http: reqwest::Client,
    base: Url,
}

impl HttpTranslator {
    /// Build a client for the given base address, e.g. `http://127.0.0.1:8001`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBase`] when the address does not parse as an
    /// absolute URL, and [`ApiError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn new(base: &str) -> Result<Self, ApiError> {
        let base = Url::parse(base).map_err(|err| ApiError::InvalidBase {
            url: base.to_string(),
            reason: err.to_string(),
        })?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("dubterm/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(|err| ApiError::InvalidBase {
            url: format!("{}{path}", self.base),
            reason: err.to_string(),
        })
    }

    async fn video_part(path: &Path) -> Result<Part, ApiError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| ApiError::VideoFile {
                path: path.to_path_buf(),
                source: err,
            })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "video".to_string(), |name| name.to_string_lossy().into_owned());
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for_path(path))?;
        Ok(part)
    }
}

#[async_trait]
impl TranslatorApi for HttpTranslator {
    async fn health(&self) -> Result<HealthReport, ApiError> {
        let url = self.endpoint("/api/health")?;
        tracing::debug!(target: "dubterm::client", %url, "health probe");
        let response = self
            .http
            .get(url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|err| ApiError::Unreachable {
                reason: err.to_string(),
            })?;
        if !response.status().is_success() {
            return Err(ApiError::Unreachable {
                reason: format!("health endpoint answered {}", response.status()),
            });
        }
        // Only reachability matters; a malformed body still counts as healthy.
        Ok(response.json::<HealthReport>().await.unwrap_or_default())
    }

    async fn translate(&self, request: &SubmissionRequest) -> Result<TranslationReply, ApiError> {
        let url = self.endpoint("/api/translate")?;
        let mut form = Form::new()
            .text("target_language", request.target_language.clone())
            .text("voice_id", request.voice_id.clone());
        form = match &request.video {
            VideoSource::File(path) => form.part("video_file", Self::video_part(path).await?),
            VideoSource::Url(address) => form.text("video_url", address.clone()),
        };
        tracing::debug!(
            target: "dubterm::client",
            %url,
            language = %request.target_language,
            voice = %request.voice_id,
            "submitting translation"
        );
        let response = self.http.post(url).multipart(form).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<TranslationReply>().await?);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Rejected {
            status: status.as_u16(),
            detail: rejection_detail(&body),
        })
    }

    async fn probe_video(&self, url: &str) -> Result<(), ApiError> {
        use futures_util::StreamExt;

        tracing::debug!(target: "dubterm::client", url, "probing dubbed video");
        let response = self
            .http
            .get(url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        // One chunk is enough to prove the media is being served.
        let mut stream = response.bytes_stream();
        if let Some(chunk) = stream.next().await {
            chunk?;
        }
        Ok(())
    }

    /// The server hands back paths like `/static/output/dubbed.mp4`; those are
    /// resolved against the configured base. Absolute URLs pass through.
    fn resolve_media_url(&self, raw: &str) -> String {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return raw.to_string();
        }
        self.base
            .join(raw)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| raw.to_string())
    }
}

/// Content type for the upload part, keyed off the file extension.
fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("mp4" | "m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("webm") => "video/webm",
        Some("avi") => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}
