//! Background workers that keep the event loop off the network.
//!
//! A [`SubmissionJob`] owns one whole submission: health probe first, then the
//! translate upload. It reports progress as messages on a bounded channel that
//! the event loop drains between ticks. The health probe gates the upload; a
//! failed probe means the translate request is never sent.

use crate::api::{interpret_reply, ApiError, HealthReport, SubmissionRequest, TranslationResult};
use crate::client::TranslatorApi;
use crossbeam_channel::{bounded, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// At most two messages per job; the channel never fills in practice.
const JOB_CHANNEL_CAP: usize = 8;

/// Progress reports from a submission worker, in send order.
#[derive(Debug)]
pub enum SubmissionMessage {
    /// Health probe passed; the upload is starting.
    HealthOk(HealthReport),
    /// Health probe failed; the upload was never attempted.
    HealthFailed { reason: String },
    /// Server returned a usable dubbed result.
    Completed(TranslationResult),
    /// Upload or response interpretation failed.
    Failed { reason: String },
}

/// One in-flight submission running on its own thread.
pub struct SubmissionJob {
    rx: Receiver<SubmissionMessage>,
    handle: JoinHandle<()>,
}

impl SubmissionJob {
    /// Start the health-then-translate sequence for `request`.
    #[must_use]
    pub fn spawn(client: Arc<dyn TranslatorApi>, request: SubmissionRequest) -> Self {
        let (tx, rx) = bounded(JOB_CHANNEL_CAP);
        let handle = thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    let _ = tx.send(SubmissionMessage::HealthFailed {
                        reason: format!("async runtime unavailable: {err}"),
                    });
                    return;
                }
            };
            runtime.block_on(async {
                match client.health().await {
                    Ok(report) => {
                        let _ = tx.send(SubmissionMessage::HealthOk(report));
                    }
                    Err(err) => {
                        let _ = tx.send(SubmissionMessage::HealthFailed {
                            reason: err.to_string(),
                        });
                        return;
                    }
                }
                let message = match client.translate(&request).await {
                    Ok(reply) => match interpret_reply(reply) {
                        Ok(result) => SubmissionMessage::Completed(result),
                        Err(err) => SubmissionMessage::Failed {
                            reason: err.to_string(),
                        },
                    },
                    Err(err) => SubmissionMessage::Failed {
                        reason: err.to_string(),
                    },
                };
                let _ = tx.send(message);
            });
        });
        Self { rx, handle }
    }

    /// Non-blocking drain for the event loop's periodic pass.
    pub fn try_recv(&self) -> Option<SubmissionMessage> {
        self.rx.try_recv().ok()
    }

    /// True once the worker thread has exited. The job may still hold
    /// undrained messages at that point.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Advisory check that a dubbed video is actually fetchable.
#[derive(Debug)]
pub enum ProbeMessage {
    Ready,
    Unavailable { reason: String },
}

/// Fetches the first bytes of the dubbed video off-thread. The result only
/// steers how soon the result pane is revealed; the submission has already
/// succeeded by the time this runs.
pub struct VideoProbeJob {
    rx: Receiver<ProbeMessage>,
    handle: JoinHandle<()>,
}

impl VideoProbeJob {
    #[must_use]
    pub fn spawn(client: Arc<dyn TranslatorApi>, url: String) -> Self {
        let (tx, rx) = bounded(1);
        let handle = thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(_) => {
                    let _ = tx.send(ProbeMessage::Unavailable {
                        reason: "async runtime unavailable".to_string(),
                    });
                    return;
                }
            };
            let message = match runtime.block_on(client.probe_video(&url)) {
                Ok(()) => ProbeMessage::Ready,
                Err(err) => ProbeMessage::Unavailable {
                    reason: err.to_string(),
                },
            };
            let _ = tx.send(message);
        });
        Self { rx, handle }
    }

    pub fn try_recv(&self) -> Option<ProbeMessage> {
        self.rx.try_recv().ok()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
