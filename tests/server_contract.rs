//! End-to-end tests against an in-process fixture speaking the dubbing
//! server's HTTP dialect.
//!
//! These run the real `reqwest` client and the background jobs over loopback,
//! locking the multipart contract that stub-based unit tests cannot see.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use dubterm::api::{ApiError, SubmissionRequest, VideoSource};
use dubterm::job::{ProbeMessage, SubmissionJob, SubmissionMessage, VideoProbeJob};
use dubterm::{HttpTranslator, TranslatorApi};

/// What the translate endpoint saw in the multipart body.
#[derive(Debug, Default, Clone)]
struct ReceivedSubmission {
    target_language: Option<String>,
    voice_id: Option<String>,
    video_file_name: Option<String>,
    video_file_bytes: usize,
    video_url: Option<String>,
}

/// Scripted reply for the translate endpoint.
enum TranslateScript {
    Succeed,
    Reject {
        status: StatusCode,
        body: &'static str,
    },
}

struct FixtureServer {
    script: TranslateScript,
    received: Mutex<Option<ReceivedSubmission>>,
    health_hits: AtomicUsize,
}

async fn health(State(server): State<Arc<FixtureServer>>) -> Json<serde_json::Value> {
    server.health_hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({"status": "healthy", "environment": "test"}))
}

async fn translate(
    State(server): State<Arc<FixtureServer>>,
    mut multipart: Multipart,
) -> axum::response::Response {
    let mut seen = ReceivedSubmission::default();
    while let Some(field) = multipart.next_field().await.expect("read multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "target_language" => {
                seen.target_language = Some(field.text().await.expect("text field"));
            }
            "voice_id" => seen.voice_id = Some(field.text().await.expect("text field")),
            "video_url" => seen.video_url = Some(field.text().await.expect("text field")),
            "video_file" => {
                seen.video_file_name = field.file_name().map(str::to_string);
                seen.video_file_bytes = field.bytes().await.expect("file bytes").len();
            }
            _ => {}
        }
    }
    *server.received.lock().expect("received lock") = Some(seen.clone());
    match &server.script {
        TranslateScript::Succeed => Json(json!({
            "status": "completed",
            "video_url": seen.video_url,
            "original_text": "hello there",
            "translated_text": "bonjour",
            "output_video_url": "/static/output/dubbed.mp4",
        }))
        .into_response(),
        TranslateScript::Reject { status, body } => (*status, *body).into_response(),
    }
}

async fn dubbed_video() -> Vec<u8> {
    vec![0u8; 4096]
}

async fn spawn_fixture(script: TranslateScript) -> (Arc<FixtureServer>, String) {
    let server = Arc::new(FixtureServer {
        script,
        received: Mutex::new(None),
        health_hits: AtomicUsize::new(0),
    });
    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/translate", post(translate))
        .route("/static/output/dubbed.mp4", get(dubbed_video))
        .with_state(Arc::clone(&server));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture listener");
    let addr = listener.local_addr().expect("fixture address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (server, format!("http://{addr}"))
}

fn sample_request() -> SubmissionRequest {
    SubmissionRequest {
        video: VideoSource::Url("https://example.com/talk.mp4".to_string()),
        target_language: "fr".to_string(),
        voice_id: "fr-FR-DeniseNeural".to_string(),
    }
}

async fn next_submission(job: &SubmissionJob) -> SubmissionMessage {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if let Some(message) = job.try_recv() {
            return message;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("submission job did not report within 10s");
}

async fn next_probe(job: &VideoProbeJob) -> ProbeMessage {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if let Some(message) = job.try_recv() {
            return message;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("probe job did not report within 10s");
}

#[tokio::test]
async fn health_probe_reads_the_fixture_report() {
    let (server, base) = spawn_fixture(TranslateScript::Succeed).await;
    let client = HttpTranslator::new(&base).expect("client");

    let report = client.health().await.expect("health should pass");

    assert_eq!(report.status.as_deref(), Some("healthy"));
    assert_eq!(server.health_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn file_uploads_arrive_as_multipart_with_language_and_voice() {
    let (server, base) = spawn_fixture(TranslateScript::Succeed).await;
    let dir = tempfile::tempdir().expect("temp dir");
    let video_path = dir.path().join("talk.mp4");
    std::fs::write(&video_path, b"not really mpeg4").expect("write sample video");

    let client = HttpTranslator::new(&base).expect("client");
    let request = SubmissionRequest {
        video: VideoSource::File(video_path),
        target_language: "hi".to_string(),
        voice_id: "hi-IN-SwaraNeural".to_string(),
    };
    let reply = client
        .translate(&request)
        .await
        .expect("translate should succeed");
    assert_eq!(
        reply.output_video_url.as_deref(),
        Some("/static/output/dubbed.mp4")
    );

    let seen = server
        .received
        .lock()
        .expect("received lock")
        .clone()
        .expect("fixture saw a submission");
    assert_eq!(seen.target_language.as_deref(), Some("hi"));
    assert_eq!(seen.voice_id.as_deref(), Some("hi-IN-SwaraNeural"));
    assert_eq!(seen.video_file_name.as_deref(), Some("talk.mp4"));
    assert_eq!(seen.video_file_bytes, b"not really mpeg4".len());
    assert_eq!(seen.video_url, None);
}

#[tokio::test]
async fn url_submissions_use_the_video_url_field() {
    let (server, base) = spawn_fixture(TranslateScript::Succeed).await;
    let client = HttpTranslator::new(&base).expect("client");

    client
        .translate(&sample_request())
        .await
        .expect("translate should succeed");

    let seen = server
        .received
        .lock()
        .expect("received lock")
        .clone()
        .expect("fixture saw a submission");
    assert_eq!(seen.video_url.as_deref(), Some("https://example.com/talk.mp4"));
    assert_eq!(seen.video_file_name, None);
    assert_eq!(seen.video_file_bytes, 0);
}

#[tokio::test]
async fn rejections_surface_the_server_detail() {
    let (_server, base) = spawn_fixture(TranslateScript::Reject {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: r#"{"detail": "TTS voice unavailable"}"#,
    })
    .await;
    let client = HttpTranslator::new(&base).expect("client");

    let err = client
        .translate(&sample_request())
        .await
        .expect_err("rejection should fail");

    match err {
        ApiError::Rejected { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "TTS voice unavailable");
        }
        other => panic!("expected rejection, got {other}"),
    }
}

#[tokio::test]
async fn probe_reports_missing_media_as_unavailable() {
    let (_server, base) = spawn_fixture(TranslateScript::Succeed).await;
    let client = HttpTranslator::new(&base).expect("client");

    let err = client
        .probe_video(&format!("{base}/static/output/nope.mp4"))
        .await
        .expect_err("missing media should fail");

    assert!(err.to_string().contains("404"), "error: {err}");
}

#[tokio::test]
async fn submission_job_round_trips_and_the_probe_confirms_the_result() {
    let (_server, base) = spawn_fixture(TranslateScript::Succeed).await;
    let client: Arc<dyn TranslatorApi> = Arc::new(HttpTranslator::new(&base).expect("client"));

    let job = SubmissionJob::spawn(Arc::clone(&client), sample_request());
    assert!(matches!(
        next_submission(&job).await,
        SubmissionMessage::HealthOk(_)
    ));
    let result = match next_submission(&job).await {
        SubmissionMessage::Completed(result) => result,
        other => panic!("expected completion, got {other:?}"),
    };
    assert_eq!(result.translated_text, "bonjour");

    // The event loop resolves the reported path before probing, so the full
    // completion path is exercised here the same way.
    let resolved = client.resolve_media_url(&result.output_video_url);
    assert_eq!(resolved, format!("{base}/static/output/dubbed.mp4"));

    let probe = VideoProbeJob::spawn(Arc::clone(&client), resolved);
    match next_probe(&probe).await {
        ProbeMessage::Ready => {}
        ProbeMessage::Unavailable { reason } => panic!("probe should succeed: {reason}"),
    }
}
