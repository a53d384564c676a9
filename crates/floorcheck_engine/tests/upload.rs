use std::io::Write;
use std::path::Path;
use std::time::Duration;

use floorcheck_engine::{
    FailureKind, ReqwestUploader, UploadSettings, Uploader, GENERIC_UPLOAD_ERROR,
};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn plan_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("plan-")
        .suffix(".png")
        .tempfile()
        .expect("temp file");
    file.write_all(b"fake png bytes").expect("write bytes");
    file
}

fn uploader_for(server: &MockServer) -> ReqwestUploader {
    let settings = UploadSettings::new(format!("{}/api/calculate", server.uri()));
    ReqwestUploader::new(settings)
}

#[tokio::test]
async fn upload_posts_multipart_and_parses_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calculate"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("fake png bytes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "squareFoot": 523.4,
            "variance": 0.02,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = plan_file();
    let result = uploader_for(&server)
        .upload(1, file.path())
        .await
        .expect("upload ok");

    assert_eq!(result.square_foot, 523.4);
    assert_eq!(result.variance, 0.02);
}

#[tokio::test]
async fn upload_accepts_var_alias() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calculate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "squareFoot": 100.0,
            "var": 1.5,
        })))
        .mount(&server)
        .await;

    let file = plan_file();
    let result = uploader_for(&server)
        .upload(2, file.path())
        .await
        .expect("upload ok");

    assert_eq!(result.variance, 1.5);
}

#[tokio::test]
async fn service_error_message_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calculate"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(serde_json::json!({"error": "Image too blurry"})),
        )
        .mount(&server)
        .await;

    let file = plan_file();
    let err = uploader_for(&server).upload(3, file.path()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(422));
    assert_eq!(err.message, "Image too blurry");
}

#[tokio::test]
async fn bodyless_failure_falls_back_to_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calculate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let file = plan_file();
    let err = uploader_for(&server).upload(4, file.path()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, GENERIC_UPLOAD_ERROR);
}

#[tokio::test]
async fn malformed_success_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calculate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let file = plan_file();
    let err = uploader_for(&server).upload(5, file.path()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::MalformedResponse);
    assert_eq!(err.message, GENERIC_UPLOAD_ERROR);
}

#[tokio::test]
async fn unreachable_service_maps_to_network_error() {
    // Port 1 is reserved; nothing should be listening there.
    let uploader = ReqwestUploader::new(UploadSettings::new("http://127.0.0.1:1/api/calculate"));

    let file = plan_file();
    let err = uploader.upload(6, file.path()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Network);
    assert_eq!(err.message, GENERIC_UPLOAD_ERROR);
}

#[tokio::test]
async fn explicit_deadline_times_out_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calculate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(serde_json::json!({"squareFoot": 1.0, "variance": 0.0})),
        )
        .mount(&server)
        .await;

    let mut settings = UploadSettings::new(format!("{}/api/calculate", server.uri()));
    settings.request_timeout = Some(Duration::from_millis(50));
    let uploader = ReqwestUploader::new(settings);

    let file = plan_file();
    let err = uploader.upload(7, file.path()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
    assert_eq!(err.message, GENERIC_UPLOAD_ERROR);
}

#[tokio::test]
async fn missing_file_fails_before_any_request() {
    let server = MockServer::start().await;
    // No mock mounted: a request arriving here would fail the test through
    // the 404 -> HttpStatus path instead of FileRead.
    let uploader = uploader_for(&server);

    let err = uploader
        .upload(8, Path::new("/nonexistent/plan.png"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::FileRead);
}
