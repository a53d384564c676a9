use std::path::Path;
use std::time::Duration;

use client_logging::{client_debug, client_warn};
use reqwest::multipart::{Form, Part};

use crate::{CalculationResult, FailureKind, RequestId, UploadError, GENERIC_UPLOAD_ERROR};

/// Multipart field name the service expects the image under.
pub const FILE_FIELD_NAME: &str = "file";

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub endpoint_url: String,
    pub connect_timeout: Duration,
    /// Overall request deadline. `None` by default: the calculation model is
    /// slow and legitimately takes minutes, so no caller-imposed timeout may
    /// fail a still-processing request.
    pub request_timeout: Option<Duration>,
}

impl UploadSettings {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    /// Sends one file to the calculation service and parses the response.
    /// Exactly one outbound request per call; no retries.
    async fn upload(
        &self,
        request_id: RequestId,
        path: &Path,
    ) -> Result<CalculationResult, UploadError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    settings: UploadSettings,
}

impl ReqwestUploader {
    pub fn new(settings: UploadSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, UploadError> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.settings.connect_timeout);
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| transport_error(FailureKind::Network, &err))
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(
        &self,
        request_id: RequestId,
        path: &Path,
    ) -> Result<CalculationResult, UploadError> {
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            client_warn!("upload {}: could not read {:?}: {}", request_id, path, err);
            UploadError::new(FailureKind::FileRead, "Failed to read the selected file")
        })?;

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("floorplan")
            .to_string();
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for_path(path))
            .map_err(|err| transport_error(FailureKind::Network, &err))?;
        let form = Form::new().part(FILE_FIELD_NAME, part);

        let client = self.build_client()?;
        client_debug!(
            "upload {}: POST {} ({:?})",
            request_id,
            self.settings.endpoint_url,
            path
        );
        let response = client
            .post(&self.settings.endpoint_url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let message =
                error_message_from_body(&body).unwrap_or_else(|| GENERIC_UPLOAD_ERROR.to_string());
            return Err(UploadError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        parse_success_body(&body)
    }
}

/// MIME type for the multipart part, from the file extension.
fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Extracts `squareFoot` and `variance` (alias `var`) from a 2xx body.
///
/// The payload is untyped external input; anything missing or non-numeric is
/// a malformed response, never a NaN leaking into the UI.
fn parse_success_body(body: &[u8]) -> Result<CalculationResult, UploadError> {
    let malformed = || UploadError::new(FailureKind::MalformedResponse, GENERIC_UPLOAD_ERROR);

    let value: serde_json::Value = serde_json::from_slice(body).map_err(|_| malformed())?;
    let square_foot = value
        .get("squareFoot")
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(malformed)?;
    let variance = value
        .get("variance")
        .or_else(|| value.get("var"))
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(malformed)?;

    Ok(CalculationResult {
        square_foot,
        variance,
    })
}

/// The service reports failures as `{"error": "..."}`; anything else in the
/// body is ignored.
fn error_message_from_body(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("error")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Network
    };
    transport_error(kind, &err)
}

fn transport_error(kind: FailureKind, err: &dyn std::error::Error) -> UploadError {
    client_debug!("upload error ({}): {}", kind, err);
    UploadError::new(kind, GENERIC_UPLOAD_ERROR)
}

#[cfg(test)]
mod tests {
    use super::{
        error_message_from_body, mime_for_path, parse_success_body, UploadSettings,
    };
    use crate::FailureKind;
    use std::path::Path;

    #[test]
    fn default_settings_impose_no_request_deadline() {
        let settings = UploadSettings::new("http://localhost/api/calculate");
        assert!(settings.request_timeout.is_none());
    }

    #[test]
    fn success_body_parses_both_field_spellings() {
        let result = parse_success_body(br#"{"squareFoot": 523.4, "variance": 0.02}"#)
            .expect("variance spelling");
        assert_eq!(result.square_foot, 523.4);
        assert_eq!(result.variance, 0.02);

        let result = parse_success_body(br#"{"squareFoot": 523.4, "var": 0.02}"#)
            .expect("var spelling");
        assert_eq!(result.variance, 0.02);
    }

    #[test]
    fn missing_or_non_numeric_fields_are_malformed() {
        let bodies: [&[u8]; 5] = [
            br#"{"squareFoot": 523.4}"#,
            br#"{"variance": 0.02}"#,
            br#"{"squareFoot": "big", "variance": 0.02}"#,
            br#"not json"#,
            br#"{}"#,
        ];
        for body in bodies {
            let err = parse_success_body(body).unwrap_err();
            assert_eq!(err.kind, FailureKind::MalformedResponse, "{body:?}");
        }
    }

    #[test]
    fn error_field_is_extracted_when_string() {
        assert_eq!(
            error_message_from_body(br#"{"error": "Image too blurry"}"#),
            Some("Image too blurry".to_string())
        );
        assert_eq!(error_message_from_body(br#"{"error": 42}"#), None);
        assert_eq!(error_message_from_body(b"<html>boom</html>"), None);
    }

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_for_path(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("a")), "application/octet-stream");
    }
}
