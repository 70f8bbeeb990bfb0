use reqwest::StatusCode;
use reqwest::blocking::multipart;
use thiserror::Error;

use crate::models::{DetectionResult, RawDetectionResult, ReportResponse, SelectedFile};

/// Error bodies shown to the operator are cut to this many characters.
pub const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request could not be completed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned an error: {body}")]
    Http { body: String },
    #[error("response body is missing required fields")]
    InvalidShape,
    #[error("no report URL returned")]
    MissingReportUrl,
}

/// Blocking client for the detection service. Calls are made from worker
/// threads, never from the UI thread.
pub struct ApiClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            // No deadline on either call; the service owns the latency.
            client: reqwest::blocking::Client::builder()
                .timeout(None)
                .build()
                .unwrap_or_else(|_| reqwest::blocking::Client::new()),
        }
    }

    /// POSTs the selected image as multipart form data and returns the
    /// validated detection result.
    pub fn detect(&self, file: &SelectedFile) -> Result<DetectionResult, ApiError> {
        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(mime_for(&file.name))
            .map_err(ApiError::Transport)?;
        let form = multipart::Form::new().part("file", part);

        let url = format!("{}/api/v1/detect", self.base_url);
        log::info!("POST {} ({}, {} bytes)", url, file.name, file.bytes.len());
        let response = self.client.post(&url).multipart(form).send()?;
        let status = response.status();
        let body = response.text()?;
        handle_detect_response(status, &body)
    }

    /// POSTs a detection result and returns the URL of the generated PDF.
    pub fn generate_report(&self, result: &DetectionResult) -> Result<String, ApiError> {
        let url = format!("{}/api/v1/report", self.base_url);
        log::info!("POST {} (image_id: {})", url, result.image_id);
        let response = self.client.post(&url).json(result).send()?;
        let status = response.status();
        let body = response.text()?;
        handle_report_response(status, &body)
    }
}

fn mime_for(file_name: &str) -> &'static str {
    if file_name.to_ascii_lowercase().ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}

/// First 200 characters of an error body, with an ellipsis marker appended
/// when anything was cut off.
pub fn truncate_body(body: &str) -> String {
    if body.chars().count() > MAX_ERROR_BODY_CHARS {
        let mut short: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        short.push_str("...");
        short
    } else {
        body.to_string()
    }
}

fn handle_detect_response(status: StatusCode, body: &str) -> Result<DetectionResult, ApiError> {
    if !status.is_success() {
        log::warn!("detect returned {}", status);
        return Err(ApiError::Http {
            body: truncate_body(body),
        });
    }
    let raw: RawDetectionResult =
        serde_json::from_str(body).map_err(|_| ApiError::InvalidShape)?;
    raw.validate().ok_or(ApiError::InvalidShape)
}

fn handle_report_response(status: StatusCode, body: &str) -> Result<String, ApiError> {
    if !status.is_success() {
        log::warn!("report returned {}", status);
        return Err(ApiError::Http {
            body: truncate_body(body),
        });
    }
    let response: ReportResponse =
        serde_json::from_str(body).map_err(|_| ApiError::InvalidShape)?;
    response.report_url.ok_or(ApiError::MissingReportUrl)
}
