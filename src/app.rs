use eframe::egui;
use image::DynamicImage;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use crate::api::{ApiClient, ApiError};
use crate::models::{DetectionResult, ReportRecord, Section, SelectedFile};
use crate::ui;
use crate::utils::{decode_annotated_image, resize_to_limit};

/// Outcome of a background call, delivered back to the UI thread.
pub enum AppMessage {
    DetectFinished(Result<DetectionResult, ApiError>),
    ReportFinished(Result<ReportRecord, ApiError>),
}

pub struct DetectionApp {
    pub api: Arc<ApiClient>,
    pub section: Section,
    pub selected_file: Option<SelectedFile>,
    pub result: Option<DetectionResult>,
    pub last_error: Option<String>,
    pub annotated: Option<DynamicImage>,
    pub texture: Option<egui::TextureHandle>,
    pub loading: bool,
    pub report_loading: bool,
    pub reports: Vec<ReportRecord>,
    pub status_message: Option<(String, f32)>,
    pub tx: mpsc::Sender<AppMessage>,
    pub rx: mpsc::Receiver<AppMessage>,
}

impl DetectionApp {
    pub fn new(api: ApiClient) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            api: Arc::new(api),
            section: Section::Detection,
            selected_file: None,
            result: None,
            last_error: None,
            annotated: None,
            texture: None,
            loading: false,
            report_loading: false,
            reports: Vec::new(),
            status_message: None,
            tx,
            rx,
        }
    }

    pub fn show_status(&mut self, message: &str) {
        self.status_message = Some((message.to_string(), 2.0));
    }

    /// Opens a file dialog and reads the chosen image into memory. Replaces
    /// any previous selection; the current result stays on screen.
    pub fn select_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("image", &["jpg", "jpeg", "png"])
            .pick_file()
        {
            match std::fs::read(&path) {
                Ok(bytes) => {
                    let name = path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("image")
                        .to_string();
                    self.selected_file = Some(SelectedFile { name, bytes });
                }
                Err(e) => self.show_status(&format!("Failed to read file: {}", e)),
            }
        }
    }

    /// Sends the selected file to the detect endpoint on a worker thread.
    /// No-op without a selection. Repeated calls while a request is in
    /// flight start another concurrent request; outcomes apply in arrival
    /// order.
    pub fn submit(&mut self, ctx: &egui::Context) {
        let Some(file) = self.selected_file.clone() else {
            return;
        };
        self.loading = true;
        let api = self.api.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let outcome = api.detect(&file);
            let _ = tx.send(AppMessage::DetectFinished(outcome));
            ctx.request_repaint();
        });
    }

    /// Requests a PDF report for a freshly stored result. One call per
    /// successful detection.
    fn spawn_report(&mut self, result: DetectionResult, ctx: &egui::Context) {
        self.report_loading = true;
        let api = self.api.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let outcome = api
                .generate_report(&result)
                .map(|url| ReportRecord::new(url, &result.image_id));
            let _ = tx.send(AppMessage::ReportFinished(outcome));
            ctx.request_repaint();
        });
    }

    /// Applies one background outcome to the app state. Returns the stored
    /// result when it still needs a report request.
    pub fn apply_message(&mut self, msg: AppMessage) -> Option<DetectionResult> {
        match msg {
            AppMessage::DetectFinished(outcome) => {
                self.loading = false;
                match outcome {
                    Ok(result) => {
                        log::info!(
                            "detection {} stored ({} compliant, {} violations)",
                            result.image_id,
                            result.summary.helmet_count,
                            result.summary.no_helmet_count
                        );
                        self.annotated = decode_annotated_image(&result.annotated_image)
                            .map(|img| resize_to_limit(&img, 1920, 1080));
                        self.texture = None;
                        self.last_error = None;
                        self.result = Some(result.clone());
                        self.show_status("File uploaded and processed successfully!");
                        Some(result)
                    }
                    Err(err) => {
                        log::error!("detect call failed: {}", err);
                        self.result = None;
                        self.annotated = None;
                        self.texture = None;
                        let message = match err {
                            ApiError::Http { body } => format!("Upload failed: {}", body),
                            ApiError::InvalidShape => {
                                "Invalid image or server error. Please upload a valid image."
                                    .to_string()
                            }
                            _ => "An error occurred while uploading the file.".to_string(),
                        };
                        self.last_error = Some(message.clone());
                        self.show_status(&message);
                        None
                    }
                }
            }
            AppMessage::ReportFinished(outcome) => {
                self.report_loading = false;
                match outcome {
                    Ok(record) => {
                        log::info!("report ready: {}", record.name);
                        self.reports.push(record);
                        self.show_status("Report generated successfully!");
                    }
                    Err(err) => {
                        log::error!("report call failed: {}", err);
                        let message = match err {
                            ApiError::Http { body } => {
                                format!("Report generation failed: {}", body)
                            }
                            ApiError::MissingReportUrl => {
                                "Report generation failed. No report URL returned.".to_string()
                            }
                            _ => "An error occurred while generating the report.".to_string(),
                        };
                        self.show_status(&message);
                    }
                }
                None
            }
        }
    }
}

impl eframe::App for DetectionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(msg) = self.rx.try_recv() {
            if let Some(result) = self.apply_message(msg) {
                self.spawn_report(result, ctx);
            }
        }

        if let Some((_, ttl)) = &mut self.status_message {
            *ttl -= ctx.input(|i| i.stable_dt);
            if *ttl <= 0.0 {
                self.status_message = None;
            } else {
                ctx.request_repaint();
            }
        }

        ui::side_panel(self, ctx);
        match self.section {
            Section::Detection => ui::detection_panel(self, ctx),
            Section::Reports => ui::reports_panel(self, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Detection, Summary};

    fn test_app() -> DetectionApp {
        DetectionApp::new(ApiClient::new("http://localhost:8000"))
    }

    fn sample_result(image_id: &str) -> DetectionResult {
        DetectionResult {
            image_id: image_id.to_string(),
            timestamp: "2025-06-01T12:30:00Z".to_string(),
            detections: vec![Detection {
                class_name: "no_helmet".to_string(),
                confidence: 0.92,
                bbox: vec![1.0, 2.0, 3.0, 4.0],
            }],
            summary: Summary {
                helmet_count: 0,
                no_helmet_count: 1,
            },
            annotated_image: "aGVsbG8=".to_string(),
        }
    }

    fn transport_error() -> ApiError {
        // An invalid URL fails at send time without touching the network.
        ApiError::Transport(
            reqwest::blocking::Client::new()
                .get("http://")
                .send()
                .unwrap_err(),
        )
    }

    #[test]
    fn submit_without_file_is_noop() {
        let mut app = test_app();
        app.submit(&egui::Context::default());
        assert!(!app.loading);
    }

    #[test]
    fn detect_success_stores_result_and_requests_report() {
        let mut app = test_app();
        app.loading = true;
        let followup = app.apply_message(AppMessage::DetectFinished(Ok(sample_result("img123"))));
        assert!(!app.loading);
        assert!(app.last_error.is_none());
        let stored = app.result.as_ref().expect("result should be stored");
        assert_eq!(stored.image_id, "img123");
        assert_eq!(
            followup.expect("a valid result needs a report").image_id,
            "img123"
        );
        assert_eq!(
            app.status_message.as_ref().unwrap().0,
            "File uploaded and processed successfully!"
        );
    }

    #[test]
    fn detect_failure_clears_result_on_every_path() {
        let errors = [
            transport_error(),
            ApiError::Http {
                body: "boom".to_string(),
            },
            ApiError::InvalidShape,
        ];
        for err in errors {
            let mut app = test_app();
            app.result = Some(sample_result("old"));
            app.loading = true;
            let followup = app.apply_message(AppMessage::DetectFinished(Err(err)));
            assert!(!app.loading);
            assert!(app.result.is_none());
            assert!(app.last_error.is_some());
            assert!(followup.is_none());
        }
    }

    #[test]
    fn detect_http_failure_message_is_truncated_body() {
        let mut app = test_app();
        let body = crate::api::truncate_body(&"e".repeat(300));
        app.apply_message(AppMessage::DetectFinished(Err(ApiError::Http { body })));
        let message = app.status_message.as_ref().unwrap().0.clone();
        assert!(message.starts_with("Upload failed: "));
        assert!(message.ends_with("..."));
        // 200 body chars + ellipsis marker.
        assert_eq!(message.len() - "Upload failed: ".len(), 203);
    }

    #[test]
    fn detect_shape_failure_message() {
        let mut app = test_app();
        app.apply_message(AppMessage::DetectFinished(Err(ApiError::InvalidShape)));
        assert_eq!(
            app.last_error.as_deref(),
            Some("Invalid image or server error. Please upload a valid image.")
        );
    }

    #[test]
    fn prior_result_stays_until_next_outcome() {
        let mut app = test_app();
        app.apply_message(AppMessage::DetectFinished(Ok(sample_result("img1"))));
        app.selected_file = Some(SelectedFile {
            name: "next.jpg".to_string(),
            bytes: vec![1, 2, 3],
        });
        // Selecting a new file must not disturb the stored result.
        assert_eq!(app.result.as_ref().unwrap().image_id, "img1");
    }

    #[test]
    fn report_success_appends_in_order() {
        let mut app = test_app();
        for id in ["img1", "img2"] {
            app.report_loading = true;
            app.apply_message(AppMessage::ReportFinished(Ok(ReportRecord::new(
                format!("http://host/reports/{}.pdf", id),
                id,
            ))));
            assert!(!app.report_loading);
        }
        let names: Vec<_> = app.reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["report_img1.pdf", "report_img2.pdf"]);
    }

    #[test]
    fn report_failures_append_nothing() {
        let errors = [
            transport_error(),
            ApiError::Http {
                body: "down".to_string(),
            },
            ApiError::MissingReportUrl,
        ];
        for err in errors {
            let mut app = test_app();
            app.report_loading = true;
            app.apply_message(AppMessage::ReportFinished(Err(err)));
            assert!(!app.report_loading);
            assert!(app.reports.is_empty());
        }
    }

    #[test]
    fn report_without_url_has_explicit_message() {
        let mut app = test_app();
        app.apply_message(AppMessage::ReportFinished(Err(ApiError::MissingReportUrl)));
        assert_eq!(
            app.status_message.as_ref().unwrap().0,
            "Report generation failed. No report URL returned."
        );
    }

    #[test]
    fn view_switch_keeps_state() {
        let mut app = test_app();
        app.apply_message(AppMessage::DetectFinished(Ok(sample_result("img1"))));
        app.section = Section::Reports;
        app.section = Section::Detection;
        assert!(app.result.is_some());
    }
}
