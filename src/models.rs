use serde::{Deserialize, Serialize};

/// One labeled bounding-box prediction from the detection service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "class")]
    pub class_name: String,
    pub confidence: f64,
    pub bbox: Vec<f64>,
}

impl Detection {
    /// List-entry text, e.g. `no_helmet (confidence: 92.0%, bbox: [1, 2, 3, 4])`.
    pub fn display_line(&self) -> String {
        let coords = self
            .bbox
            .iter()
            .map(|v| format!("{}", v))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{} (confidence: {:.1}%, bbox: [{}])",
            self.class_name,
            self.confidence * 100.0,
            coords
        )
    }
}

/// Aggregate compliant/violation counts for one image.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Summary {
    pub helmet_count: u32,
    pub no_helmet_count: u32,
}

/// Detect response as it arrives on the wire. `detections`, `summary` and
/// `annotated_image` may each be missing; [`RawDetectionResult::validate`]
/// promotes a complete body to a [`DetectionResult`].
#[derive(Clone, Debug, Deserialize)]
pub struct RawDetectionResult {
    #[serde(default)]
    pub image_id: String,
    #[serde(default)]
    pub timestamp: String,
    pub detections: Option<Vec<Detection>>,
    pub summary: Option<Summary>,
    pub annotated_image: Option<String>,
}

impl RawDetectionResult {
    pub fn validate(self) -> Option<DetectionResult> {
        let annotated_image = self.annotated_image.filter(|s| !s.is_empty())?;
        Some(DetectionResult {
            image_id: self.image_id,
            timestamp: self.timestamp,
            detections: self.detections?,
            summary: self.summary?,
            annotated_image,
        })
    }
}

/// A validated detect response. Immutable once built; the app keeps only the
/// most recent one.
#[derive(Clone, Debug, Serialize)]
pub struct DetectionResult {
    pub image_id: String,
    pub timestamp: String,
    pub detections: Vec<Detection>,
    pub summary: Summary,
    pub annotated_image: String,
}

/// Report response body; only `report_url` matters to the client.
#[derive(Clone, Debug, Deserialize)]
pub struct ReportResponse {
    pub report_url: Option<String>,
}

/// One generated PDF report in the reports list.
#[derive(Clone, Debug)]
pub struct ReportRecord {
    pub url: String,
    pub name: String,
}

impl ReportRecord {
    pub fn new(url: String, image_id: &str) -> Self {
        Self {
            url,
            name: format!("report_{}.pdf", image_id),
        }
    }
}

/// Which top-level screen is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Detection,
    Reports,
}

/// An image chosen by the operator, held in memory until replaced.
#[derive(Clone)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}
