use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;

/// Decodes the base64 annotated image from a detect response. Returns `None`
/// when the payload is not base64 or not a decodable image.
pub fn decode_annotated_image(data: &str) -> Option<DynamicImage> {
    let bytes = STANDARD.decode(data.trim()).ok()?;
    image::load_from_memory(&bytes).ok()
}

/// Renders an ISO-8601 timestamp as local time; falls back to the raw
/// string when it does not parse.
pub fn format_timestamp(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}

pub fn resize_to_limit(img: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let width = img.width();
    let height = img.height();

    if width <= max_width && height <= max_height {
        return img.clone();
    }

    let ratio = (max_width as f32 / width as f32).min(max_height as f32 / height as f32);

    let new_width = (width as f32 * ratio) as u32;
    let new_height = (height as f32 * ratio) as u32;

    img.resize(new_width, new_height, image::imageops::FilterType::Triangle)
}
