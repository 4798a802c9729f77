use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::{FlowError, Result};
use crate::models::ImagePayload;

/// A raw file handed in by the caller, before validation.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Validate and stage a raw upload for analysis. Anything whose declared
/// content type is not an image is rejected before encoding.
pub fn stage(file: &UploadedFile) -> Result<ImagePayload> {
    if !file.content_type.starts_with("image/") {
        return Err(FlowError::Validation(
            "Please select a valid image file".to_string(),
        ));
    }

    let encoded = STANDARD.encode(&file.bytes);
    let byte_size = file.bytes.len() as u64;

    Ok(ImagePayload {
        file_name: file.name.clone(),
        content_type: file.content_type.clone(),
        data: format!("data:{};base64,{}", file.content_type, encoded),
        byte_size,
        size_label: format_size(byte_size),
    })
}

/// Human-readable size with base-1024 thresholds and two-decimal rounding;
/// trailing zeros are dropped. Values past the GB unit stay in GB.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = (((bytes as f64).ln() / 1024_f64.ln()).floor() as usize)
        .min(SIZE_UNITS.len() - 1);
    let scaled = bytes as f64 / 1024_f64.powi(exponent as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[exponent])
}
