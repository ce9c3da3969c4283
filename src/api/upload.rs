use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DashboardError, Result};

/// Largest spreadsheet the backend accepts (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &["xlsx", "xls", "csv"];

/// A spreadsheet that passed local validation.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub path: PathBuf,
    pub file_name: String,
    pub content_type: &'static str,
    pub size: u64,
}

/// Check type and size before anything goes over the network.
pub fn validate_upload(path: &Path) -> Result<UploadFile> {
    if !path.is_file() {
        return Err(DashboardError::UploadNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        let shown = if extension.is_empty() {
            "(none)".to_string()
        } else {
            format!(".{extension}")
        };
        return Err(DashboardError::UnsupportedFileType(shown));
    }

    let size = fs::metadata(path)?.len();
    if size > MAX_UPLOAD_BYTES {
        return Err(DashboardError::FileTooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();

    Ok(UploadFile {
        path: path.to_path_buf(),
        file_name,
        content_type: content_type_for(&extension),
        size,
    })
}

fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xls" => "application/vnd.ms-excel",
        "csv" => "text/csv",
        _ => "application/octet-stream",
    }
}

/// Encode a single file part as a `multipart/form-data` body.
pub fn multipart_body(boundary: &str, field: &str, file: &UploadFile, bytes: &[u8]) -> Vec<u8> {
    let file_name = file.file_name.replace('"', "'");
    let mut body = Vec::with_capacity(bytes.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}
