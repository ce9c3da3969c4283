mod client;
mod download;
mod envelope;
mod upload;

pub use client::ApiClient;
pub use download::{
    filename_from_content_disposition, save_stream, ExportFilters, DEFAULT_EXPORT_NAME,
};
pub use envelope::{decode_envelope, Envelope, CODE_OK};
pub use upload::{multipart_body, validate_upload, UploadFile, MAX_UPLOAD_BYTES};
