use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use ureq::{Agent, RequestBuilder};

use super::download::{
    filename_from_content_disposition, save_stream, ExportFilters, DEFAULT_EXPORT_NAME,
};
use super::envelope::decode_envelope;
use super::upload::{multipart_body, UploadFile};
use crate::config::ApiSettings;
use crate::dashboard::InvoiceRecord;
use crate::error::{DashboardError, Result};

/// Largest JSON body read into memory.
const MAX_JSON_BYTES: u64 = 64 * 1024 * 1024;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Blocking client for the invoice backend.
pub struct ApiClient {
    agent: Agent,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings, token: Option<String>) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(settings.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize<B>(&self, request: RequestBuilder<B>) -> RequestBuilder<B> {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// Exchange credentials for a bearer token.
    pub fn login(&self, username: &str, password: &str) -> Result<String> {
        let url = self.url("auth/login");
        tracing::info!(%url, username, "logging in");

        let payload = serde_json::to_string(&LoginRequest { username, password })?;
        let mut response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .send(payload.as_bytes())?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_JSON_BYTES)
            .read_to_string()?;

        decode_envelope::<LoginResponse>(status, &body)?
            .map(|r| r.token)
            .ok_or_else(|| DashboardError::Backend {
                code: i64::from(status),
                message: "login response did not include a token".to_string(),
            })
    }

    /// Fetch the complete record store.
    pub fn fetch_invoices(&self) -> Result<Vec<InvoiceRecord>> {
        let url = self.url("invoices");
        tracing::info!(%url, "fetching invoices");

        let mut response = self.authorize(self.agent.get(&url)).call()?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_JSON_BYTES)
            .read_to_string()?;

        let records = decode_envelope::<Vec<InvoiceRecord>>(status, &body)?.unwrap_or_default();
        tracing::info!(count = records.len(), "fetched invoices");
        Ok(records)
    }

    /// Upload a spreadsheet and return how many records the server added.
    ///
    /// `file` comes from [`validate_upload`](super::validate_upload), so type
    /// and size have been checked before this is called.
    pub fn upload(&self, file: &UploadFile) -> Result<u64> {
        let bytes = fs::read(&file.path)?;

        let boundary = format!(
            "----invdash{:x}",
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        );
        let body = multipart_body(&boundary, "file", file, &bytes);

        let url = self.url("invoices/upload");
        tracing::info!(%url, file = %file.file_name, size = file.size, "uploading spreadsheet");

        let mut response = self
            .authorize(self.agent.post(&url))
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .send(&body[..])?;

        let status = response.status().as_u16();
        let text = response
            .body_mut()
            .with_config()
            .limit(MAX_JSON_BYTES)
            .read_to_string()?;

        Ok(decode_envelope::<u64>(status, &text)?.unwrap_or(0))
    }

    /// Stream the filtered export into `output_dir`. Returns the saved path
    /// and the number of bytes written.
    pub fn download(&self, filters: &ExportFilters, output_dir: &Path) -> Result<(PathBuf, u64)> {
        let url = self.url("invoices/export");
        let mut request = self.authorize(self.agent.get(&url));
        for (key, value) in filters.query_pairs() {
            request = request.query(key, value);
        }
        tracing::info!(%url, "downloading export");

        let mut response = request.call()?;
        let status = response.status().as_u16();
        let is_json = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

        // Failures come back as an envelope instead of a file
        if !(200..300).contains(&status) || is_json {
            let text = response
                .body_mut()
                .with_config()
                .limit(MAX_JSON_BYTES)
                .read_to_string()?;
            decode_envelope::<serde_json::Value>(status, &text)?;
            return Err(DashboardError::Backend {
                code: i64::from(status),
                message: "export did not return a file".to_string(),
            });
        }

        let file_name = response
            .headers()
            .get("content-disposition")
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| DEFAULT_EXPORT_NAME.to_string());

        let (path, written) = save_stream(&mut response.body_mut().as_reader(), output_dir, &file_name)?;

        tracing::info!(path = %path.display(), bytes = written, "export saved");
        Ok((path, written))
    }
}
