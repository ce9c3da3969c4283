use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{DashboardError, Result};

/// Success code carried inside the response envelope.
pub const CODE_OK: i64 = 200;

const HTTP_UNAUTHORIZED: u16 = 401;

/// Uniform `{code, message, data}` wrapper around every JSON response.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

/// Turn an HTTP status and body into the envelope payload.
///
/// HTTP 401 (or an envelope code of 401) maps to [`DashboardError::Unauthorized`].
/// Any other non-200 envelope code becomes [`DashboardError::Backend`] with
/// the server's message.
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>> {
    if status == HTTP_UNAUTHORIZED {
        return Err(DashboardError::Unauthorized);
    }

    let envelope: Envelope<T> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !(200..300).contains(&status) => {
            return Err(DashboardError::Backend {
                code: i64::from(status),
                message: summarize_body(body),
            });
        }
        Err(e) => return Err(DashboardError::Decode(e)),
    };

    if envelope.code == i64::from(HTTP_UNAUTHORIZED) {
        return Err(DashboardError::Unauthorized);
    }
    if envelope.code != CODE_OK {
        return Err(DashboardError::Backend {
            code: envelope.code,
            message: envelope
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "request failed".to_string()),
        });
    }

    Ok(envelope.data)
}

fn summarize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response".to_string();
    }
    trimmed.chars().take(200).collect()
}
