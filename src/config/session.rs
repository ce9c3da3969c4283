use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credentials saved by `invdash login`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Session {
    pub username: String,
    pub token: String,
    pub logged_in_at: DateTime<Utc>,
}
