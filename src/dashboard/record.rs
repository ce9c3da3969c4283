use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One row of invoice data as delivered by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    #[serde(default, alias = "invoice_number")]
    pub invoice_number: String,
    #[serde(default, alias = "issuing_company")]
    pub issuing_company: String,
    #[serde(default, alias = "receiving_company")]
    pub receiving_company: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, alias = "product_name")]
    pub product_name: String,
    #[serde(default)]
    pub specification: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    /// Tax-inclusive total. `None` when the source value was missing, null or not a number.
    #[serde(
        default,
        alias = "total_amount",
        deserialize_with = "deserialize_lenient_amount"
    )]
    pub total_amount: Option<f64>,
}

impl InvoiceRecord {
    /// The amount if it can take part in arithmetic.
    pub fn valid_amount(&self) -> Option<f64> {
        self.total_amount.filter(|amount| !amount.is_nan())
    }

    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }
}

fn deserialize_lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let amount = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(amount.filter(|a| !a.is_nan()))
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a record timestamp into a wall-clock date-time.
///
/// Date-only values resolve to the start of that day. Offsets on RFC 3339
/// values are dropped so every timestamp is compared on its local reading.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
