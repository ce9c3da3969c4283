use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Inclusive calendar date range. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Lower bound at the start of the start day.
    pub fn lower(&self) -> Option<NaiveDateTime> {
        self.start.and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    /// Upper bound at 23:59:59.999 of the end day.
    pub fn upper(&self) -> Option<NaiveDateTime> {
        self.end.and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
    }
}

/// Inclusive amount range. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AmountRange {
    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Effective bounds with the defaults applied: min 0, max +inf.
    pub fn bounds(&self) -> (f64, f64) {
        (self.min.unwrap_or(0.0), self.max.unwrap_or(f64::INFINITY))
    }
}

/// Filter criteria, one slot per dimension. Blank slots match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredicateSet {
    pub keyword: String,
    pub product: String,
    pub issuing_company: String,
    pub receiving_company: String,
    pub date_range: DateRange,
    pub amount_range: AmountRange,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The keyword as typed, or `None` when blank.
    pub fn active_keyword(&self) -> Option<&str> {
        active_text(&self.keyword)
    }

    pub fn active_product(&self) -> Option<&str> {
        active_text(&self.product)
    }

    pub fn active_issuing_company(&self) -> Option<&str> {
        active_text(&self.issuing_company)
    }

    pub fn active_receiving_company(&self) -> Option<&str> {
        active_text(&self.receiving_company)
    }

    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.active_keyword().is_none()
            && self.active_product().is_none()
            && self.active_issuing_company().is_none()
            && self.active_receiving_company().is_none()
            && !self.date_range.is_active()
            && !self.amount_range.is_active()
    }
}

/// Whitespace only decides whether a slot is active; matching uses the value untouched.
fn active_text(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
