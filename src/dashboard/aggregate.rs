use serde::Serialize;
use std::collections::HashSet;

use super::record::InvoiceRecord;

/// Summary statistics over a filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub count: usize,
    pub total_amount: f64,
    pub average_amount: f64,
    pub max_amount: f64,
    pub min_amount: f64,
    pub distinct_company_count: usize,
    pub distinct_product_count: usize,
}

/// Compute [`Stats`] over `view`.
///
/// When the view is empty or no record carries a valid amount, every field
/// is zero, `count` included. Otherwise the average divides by the number of
/// valid amounts, while `count` and the distinct counts cover the whole view.
pub fn aggregate(view: &[&InvoiceRecord]) -> Stats {
    let valid_amounts: Vec<f64> = view.iter().filter_map(|r| r.valid_amount()).collect();

    if view.is_empty() || valid_amounts.is_empty() {
        return Stats::default();
    }

    let total_amount: f64 = valid_amounts.iter().sum();
    let max_amount = valid_amounts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_amount = valid_amounts.iter().copied().fold(f64::INFINITY, f64::min);

    let companies: HashSet<&str> = view.iter().map(|r| r.issuing_company.as_str()).collect();
    let products: HashSet<&str> = view.iter().map(|r| r.product_name.as_str()).collect();

    Stats {
        count: view.len(),
        total_amount,
        average_amount: total_amount / valid_amounts.len() as f64,
        max_amount,
        min_amount,
        distinct_company_count: companies.len(),
        distinct_product_count: products.len(),
    }
}
