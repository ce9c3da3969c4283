use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use super::record::InvoiceRecord;

/// Record fields that feed filter suggestion lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    /// Issuing company
    Issuer,
    /// Receiving company
    Receiver,
    /// Product name
    Product,
}

impl Facet {
    fn value<'r>(&self, record: &'r InvoiceRecord) -> &'r str {
        match self {
            Facet::Issuer => &record.issuing_company,
            Facet::Receiver => &record.receiving_company,
            Facet::Product => &record.product_name,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Facet::Issuer => "Issuing companies",
            Facet::Receiver => "Receiving companies",
            Facet::Product => "Products",
        };
        f.write_str(label)
    }
}

/// Sorted, de-duplicated, non-empty values of `facet` across the whole store.
pub fn facet_values(records: &[InvoiceRecord], facet: Facet) -> Vec<String> {
    distinct(records.iter().map(|r| facet.value(r)))
}

/// Distinct issuing companies in a filtered view, sorted.
pub fn result_companies(view: &[&InvoiceRecord]) -> Vec<String> {
    distinct(view.iter().map(|r| r.issuing_company.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
