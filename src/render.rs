use tabled::{settings::Style, Table, Tabled};

use crate::dashboard::{InvoiceRecord, Stats, PAGE_SIZE};

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "ISSUER")]
    issuer: String,
    #[tabled(rename = "RECEIVER")]
    receiver: String,
    #[tabled(rename = "PRODUCT")]
    product: String,
    #[tabled(rename = "SPEC")]
    specification: String,
    #[tabled(rename = "QTY")]
    quantity: i64,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

/// Render one page of records. Row numbers continue across pages.
pub fn page_table(records: &[InvoiceRecord], page: usize) -> String {
    let offset = page.saturating_sub(1) * PAGE_SIZE;
    let rows: Vec<RecordRow> = records
        .iter()
        .enumerate()
        .map(|(idx, r)| RecordRow {
            index: offset + idx + 1,
            number: r.invoice_number.clone(),
            date: r.timestamp.clone(),
            issuer: r.issuing_company.clone(),
            receiver: r.receiving_company.clone(),
            product: r.product_name.clone(),
            specification: r.specification.clone().unwrap_or_default(),
            quantity: r.quantity,
            amount: r.valid_amount().map(format_amount).unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// "Page 2 of 3 (25 records)"
pub fn page_indicator(page: usize, total_pages: usize, filtered: usize) -> String {
    let shown = if total_pages == 0 { 0 } else { page };
    format!("Page {shown} of {total_pages} ({filtered} records)")
}

pub fn stats_summary(stats: &Stats) -> String {
    let lines = [
        ("Invoices:", stats.count.to_string()),
        ("Total amount:", format_amount(stats.total_amount)),
        ("Average amount:", format_amount(stats.average_amount)),
        ("Max amount:", format_amount(stats.max_amount)),
        ("Min amount:", format_amount(stats.min_amount)),
        ("Companies:", stats.distinct_company_count.to_string()),
        ("Products:", stats.distinct_product_count.to_string()),
    ];
    lines
        .iter()
        .map(|(label, value)| format!("{label:<16}{value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Two decimals with thousands separators.
pub fn format_amount(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let negative = whole.starts_with('-');
    let digits = whole.trim_start_matches('-');
    let grouped = group_digits(digits);

    if negative {
        format!("-{}.{}", grouped, frac)
    } else {
        format!("{}.{}", grouped, frac)
    }
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
