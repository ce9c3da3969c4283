use super::predicate::{AmountRange, DateRange, PredicateSet};
use super::record::InvoiceRecord;

/// Stable filter: the records passing every active predicate, in store order.
pub fn filter<'a>(records: &'a [InvoiceRecord], predicates: &PredicateSet) -> Vec<&'a InvoiceRecord> {
    let keyword = predicates.active_keyword().map(str::to_lowercase);
    let product = predicates.active_product();
    let issuing = predicates.active_issuing_company();
    let receiving = predicates.active_receiving_company();

    let view: Vec<&InvoiceRecord> = records
        .iter()
        .filter(|r| keyword.as_deref().map_or(true, |k| matches_keyword(r, k)))
        .filter(|r| product.map_or(true, |p| r.product_name == p))
        .filter(|r| issuing.map_or(true, |c| r.issuing_company == c))
        .filter(|r| receiving.map_or(true, |c| r.receiving_company == c))
        .filter(|r| matches_date_range(r, &predicates.date_range))
        .filter(|r| matches_amount_range(r, &predicates.amount_range))
        .collect();

    tracing::debug!(total = records.len(), matched = view.len(), "filtered invoice records");
    view
}

/// Case-insensitive substring match over number, both companies and product.
/// `keyword` must already be lower-cased.
fn matches_keyword(record: &InvoiceRecord, keyword: &str) -> bool {
    [
        &record.invoice_number,
        &record.issuing_company,
        &record.receiving_company,
        &record.product_name,
    ]
    .iter()
    .any(|field| !field.is_empty() && field.to_lowercase().contains(keyword))
}

/// Unparseable timestamps never satisfy an active date bound.
fn matches_date_range(record: &InvoiceRecord, range: &DateRange) -> bool {
    if !range.is_active() {
        return true;
    }
    let Some(at) = record.parsed_timestamp() else {
        return false;
    };
    range.lower().map_or(true, |lower| at >= lower) && range.upper().map_or(true, |upper| at <= upper)
}

/// Records without a valid amount never satisfy an active amount bound.
fn matches_amount_range(record: &InvoiceRecord, range: &AmountRange) -> bool {
    if !range.is_active() {
        return true;
    }
    let Some(amount) = record.valid_amount() else {
        return false;
    };
    let (min, max) = range.bounds();
    amount >= min && amount <= max
}
