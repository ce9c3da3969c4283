use chrono::NaiveDate;

use super::aggregate::{aggregate, Stats};
use super::facet::{facet_values, result_companies, Facet};
use super::filter::filter;
use super::paginate::{total_pages, Paginator};
use super::predicate::{AmountRange, DateRange, PredicateSet};
use super::record::InvoiceRecord;

/// Session state behind the dashboard: the loaded records, the active
/// filters and the page cursor.
///
/// Derived values (filtered view, stats, facets) are recomputed from the
/// records and predicates on every call. Every predicate setter puts the
/// cursor back on page 1.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    records: Vec<InvoiceRecord>,
    predicates: PredicateSet,
    pagination: Paginator,
}

impl DashboardState {
    pub fn new(records: Vec<InvoiceRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Replace the record store, e.g. after a refetch.
    pub fn load(&mut self, records: Vec<InvoiceRecord>) {
        tracing::debug!(count = records.len(), "loaded record store");
        self.records = records;
        self.pagination.reset();
    }

    pub fn records(&self) -> &[InvoiceRecord] {
        &self.records
    }

    pub fn predicates(&self) -> &PredicateSet {
        &self.predicates
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn set_predicates(&mut self, predicates: PredicateSet) {
        self.predicates = predicates;
        self.filters_changed();
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.predicates.keyword = keyword.into();
        self.filters_changed();
    }

    pub fn set_product(&mut self, product: impl Into<String>) {
        self.predicates.product = product.into();
        self.filters_changed();
    }

    pub fn set_issuing_company(&mut self, company: impl Into<String>) {
        self.predicates.issuing_company = company.into();
        self.filters_changed();
    }

    pub fn set_receiving_company(&mut self, company: impl Into<String>) {
        self.predicates.receiving_company = company.into();
        self.filters_changed();
    }

    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.predicates.date_range = DateRange { start, end };
        self.filters_changed();
    }

    pub fn set_amount_range(&mut self, min: Option<f64>, max: Option<f64>) {
        self.predicates.amount_range = AmountRange { min, max };
        self.filters_changed();
    }

    pub fn clear_filters(&mut self) {
        self.set_predicates(PredicateSet::default());
    }

    fn filters_changed(&mut self) {
        self.pagination.reset();
    }

    pub fn filtered(&self) -> Vec<&InvoiceRecord> {
        filter(&self.records, &self.predicates)
    }

    pub fn stats(&self) -> Stats {
        aggregate(&self.filtered())
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len())
    }

    /// Records on the current page, cloned out of the store.
    pub fn page_records(&self) -> Vec<InvoiceRecord> {
        let view = self.filtered();
        self.pagination.page(&view).iter().map(|r| (*r).clone()).collect()
    }

    /// Suggestion list for `facet`, drawn from the unfiltered store.
    pub fn facet(&self, facet: Facet) -> Vec<String> {
        facet_values(&self.records, facet)
    }

    /// Issuing companies present in the filtered view.
    pub fn result_companies(&self) -> Vec<String> {
        result_companies(&self.filtered())
    }

    pub fn go_to_page(&mut self, n: usize) -> bool {
        let pages = self.total_pages();
        self.pagination.go_to_page(n, pages)
    }

    pub fn first_page(&mut self) -> bool {
        let pages = self.total_pages();
        self.pagination.first(pages)
    }

    pub fn previous_page(&mut self) -> bool {
        let pages = self.total_pages();
        self.pagination.previous(pages)
    }

    pub fn next_page(&mut self) -> bool {
        let pages = self.total_pages();
        self.pagination.next(pages)
    }

    pub fn last_page(&mut self) -> bool {
        let pages = self.total_pages();
        self.pagination.last(pages)
    }
}
