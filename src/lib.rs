pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod render;

pub use api::{ApiClient, ExportFilters};
pub use config::{Config, Session};
pub use dashboard::{
    aggregate, facet_values, filter, result_companies, DashboardState, Facet, InvoiceRecord,
    Paginator, PredicateSet, Stats, PAGE_SIZE,
};
pub use error::{DashboardError, Result};
