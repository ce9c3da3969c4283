mod aggregate;
mod facet;
mod filter;
mod paginate;
mod predicate;
mod record;
mod state;

pub use aggregate::{aggregate, Stats};
pub use facet::{facet_values, result_companies, Facet};
pub use filter::filter;
pub use paginate::{total_pages, Paginator, PAGE_SIZE};
pub use predicate::{AmountRange, DateRange, PredicateSet};
pub use record::{parse_timestamp, InvoiceRecord};
pub use state::DashboardState;
