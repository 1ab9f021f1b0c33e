//! Core business logic abstractions

pub mod log;
pub mod messages;
pub mod query;
pub mod rates;

// Re-export main types for cleaner imports
pub use query::{Query, QueryError};
pub use rates::{CurrencyInfo, RateProvider, RateTable, SourceError};
