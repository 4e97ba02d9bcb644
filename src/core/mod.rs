//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod error;
pub mod log;
pub mod pair;
pub mod quotes;
pub mod resolver;
pub mod service;

// Re-export main types for cleaner imports
pub use cache::RateCache;
pub use error::ConvertError;
pub use pair::{PairKey, currencies_from_pairs};
pub use quotes::{QuoteSource, RateQuote};
pub use resolver::{Conversion, RateLookup};
pub use service::RateService;
