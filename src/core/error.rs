use thiserror::Error;

/// Terminal outcomes of a conversion request. Transport failures are reported
/// separately at fetch time; by the time the resolver runs, the cache is the
/// only source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Non-numeric amount or an empty currency selection.
    #[error("Invalid input")]
    InvalidInput,

    /// No direct, inverse, or bridged rate in the cache for the pair.
    #[error("Rate not available for {from}/{to}")]
    RateUnavailable { from: String, to: String },
}
