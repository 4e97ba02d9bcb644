//! Quote source abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::pair::PairKey;

/// One provider's quoted exchange rate for a currency pair at fetch time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateQuote {
    pub provider: String,
    pub rate: f64,
    pub register_link: String,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// A remote listing of currency pairs and per-pair provider quotes.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_pairs(&self) -> Result<Vec<PairKey>>;

    async fn fetch_quotes(&self, pair: &PairKey) -> Result<Vec<RateQuote>>;
}
