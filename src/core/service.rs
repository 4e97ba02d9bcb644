//! Fetch orchestration: the piece that turns quote-source responses into
//! cache state.

use anyhow::Result;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::core::cache::RateCache;
use crate::core::error::ConvertError;
use crate::core::pair::PairKey;
use crate::core::quotes::{QuoteSource, RateQuote};
use crate::core::resolver::{self, Conversion};

/// Owns the cache and the quote source. Constructed once at startup and
/// passed by reference to the commands; there is no module-level state.
pub struct RateService {
    source: Arc<dyn QuoteSource>,
    cache: RateCache,
    bridge: String,
    tickets: Mutex<HashMap<PairKey, u64>>,
}

impl RateService {
    pub fn new(source: Arc<dyn QuoteSource>, cache: RateCache, bridge: &str) -> Self {
        RateService {
            source,
            cache,
            bridge: bridge.to_uppercase(),
            tickets: Mutex::new(HashMap::new()),
        }
    }

    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    pub fn bridge(&self) -> &str {
        &self.bridge
    }

    pub async fn load_pairs(&self) -> Result<Vec<PairKey>> {
        self.source.fetch_pairs().await
    }

    /// Fetches quotes for `pair` and updates the cache: the entry is replaced
    /// on success and cleared on failure (the error still propagates so the
    /// caller can report it).
    ///
    /// Each call takes a per-pair sequence ticket. A completion whose ticket
    /// is no longer current is dropped without touching the cache, so a slow
    /// response can never overwrite the result of a newer request for the
    /// same pair.
    pub async fn refresh_pair(&self, pair: &PairKey) -> Result<Vec<RateQuote>> {
        let ticket = self.take_ticket(pair).await;
        match self.source.fetch_quotes(pair).await {
            Ok(quotes) => {
                if self.is_current(pair, ticket).await {
                    self.cache.update(pair.clone(), &quotes).await;
                } else {
                    debug!(%pair, ticket, "Dropping stale quote response");
                }
                Ok(quotes)
            }
            Err(e) => {
                if self.is_current(pair, ticket).await {
                    self.cache.clear(pair).await;
                } else {
                    debug!(%pair, ticket, "Dropping stale fetch failure");
                }
                Err(e)
            }
        }
    }

    /// The pairs the resolver may consult for a `from` -> `to` conversion
    /// (direct, inverse, and the two bridge legs), restricted to pairs the
    /// source actually offers.
    pub fn candidate_pairs(&self, from: &str, to: &str, offered: &[PairKey]) -> Vec<PairKey> {
        let from = from.to_uppercase();
        let to = to.to_uppercase();

        let wanted = [
            PairKey::new(&from, &to),
            PairKey::new(&to, &from),
            PairKey::new(&from, &self.bridge),
            PairKey::new(&self.bridge, &to),
        ];

        let mut candidates = Vec::new();
        for pair in wanted {
            if offered.contains(&pair) && !candidates.contains(&pair) {
                candidates.push(pair);
            }
        }
        candidates
    }

    /// Refreshes the given pairs concurrently, invoking `on_progress` as each
    /// completes. Individual failures leave cleared entries behind and do not
    /// abort the rest; the resolver treats those pairs as unknown.
    pub async fn refresh_all(&self, pairs: &[PairKey], on_progress: &(dyn Fn() + Sync)) {
        let refresh_futures = pairs.iter().map(|pair| async move {
            if let Err(e) = self.refresh_pair(pair).await {
                debug!(%pair, error = %e, "Prefetch failed");
            }
            on_progress();
        });
        join_all(refresh_futures).await;
    }

    pub async fn convert(
        &self,
        raw_amount: &str,
        from: &str,
        to: &str,
    ) -> Result<Conversion, ConvertError> {
        resolver::convert(&self.cache, raw_amount, from, to, &self.bridge).await
    }

    async fn take_ticket(&self, pair: &PairKey) -> u64 {
        let mut tickets = self.tickets.lock().await;
        let ticket = tickets.entry(pair.clone()).or_insert(0);
        *ticket += 1;
        *ticket
    }

    async fn is_current(&self, pair: &PairKey, ticket: u64) -> bool {
        let tickets = self.tickets.lock().await;
        tickets.get(pair).copied() == Some(ticket)
    }
}
