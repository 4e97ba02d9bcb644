use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::core::pair::PairKey;
use crate::core::quotes::RateQuote;

/// In-memory store of fetched quotes, keyed by currency pair. Each entry maps
/// provider name to quoted rate. An empty mapping means "no usable quotes",
/// whether the pair was never fetched, fetched empty, or cleared after a
/// failed fetch.
///
/// Entries are replaced wholesale on update and live for the process
/// lifetime; there is no TTL or size bound.
#[derive(Clone)]
pub struct RateCache {
    inner: Arc<Mutex<HashMap<PairKey, BTreeMap<String, f64>>>>,
}

impl RateCache {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Replaces the entry for `pair` with a fresh provider->rate mapping.
    /// An empty quote list leaves an empty mapping in place, not an absent
    /// entry.
    pub async fn update(&self, pair: PairKey, quotes: &[RateQuote]) {
        let mut cache = self.inner.lock().await;
        let rates: BTreeMap<String, f64> = quotes
            .iter()
            .map(|q| (q.provider.clone(), q.rate))
            .collect();
        debug!(%pair, providers = rates.len(), "Cache UPDATE");
        cache.insert(pair, rates);
    }

    /// Empties the entry for `pair`. Used when a fetch for the pair fails or
    /// the selection is cleared.
    pub async fn clear(&self, pair: &PairKey) {
        let mut cache = self.inner.lock().await;
        debug!(%pair, "Cache CLEAR");
        cache.insert(pair.clone(), BTreeMap::new());
    }

    /// Provider->rate mapping for `pair`; empty if the pair is unknown.
    pub async fn get(&self, pair: &PairKey) -> BTreeMap<String, f64> {
        let cache = self.inner.lock().await;
        match cache.get(pair) {
            Some(rates) => {
                debug!(%pair, "Cache HIT");
                rates.clone()
            }
            None => {
                debug!(%pair, "Cache MISS");
                BTreeMap::new()
            }
        }
    }

    /// The single-provider pick used for conversion: the quote of the
    /// lexicographically-first provider name. Deterministic for a given
    /// cache state; providers are not averaged.
    pub async fn first_rate(&self, pair: &PairKey) -> Option<f64> {
        let cache = self.inner.lock().await;
        cache
            .get(pair)
            .and_then(|rates| rates.values().next().copied())
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(provider: &str, rate: f64) -> RateQuote {
        RateQuote {
            provider: provider.to_string(),
            rate,
            register_link: format!("https://{}.example.com", provider.to_lowercase()),
            last_updated: None,
        }
    }

    #[tokio::test]
    async fn test_update_and_get() {
        let cache = RateCache::new();
        let pair = PairKey::new("USD", "EUR");

        assert!(cache.get(&pair).await.is_empty());

        cache
            .update(
                pair.clone(),
                &[quote("Wise", 0.9230), quote("Revolut", 0.9255)],
            )
            .await;

        let rates = cache.get(&pair).await;
        assert_eq!(rates.len(), 2);
        assert_eq!(rates.get("Wise"), Some(&0.9230));
        assert_eq!(rates.get("Revolut"), Some(&0.9255));
    }

    #[tokio::test]
    async fn test_update_replaces_rather_than_merges() {
        let cache = RateCache::new();
        let pair = PairKey::new("USD", "EUR");

        cache.update(pair.clone(), &[quote("Wise", 0.9230)]).await;
        cache.update(pair.clone(), &[quote("Remitly", 0.9180)]).await;

        let rates = cache.get(&pair).await;
        assert_eq!(rates.len(), 1);
        assert_eq!(rates.get("Remitly"), Some(&0.9180));
        assert!(rates.get("Wise").is_none());
    }

    #[tokio::test]
    async fn test_update_with_no_quotes_leaves_empty_mapping() {
        let cache = RateCache::new();
        let pair = PairKey::new("USD", "EUR");

        cache.update(pair.clone(), &[]).await;

        assert!(cache.get(&pair).await.is_empty());
        assert!(cache.first_rate(&pair).await.is_none());
    }

    #[tokio::test]
    async fn test_clear_empties_entry() {
        let cache = RateCache::new();
        let pair = PairKey::new("USD", "EUR");

        cache.update(pair.clone(), &[quote("Wise", 0.9230)]).await;
        cache.clear(&pair).await;

        assert!(cache.get(&pair).await.is_empty());
    }

    #[tokio::test]
    async fn test_first_rate_picks_lexicographically_first_provider() {
        let cache = RateCache::new();
        let pair = PairKey::new("USD", "EUR");

        cache
            .update(
                pair.clone(),
                &[
                    quote("Wise", 0.9230),
                    quote("Remitly", 0.9180),
                    quote("Revolut", 0.9255),
                ],
            )
            .await;

        // "Remitly" < "Revolut" < "Wise"
        assert_eq!(cache.first_rate(&pair).await, Some(0.9180));
        // Stable across repeated calls for the same cache state.
        assert_eq!(cache.first_rate(&pair).await, Some(0.9180));
    }
}
