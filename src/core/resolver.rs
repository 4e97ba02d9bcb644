//! Rate resolution over the cache: direct, inverse, then bridged lookups.

use std::fmt::Display;

use crate::core::cache::RateCache;
use crate::core::error::ConvertError;
use crate::core::pair::PairKey;

/// How a usable rate was found for a conversion. Keeping the lookup shape
/// lets the arithmetic match it exactly: an inverse quote divides the amount
/// rather than multiplying by a reciprocal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateLookup {
    /// Same currency on both sides; the amount passes through unchanged.
    Identity,
    /// A cached quote for exactly the requested pair.
    Direct(f64),
    /// A cached quote for the reverse pair, applied reciprocally.
    Inverse(f64),
    /// Two direct quotes composed through the bridge currency.
    Bridged(f64, f64),
}

impl RateLookup {
    pub fn apply(&self, amount: f64) -> f64 {
        match self {
            RateLookup::Identity => amount,
            RateLookup::Direct(rate) => amount * rate,
            RateLookup::Inverse(rate) => amount / rate,
            RateLookup::Bridged(to_bridge, from_bridge) => amount * to_bridge * from_bridge,
        }
    }
}

/// Finds a usable rate for `from` -> `to`. Lookups are tried in strict
/// precedence order, first success wins:
///
/// 1. identity, regardless of cache contents;
/// 2. direct quote for `from_to`;
/// 3. inverse quote for `to_from`;
/// 4. direct quotes for `from_BRIDGE` and `BRIDGE_to` composed (no recursion
///    into inverse or bridged lookups for the two legs).
///
/// Empty currency selections are invalid input, checked before anything else.
pub async fn resolve(
    cache: &RateCache,
    from: &str,
    to: &str,
    bridge: &str,
) -> Result<RateLookup, ConvertError> {
    if from.is_empty() || to.is_empty() {
        return Err(ConvertError::InvalidInput);
    }

    let from = from.to_uppercase();
    let to = to.to_uppercase();
    if from == to {
        return Ok(RateLookup::Identity);
    }

    if let Some(rate) = cache.first_rate(&PairKey::new(&from, &to)).await {
        return Ok(RateLookup::Direct(rate));
    }

    if let Some(rate) = cache.first_rate(&PairKey::new(&to, &from)).await {
        return Ok(RateLookup::Inverse(rate));
    }

    let to_bridge = cache.first_rate(&PairKey::new(&from, bridge)).await;
    let from_bridge = cache.first_rate(&PairKey::new(bridge, &to)).await;
    if let (Some(r1), Some(r2)) = (to_bridge, from_bridge) {
        return Ok(RateLookup::Bridged(r1, r2));
    }

    Err(ConvertError::RateUnavailable { from, to })
}

/// A display-ready conversion result.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub result: f64,
}

impl Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} {}", self.result, self.to)
    }
}

/// Parses a raw amount and converts it. Non-numeric amounts and empty
/// currency selections are `InvalidInput`, distinct from `RateUnavailable`.
pub async fn convert(
    cache: &RateCache,
    raw_amount: &str,
    from: &str,
    to: &str,
    bridge: &str,
) -> Result<Conversion, ConvertError> {
    let amount: f64 = raw_amount
        .trim()
        .parse()
        .map_err(|_| ConvertError::InvalidInput)?;
    if !amount.is_finite() {
        return Err(ConvertError::InvalidInput);
    }

    let lookup = resolve(cache, from, to, bridge).await?;
    Ok(Conversion {
        amount,
        from: from.to_uppercase(),
        to: to.to_uppercase(),
        result: lookup.apply(amount),
    })
}
