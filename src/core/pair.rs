//! Currency pair keys and currency set derivation

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// An ordered currency pair, serialized as `BASE_QUOTE` and read as
/// "1 BASE = rate QUOTE".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PairKey {
    base: String,
    quote: String,
}

impl PairKey {
    pub fn new(base: &str, quote: &str) -> Self {
        PairKey {
            base: base.to_uppercase(),
            quote: quote.to_uppercase(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// The same pair with base and quote swapped.
    pub fn inverse(&self) -> Self {
        PairKey {
            base: self.quote.clone(),
            quote: self.base.clone(),
        }
    }

    /// Human-readable form, e.g. "USD/EUR".
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.base, self.quote)
    }
}

impl Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.base, self.quote)
    }
}

impl FromStr for PairKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .split_once('_')
            .ok_or_else(|| anyhow!("Invalid currency pair key: {s}"))?;
        if base.is_empty() || quote.is_empty() {
            return Err(anyhow!("Invalid currency pair key: {s}"));
        }
        Ok(PairKey::new(base, quote))
    }
}

impl TryFrom<String> for PairKey {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PairKey> for String {
    fn from(pair: PairKey) -> String {
        pair.to_string()
    }
}

/// Decomposes pair keys into the set of distinct currencies, preserving the
/// order of first appearance for stable default selections.
pub fn currencies_from_pairs(pairs: &[PairKey]) -> Vec<String> {
    let mut currencies: Vec<String> = Vec::new();
    for pair in pairs {
        for code in [pair.base(), pair.quote()] {
            if !currencies.iter().any(|c| c == code) {
                currencies.push(code.to_string());
            }
        }
    }
    currencies
}
