//! Canonical pair identifier.
//!
//! A pair is two distinct tradable symbols traded jointly as a spread.
//! Construction canonicalizes by lexical order of the symbol ids, so
//! `Pair::new("MSFT", "AAPL")` and `Pair::new("AAPL", "MSFT")` are the same
//! key. Every per-pair map in the engine is keyed by `Pair`, and the derived
//! `Ord` on the canonical form is the deterministic processing order used
//! wherever capital is contended.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pair {
    first: String,
    second: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PairError {
    #[error("pair must name two distinct symbols, got {0:?} twice")]
    DegenerateSymbols(String),

    #[error("malformed pair label {0:?}, expected \"A/B\"")]
    MalformedLabel(String),
}

impl Pair {
    /// Build a canonical pair from two symbols in either order.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Result<Self, PairError> {
        let a = a.into();
        let b = b.into();
        if a == b {
            return Err(PairError::DegenerateSymbols(a));
        }
        if a < b {
            Ok(Self { first: a, second: b })
        } else {
            Ok(Self { first: b, second: a })
        }
    }

    /// Parse a `"A/B"` label as produced by [`Pair::label`].
    pub fn from_label(label: &str) -> Result<Self, PairError> {
        match label.split_once('/') {
            Some((a, b)) if !a.is_empty() && !b.is_empty() => Self::new(a, b),
            _ => Err(PairError::MalformedLabel(label.to_string())),
        }
    }

    /// First symbol in canonical order. The spread is `price(first) - price(second)`.
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Second symbol in canonical order.
    pub fn second(&self) -> &str {
        &self.second
    }

    /// Human-readable `"A/B"` form, also used as report keys.
    pub fn label(&self) -> String {
        format!("{}/{}", self.first, self.second)
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_order_does_not_matter() {
        let ab = Pair::new("MSFT", "AAPL").unwrap();
        let ba = Pair::new("AAPL", "MSFT").unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.first(), "AAPL");
        assert_eq!(ab.second(), "MSFT");
    }

    #[test]
    fn same_symbol_rejected() {
        assert!(matches!(
            Pair::new("SPY", "SPY"),
            Err(PairError::DegenerateSymbols(_))
        ));
    }

    #[test]
    fn label_roundtrip() {
        let pair = Pair::new("KO", "PEP").unwrap();
        assert_eq!(pair.label(), "KO/PEP");
        assert_eq!(Pair::from_label("KO/PEP").unwrap(), pair);
        assert_eq!(Pair::from_label("PEP/KO").unwrap(), pair);
    }

    #[test]
    fn malformed_label_rejected() {
        assert!(Pair::from_label("KOPEP").is_err());
        assert!(Pair::from_label("/PEP").is_err());
        assert!(Pair::from_label("KO/").is_err());
    }

    #[test]
    fn ordering_is_lexical_on_canonical_form() {
        let a = Pair::new("AAPL", "MSFT").unwrap();
        let b = Pair::new("GOOG", "AAPL").unwrap(); // canonical AAPL/GOOG
        assert!(b < a);
    }
}
