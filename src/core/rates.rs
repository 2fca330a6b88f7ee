//! Static exchange-rate table keyed by ordered currency pair.
//!
//! Rates are not required to be symmetric: `EUR-USD` and `USD-EUR` are
//! independent entries and are kept exactly as entered.

use crate::core::currency::CurrencyCode;
use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use tracing::debug;

const DEFAULT_RATES: [(CurrencyCode, CurrencyCode, f64); 20] = {
    use crate::core::currency::CurrencyCode::*;
    [
        (Eur, Usd, 1.08),
        (Usd, Eur, 0.93),
        (Eur, Gbp, 0.86),
        (Gbp, Eur, 1.16),
        (Eur, Myr, 5.12),
        (Myr, Eur, 0.20),
        (Eur, Cad, 1.47),
        (Cad, Eur, 0.68),
        (Usd, Gbp, 0.79),
        (Gbp, Usd, 1.26),
        (Usd, Myr, 4.74),
        (Myr, Usd, 0.21),
        (Usd, Cad, 1.36),
        (Cad, Usd, 0.74),
        (Gbp, Myr, 6.00),
        (Myr, Gbp, 0.17),
        (Gbp, Cad, 1.72),
        (Cad, Gbp, 0.58),
        (Myr, Cad, 0.29),
        (Cad, Myr, 3.45),
    ]
};

/// Mapping from `(from, to)` to the multiplier applied on conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: HashMap<(CurrencyCode, CurrencyCode), f64>,
}

impl RateTable {
    /// An empty table. Every lookup misses.
    pub fn empty() -> Self {
        Self {
            rates: HashMap::new(),
        }
    }

    pub fn get(&self, from: CurrencyCode, to: CurrencyCode) -> Option<f64> {
        self.rates.get(&(from, to)).copied()
    }

    /// Inserts or replaces a rate. Rates must be finite and positive.
    pub fn insert(&mut self, from: CurrencyCode, to: CurrencyCode, rate: f64) -> Result<()> {
        if !rate.is_finite() || rate <= 0.0 {
            bail!("Exchange rate for {from}-{to} must be positive, got {rate}");
        }
        debug!("Rate table set {}-{} = {}", from, to, rate);
        self.rates.insert((from, to), rate);
        Ok(())
    }

    /// Applies `"FROM-TO" -> rate` entries on top of this table.
    pub fn extend_from_pairs<'a, I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        for (key, rate) in pairs {
            let (from, to) = parse_pair_key(key)?;
            self.insert(from, to, *rate)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Entries sorted by `(from, to)`.
    pub fn entries(&self) -> Vec<(CurrencyCode, CurrencyCode, f64)> {
        let mut entries: Vec<_> = self
            .rates
            .iter()
            .map(|(&(from, to), &rate)| (from, to, rate))
            .collect();
        entries.sort_by_key(|&(from, to, _)| (from, to));
        entries
    }
}

impl Default for RateTable {
    fn default() -> Self {
        let rates = DEFAULT_RATES
            .iter()
            .map(|&(from, to, rate)| ((from, to), rate))
            .collect();
        Self { rates }
    }
}

/// Parses a rate key of the form `EUR-USD`.
pub fn parse_pair_key(key: &str) -> Result<(CurrencyCode, CurrencyCode)> {
    let (from, to) = key
        .split_once('-')
        .with_context(|| format!("Invalid rate key '{key}', expected FROM-TO"))?;
    let from = from
        .parse::<CurrencyCode>()
        .with_context(|| format!("Invalid rate key '{key}'"))?;
    let to = to
        .parse::<CurrencyCode>()
        .with_context(|| format!("Invalid rate key '{key}'"))?;
    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::CurrencyCode::*;

    #[test]
    fn test_default_table_has_every_distinct_pair() {
        let table = RateTable::default();
        assert_eq!(table.len(), 20);
        for from in CurrencyCode::ALL {
            for to in CurrencyCode::ALL {
                if from != to {
                    assert!(table.get(from, to).is_some(), "missing {from}-{to}");
                } else {
                    assert!(table.get(from, to).is_none());
                }
            }
        }
    }

    #[test]
    fn test_default_table_keeps_asymmetric_rates() {
        let table = RateTable::default();
        assert_eq!(table.get(Eur, Usd), Some(1.08));
        assert_eq!(table.get(Usd, Eur), Some(0.93));
        assert_eq!(table.get(Myr, Eur), Some(0.20));
        assert_ne!(table.get(Eur, Usd).unwrap() * table.get(Usd, Eur).unwrap(), 1.0);
    }

    #[test]
    fn test_insert_rejects_non_positive_rates() {
        let mut table = RateTable::empty();
        assert!(table.insert(Eur, Usd, 0.0).is_err());
        assert!(table.insert(Eur, Usd, -1.2).is_err());
        assert!(table.insert(Eur, Usd, f64::NAN).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_extend_from_pairs_overrides_defaults() {
        let mut table = RateTable::default();
        let overrides: HashMap<String, f64> = [("EUR-USD".to_string(), 1.10)].into();
        table.extend_from_pairs(&overrides).unwrap();
        assert_eq!(table.get(Eur, Usd), Some(1.10));
        assert_eq!(table.get(Usd, Eur), Some(0.93));
    }

    #[test]
    fn test_parse_pair_key() {
        assert_eq!(parse_pair_key("gbp-cad").unwrap(), (Gbp, Cad));
        assert!(parse_pair_key("EURUSD").is_err());
        assert!(parse_pair_key("EUR-XYZ").is_err());
    }

    #[test]
    fn test_entries_are_sorted() {
        let entries = RateTable::default().entries();
        assert_eq!(entries[0], (Eur, Usd, 1.08));
        assert_eq!(entries.len(), 20);
    }
}
