//! Currency conversion over a [`RateTable`].

use crate::core::currency::CurrencyCode;
use crate::core::rates::RateTable;
use tracing::debug;

/// Currency every ledger entry is expressed in unless configured otherwise.
pub const REFERENCE_CURRENCY: CurrencyCode = CurrencyCode::Eur;

/// Multiplier used when a pair is missing from the table.
const FALLBACK_RATE: f64 = 1.0;

#[derive(Debug, Clone, Default)]
pub struct Converter {
    rates: RateTable,
}

impl Converter {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Rate applied for `from -> to`. Identical currencies map to 1.0 and
    /// missing pairs fall back to 1.0.
    pub fn rate(&self, from: CurrencyCode, to: CurrencyCode) -> f64 {
        if from == to {
            return 1.0;
        }
        self.rates.get(from, to).unwrap_or_else(|| {
            debug!("No rate for {}-{}, using {}", from, to, FALLBACK_RATE);
            FALLBACK_RATE
        })
    }

    /// Converts `amount` from one currency to another. No rounding is applied.
    pub fn convert(&self, amount: f64, from: CurrencyCode, to: CurrencyCode) -> f64 {
        if from == to {
            return amount;
        }
        amount * self.rate(from, to)
    }
}

/// Converts amounts into a single reference currency before they are stored.
#[derive(Debug, Clone)]
pub struct Normalizer {
    converter: Converter,
    reference: CurrencyCode,
}

impl Normalizer {
    pub fn new(converter: Converter, reference: CurrencyCode) -> Self {
        Self {
            converter,
            reference,
        }
    }

    pub fn reference(&self) -> CurrencyCode {
        self.reference
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    pub fn to_reference(&self, amount: f64, from: CurrencyCode) -> f64 {
        if from == self.reference {
            return amount;
        }
        self.converter.convert(amount, from, self.reference)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Converter::default(), REFERENCE_CURRENCY)
    }
}
