//! Totals over ledger entries and the text formats used to show them.

use crate::core::currency::CurrencyCode;

/// Sum and number of the entries that contributed to it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgerTotals {
    pub total: f64,
    pub count: usize,
}

pub fn sum(amounts: &[f64]) -> f64 {
    amounts.iter().sum()
}

/// Parses the string-encoded entries of a ledger feed and totals them.
/// Entries that are not finite numbers are left out of both total and count.
pub fn aggregate<S: AsRef<str>>(values: &[S]) -> LedgerTotals {
    let amounts: Vec<f64> = values
        .iter()
        .filter_map(|v| v.as_ref().trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect();
    LedgerTotals {
        total: sum(&amounts),
        count: amounts.len(),
    }
}

/// Two-decimal rendering used for display and for persisted entries.
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

pub fn format_conversion(
    amount: f64,
    from: CurrencyCode,
    converted: f64,
    to: CurrencyCode,
) -> String {
    format!("{amount:.2} {from} = {converted:.2} {to}")
}

pub fn format_rate(from: CurrencyCode, rate: f64, to: CurrencyCode) -> String {
    format!("Rate: 1 {from} = {rate:.4} {to}")
}
