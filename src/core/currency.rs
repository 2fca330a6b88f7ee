//! Supported currency codes

use crate::core::input::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Eur,
    Usd,
    Gbp,
    Myr,
    Cad,
}

impl CurrencyCode {
    /// All supported currencies, in display order.
    pub const ALL: [CurrencyCode; 5] = [
        CurrencyCode::Eur,
        CurrencyCode::Usd,
        CurrencyCode::Gbp,
        CurrencyCode::Myr,
        CurrencyCode::Cad,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Usd => "USD",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Myr => "MYR",
            CurrencyCode::Cad => "CAD",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EUR" => Ok(CurrencyCode::Eur),
            "USD" => Ok(CurrencyCode::Usd),
            "GBP" => Ok(CurrencyCode::Gbp),
            "MYR" => Ok(CurrencyCode::Myr),
            "CAD" => Ok(CurrencyCode::Cad),
            _ => Err(InputError::UnknownCurrency(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("eur".parse::<CurrencyCode>().unwrap(), CurrencyCode::Eur);
        assert_eq!(" Usd ".parse::<CurrencyCode>().unwrap(), CurrencyCode::Usd);
        assert_eq!("MYR".parse::<CurrencyCode>().unwrap(), CurrencyCode::Myr);
    }

    #[test]
    fn test_parse_unknown_currency() {
        let err = "JPY".parse::<CurrencyCode>().unwrap_err();
        assert!(matches!(err, InputError::UnknownCurrency(ref c) if c == "JPY"));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for code in CurrencyCode::ALL {
            assert_eq!(code.to_string().parse::<CurrencyCode>().unwrap(), code);
        }
    }

    #[test]
    fn test_serde_uses_uppercase_codes() {
        let yaml = serde_yaml::to_string(&CurrencyCode::Gbp).unwrap();
        assert_eq!(yaml.trim(), "GBP");
        let code: CurrencyCode = serde_yaml::from_str("CAD").unwrap();
        assert_eq!(code, CurrencyCode::Cad);
    }
}
