//! Display currency
//!
//! The currency is a cosmetic label attached to formatted amounts. It never
//! takes part in arithmetic and no conversion is performed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported display currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Ngn,
    Eur,
    Gbp,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Self::Usd, Self::Ngn, Self::Eur, Self::Gbp];

    /// The symbol printed in front of amounts
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Ngn => "₦",
            Self::Eur => "€",
            Self::Gbp => "£",
        }
    }

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Ngn => "NGN",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }

    /// Strip one leading currency symbol, if any
    pub fn strip_symbol(s: &str) -> &str {
        Self::ALL
            .iter()
            .find_map(|c| s.strip_prefix(c.symbol()))
            .unwrap_or(s)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.symbol(), self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    /// Accepts either the symbol ("€") or the code ("eur")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.symbol() == s || c.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Unknown currency '{}'. Use one of: $, ₦, €, £ (or USD, NGN, EUR, GBP)",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbol_and_code() {
        assert_eq!("€".parse::<Currency>().unwrap(), Currency::Eur);
        assert_eq!("gbp".parse::<Currency>().unwrap(), Currency::Gbp);
        assert_eq!("₦".parse::<Currency>().unwrap(), Currency::Ngn);
        assert!("JPY".parse::<Currency>().is_err());
    }

    #[test]
    fn test_strip_symbol() {
        assert_eq!(Currency::strip_symbol("£12.00"), "12.00");
        assert_eq!(Currency::strip_symbol("12.00"), "12.00");
    }

    #[test]
    fn test_display() {
        assert_eq!(Currency::Usd.to_string(), "$ (USD)");
    }
}
