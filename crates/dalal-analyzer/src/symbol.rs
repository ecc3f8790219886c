//! Exchange-qualified ticker symbols

use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// National Stock Exchange suffix
pub const NSE_SUFFIX: &str = ".NS";

/// Bombay Stock Exchange suffix
pub const BSE_SUFFIX: &str = ".BO";

/// An exchange-qualified NSE/BSE ticker symbol
///
/// Always upper-case and always carries an exchange suffix; unqualified
/// identifiers are invalid at this boundary and rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickerSymbol(String);

impl TickerSymbol {
    /// Parse an exchange-qualified identifier, upper-casing it
    pub fn parse(raw: &str) -> Result<Self> {
        let candidate = raw.trim().to_uppercase();
        if candidate.contains(NSE_SUFFIX) || candidate.contains(BSE_SUFFIX) {
            Ok(Self(candidate))
        } else {
            Err(AnalyzerError::InvalidSymbol(raw.to_string()))
        }
    }

    /// Wrap a string whose exchange qualification was already verified
    pub(crate) fn from_resolved(symbol: String) -> Self {
        debug_assert!(symbol.contains(NSE_SUFFIX) || symbol.contains(BSE_SUFFIX));
        Self(symbol)
    }

    /// The full symbol, e.g. "RELIANCE.NS"
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The symbol without its exchange suffix, e.g. "RELIANCE"
    pub fn base(&self) -> &str {
        self.0
            .rsplit_once('.')
            .map_or(self.0.as_str(), |(base, _)| base)
    }
}

impl fmt::Display for TickerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upper_cases() {
        let symbol = TickerSymbol::parse("reliance.ns").unwrap();
        assert_eq!(symbol.as_str(), "RELIANCE.NS");
    }

    #[test]
    fn test_parse_trims() {
        let symbol = TickerSymbol::parse("  TCS.NS  ").unwrap();
        assert_eq!(symbol.as_str(), "TCS.NS");
    }

    #[test]
    fn test_parse_accepts_bse() {
        let symbol = TickerSymbol::parse("500325.BO").unwrap();
        assert_eq!(symbol.as_str(), "500325.BO");
    }

    #[test]
    fn test_parse_rejects_unqualified() {
        assert!(TickerSymbol::parse("RELIANCE").is_err());
        assert!(TickerSymbol::parse("").is_err());
    }

    #[test]
    fn test_base_strips_suffix() {
        let symbol = TickerSymbol::parse("BAJAJ-AUTO.NS").unwrap();
        assert_eq!(symbol.base(), "BAJAJ-AUTO");
    }

    #[test]
    fn test_display() {
        let symbol = TickerSymbol::parse("ITC.NS").unwrap();
        assert_eq!(symbol.to_string(), "ITC.NS");
    }
}
