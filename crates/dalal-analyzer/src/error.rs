//! Error types for the analysis pipeline

use thiserror::Error;

/// Pipeline-specific errors
///
/// Only [`AnalyzerError::SymbolNotFound`] and [`AnalyzerError::NoData`] stop
/// a query; they are expected, user-recoverable conditions. Every other
/// external failure is converted to an empty value or an in-band string at
/// the component boundary and never reaches the top of the pipeline.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Free-text input did not resolve to any NSE/BSE symbol
    #[error("could not resolve '{0}' to an NSE/BSE symbol")]
    SymbolNotFound(String),

    /// Both price history and fundamentals came back empty
    #[error("no market data available for {0}")]
    NoData(String),

    /// Identifier is not exchange-qualified
    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Market data provider error
    #[error("market data error: {0}")]
    MarketData(String),

    /// Network or HTTP error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Prompt template rendering error
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(#[from] dalal_llm::LLMError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalyzerError::SymbolNotFound("foo bar".to_string());
        assert_eq!(
            err.to_string(),
            "could not resolve 'foo bar' to an NSE/BSE symbol"
        );

        let err = AnalyzerError::NoData("RELIANCE.NS".to_string());
        assert_eq!(err.to_string(), "no market data available for RELIANCE.NS");
    }
}
