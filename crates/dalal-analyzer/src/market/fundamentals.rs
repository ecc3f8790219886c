//! Company fundamentals from the Yahoo quoteSummary endpoint
//!
//! The endpoint returns one object per requested module; numeric values
//! arrive as `{"raw": 1234.5, "fmt": "1,234.50"}` pairs. Modules are
//! flattened into a single field map keyed the way the provider names the
//! fields (`marketCap`, `trailingPE`, `sector`, ...). Every field is
//! optional; accessors default.

use crate::error::{AnalyzerError, Result};
use serde_json::{Map, Value};
use std::time::Duration;

const QUOTE_SUMMARY_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";

/// Modules covering the descriptive, valuation and profile fields the
/// pipeline reads
const MODULES: &str = "price,summaryDetail,defaultKeyStatistics,assetProfile,financialData";

/// Yahoo rejects requests without a browser-looking user agent
const USER_AGENT: &str = "Mozilla/5.0";

/// Flat snapshot of descriptive and valuation fields for one company
#[derive(Debug, Clone, Default)]
pub struct Fundamentals {
    fields: Map<String, Value>,
}

impl Fundamentals {
    /// The empty snapshot, used when the provider fails
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an already-flat field map
    pub fn from_flat(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Flatten a quoteSummary result object into one field map
    ///
    /// Later modules overwrite earlier ones on key collisions, matching how
    /// the provider's own merged "info" view behaves.
    pub fn from_modules(result: &Value) -> Self {
        let mut fields = Map::new();

        if let Some(modules) = result.as_object() {
            for module in modules.values() {
                let Some(module) = module.as_object() else {
                    continue;
                };
                for (key, value) in module {
                    if let Some(flat) = flatten_value(value) {
                        fields.insert(key.clone(), flat);
                    }
                }
            }
        }

        Self { fields }
    }

    /// Numeric field, `None` when absent or not a number
    pub fn number(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    /// Text field, `None` when absent or not a string
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// True when the provider contributed nothing
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Reduce one provider value to a scalar, extracting `raw` from
/// `{raw, fmt}` pairs; nested structures without a `raw` are dropped
fn flatten_value(value: &Value) -> Option<Value> {
    match value {
        Value::Object(object) => object.get("raw").cloned(),
        Value::String(_) | Value::Number(_) | Value::Bool(_) => Some(value.clone()),
        Value::Null | Value::Array(_) => None,
    }
}

/// Client for the quoteSummary endpoint
pub struct FundamentalsClient {
    client: reqwest::Client,
}

impl FundamentalsClient {
    /// Create a new client with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch and flatten the fundamentals for one symbol
    pub async fn fetch(&self, symbol: &str) -> Result<Fundamentals> {
        let url = format!("{QUOTE_SUMMARY_URL}/{symbol}?modules={MODULES}");
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(AnalyzerError::MarketData(format!(
                "quoteSummary returned HTTP {} for {symbol}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        let result = body
            .pointer("/quoteSummary/result/0")
            .ok_or_else(|| {
                AnalyzerError::MarketData(format!("quoteSummary response missing result for {symbol}"))
            })?;

        Ok(Fundamentals::from_modules(result))
    }
}
