//! Free-text stock-name resolution
//!
//! Maps whatever the user typed ("Reliance", "hdfc bank", "INFY.NS") to an
//! exchange-qualified [`TickerSymbol`]. Resolution runs a fixed fallback
//! chain, first success wins:
//!
//! 1. Input already exchange-qualified: pass through upper-cased.
//! 2. Exact alias-table lookup on the normalized input.
//! 3. Substring match against the alias table, in table order.
//! 4. Web-search fallback, scanning result titles and snippets for an
//!    NSE-suffixed token.
//!
//! Only step 4 touches the network, and all of its failures degrade to
//! "not found".

use crate::symbol::{BSE_SUFFIX, NSE_SUFFIX, TickerSymbol};
use async_trait::async_trait;
use dalal_intel::SearchResponse;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

/// Results requested from the symbol-search fallback
const SYMBOL_SEARCH_RESULTS: usize = 5;

/// NSE-suffixed token pattern scanned for in search results
static SYMBOL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+\.NS").expect("symbol pattern is valid"));

/// Web-search hook used by the resolver's last-resort fallback
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SymbolSearch: Send + Sync {
    /// Run one web search; any failure degrades to `None`
    async fn search_symbol(&self, query: &str) -> Option<SearchResponse>;
}

#[async_trait]
impl SymbolSearch for dalal_intel::SerperClient {
    async fn search_symbol(&self, query: &str) -> Option<SearchResponse> {
        match self.search(query, SYMBOL_SEARCH_RESULTS).await {
            Ok(response) => Some(response),
            Err(e) => {
                warn!("Symbol search failed: {e}");
                None
            }
        }
    }
}

/// Ordered alias table mapping normalized company names to symbols
///
/// Keys are lower-cased and trimmed; several keys may map to the same
/// symbol (abbreviations, brand names). The table is built once at startup
/// and iterated in insertion order, which makes the substring tie-break in
/// [`SymbolResolver::resolve`] deterministic.
pub struct AliasTable {
    entries: Vec<(String, TickerSymbol)>,
}

impl AliasTable {
    /// Build a table from (alias, symbol) pairs, normalizing the aliases
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(alias, symbol)| {
                (
                    alias.as_ref().trim().to_lowercase(),
                    TickerSymbol::from_resolved(symbol.into().to_uppercase()),
                )
            })
            .collect();
        Self { entries }
    }

    /// The built-in table of major Indian listings
    pub fn standard() -> Self {
        Self::new([
            ("reliance", "RELIANCE.NS"),
            ("reliance industries", "RELIANCE.NS"),
            ("ril", "RELIANCE.NS"),
            ("tcs", "TCS.NS"),
            ("tata consultancy", "TCS.NS"),
            ("tata consultancy services", "TCS.NS"),
            ("hdfc bank", "HDFCBANK.NS"),
            ("hdfc", "HDFCBANK.NS"),
            ("infosys", "INFY.NS"),
            ("icici bank", "ICICIBANK.NS"),
            ("icici", "ICICIBANK.NS"),
            ("hul", "HINDUNILVR.NS"),
            ("hindustan unilever", "HINDUNILVR.NS"),
            ("sbi", "SBIN.NS"),
            ("state bank of india", "SBIN.NS"),
            ("bharti airtel", "BHARTIARTL.NS"),
            ("airtel", "BHARTIARTL.NS"),
            ("bajaj finance", "BAJFINANCE.NS"),
            ("bajaj", "BAJFINANCE.NS"),
            ("lt", "LT.NS"),
            ("larsen toubro", "LT.NS"),
            ("larsen", "LT.NS"),
            ("itc", "ITC.NS"),
            ("axis bank", "AXISBANK.NS"),
            ("axis", "AXISBANK.NS"),
            ("asian paints", "ASIANPAINT.NS"),
            ("maruti", "MARUTI.NS"),
            ("maruti suzuki", "MARUTI.NS"),
            ("wipro", "WIPRO.NS"),
            ("ultra tech", "ULTRACEMCO.NS"),
            ("ultratech cement", "ULTRACEMCO.NS"),
            ("nestle", "NESTLEIND.NS"),
            ("nestle india", "NESTLEIND.NS"),
            ("titan", "TITAN.NS"),
            ("sun pharma", "SUNPHARMA.NS"),
            ("sun pharmaceutical", "SUNPHARMA.NS"),
            ("hindalco", "HINDALCO.NS"),
            ("jsw steel", "JSWSTEEL.NS"),
            ("tata steel", "TATASTEEL.NS"),
            ("adani ports", "ADANIPORTS.NS"),
            ("adani", "ADANIPORTS.NS"),
            ("power grid", "POWERGRID.NS"),
            ("ntpc", "NTPC.NS"),
            ("coal india", "COALINDIA.NS"),
            ("ongc", "ONGC.NS"),
            ("oil and natural gas", "ONGC.NS"),
            ("indian oil", "IOC.NS"),
            ("ioc", "IOC.NS"),
            ("gail", "GAIL.NS"),
            ("vedanta", "VEDL.NS"),
            ("jindal steel", "JINDALSTEL.NS"),
            ("tata motors", "TATAMOTORS.NS"),
            ("mahindra", "M&M.NS"),
            ("mahindra and mahindra", "M&M.NS"),
            ("eicher motors", "EICHERMOT.NS"),
            ("royal enfield", "EICHERMOT.NS"),
            ("hero motocorp", "HEROMOTOCO.NS"),
            ("hero", "HEROMOTOCO.NS"),
            ("bajaj auto", "BAJAJ-AUTO.NS"),
            ("dr reddy", "DRREDDY.NS"),
            ("dr reddys", "DRREDDY.NS"),
            ("cipla", "CIPLA.NS"),
            ("lupin", "LUPIN.NS"),
            ("divis labs", "DIVISLAB.NS"),
            ("zomato", "ZOMATO.NS"),
            ("paytm", "PAYTM.NS"),
            ("nykaa", "NYKAA.NS"),
            ("policybazaar", "PBFINTECH.NS"),
            ("delhivery", "DELHIVERY.NS"),
        ])
    }

    /// Exact lookup on an already-normalized key
    fn exact(&self, normalized: &str) -> Option<&TickerSymbol> {
        self.entries
            .iter()
            .find(|(alias, _)| alias == normalized)
            .map(|(_, symbol)| symbol)
    }

    /// First entry, in table order, whose alias contains the input or is
    /// contained in it
    fn substring(&self, normalized: &str) -> Option<&TickerSymbol> {
        self.entries
            .iter()
            .find(|(alias, _)| alias.contains(normalized) || normalized.contains(alias.as_str()))
            .map(|(_, symbol)| symbol)
    }

    /// Number of alias entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves free-text company names to exchange-qualified symbols
pub struct SymbolResolver {
    aliases: AliasTable,
    search: Option<Arc<dyn SymbolSearch>>,
}

impl SymbolResolver {
    /// Create a resolver over the given alias table, without a search
    /// fallback
    pub fn new(aliases: AliasTable) -> Self {
        Self {
            aliases,
            search: None,
        }
    }

    /// Attach the web-search fallback
    pub fn with_search(mut self, search: Arc<dyn SymbolSearch>) -> Self {
        self.search = Some(search);
        self
    }

    /// Resolve free text to a symbol, or `None` when every step fails
    pub async fn resolve(&self, raw: &str) -> Option<TickerSymbol> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        // Already exchange-qualified: treat as resolved
        let upper = trimmed.to_uppercase();
        if upper.contains(NSE_SUFFIX) || upper.contains(BSE_SUFFIX) {
            return Some(TickerSymbol::from_resolved(upper));
        }

        let normalized = trimmed.to_lowercase();
        if let Some(symbol) = self.aliases.exact(&normalized) {
            return Some(symbol.clone());
        }
        if let Some(symbol) = self.aliases.substring(&normalized) {
            debug!("Resolved '{raw}' to {symbol} via substring match");
            return Some(symbol.clone());
        }

        self.search_fallback(trimmed).await
    }

    /// Last resort: ask the web for the symbol and scan the results
    async fn search_fallback(&self, input: &str) -> Option<TickerSymbol> {
        let search = self.search.as_ref()?;
        let query = format!("{input} stock symbol NSE BSE India");
        let response = search.search_symbol(&query).await?;

        for result in &response.organic {
            let haystack = format!("{} {}", result.title, result.snippet).to_uppercase();
            if let Some(found) = SYMBOL_PATTERN.find(&haystack) {
                debug!("Resolved '{input}' to {} via web search", found.as_str());
                return Some(TickerSymbol::from_resolved(found.as_str().to_string()));
            }
        }
        None
    }
}
