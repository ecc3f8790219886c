//! User prompt templates
//!
//! Prompt construction is pure: the numeric fields are pre-formatted into
//! strings, news and search snippets are bounded and truncated, and the
//! same inputs always render the same text.

use crate::error::Result;
use crate::indicators::IndicatorSet;
use crate::market::Fundamentals;
use crate::symbol::TickerSymbol;
use dalal_intel::WebIntelligence;
use minijinja::Environment;
use serde_json::json;

use super::group_thousands;

/// News headlines included in the analysis prompt
const PROMPT_NEWS_LIMIT: usize = 10;

/// Search results included in the analysis prompt
const PROMPT_SEARCH_LIMIT: usize = 5;

/// Snippets are cut to this many characters
const SNIPPET_LIMIT: usize = 100;

const ANALYSIS_TEMPLATE: &str = r"Analyze the Indian stock {{ symbol }} ({{ company }}) with the following comprehensive information:

PRICE DATA:
Current Price: ₹{{ current_price }}
Previous Close: ₹{{ previous_close }}
Change: ₹{{ change }} ({{ percent_change }}%)
52 Week High: ₹{{ high_52w }}
52 Week Low: ₹{{ low_52w }}
SMA 20: ₹{{ sma_20 }}
SMA 50: ₹{{ sma_50 }}
Volume: {{ volume }}
Average Volume (20d): {{ average_volume }}

COMPANY INFORMATION:
- Sector: {{ sector }}
- Industry: {{ industry }}
- Market Cap: {{ market_cap }}
- P/E Ratio: {{ pe_ratio }}
- Book Value: {{ book_value }}
- Dividend Yield: {{ dividend_yield }}
- Beta: {{ beta }}

RECENT NEWS & INFORMATION:
{% if news %}{% for item in news %}- {{ item.title }}: {{ item.snippet }}
{% endfor %}{% else %}No recent news available
{% endif %}
MARKET INTELLIGENCE:
{% if info %}{% for item in info %}- {{ item.title }}: {{ item.snippet }}
{% endfor %}{% else %}No additional information available
{% endif %}
Provide a comprehensive analysis including:
1. **Executive Summary** - Brief overview of the stock
2. **Technical Analysis** - Price action, support/resistance, indicators
3. **Fundamental Analysis** - Financial health, valuation metrics
4. **Market Sentiment** - Based on news and market data
5. **Trading Recommendation** - Buy/Hold/Sell with reasoning
6. **Price Targets** - Short-term and medium-term targets
7. **Risk Assessment** - Key risks and concerns
8. **Investment Strategy** - Best approach for this stock

Format the analysis clearly with sections and actionable insights. Focus on Indian market context.";

const TOP_PICKS_TEMPLATE: &str = r"Based on current Indian market conditions (NSE/BSE), analyze these popular stocks: {{ symbols }}

Provide your top 5 best Indian stock picks for today with:
1. Stock symbol and company name
2. Current price range
3. Brief reason (2-3 sentences)
4. Expected price movement direction (Up/Down/Sideways)
5. Risk level (Low/Medium/High)
6. Entry strategy

Format as a numbered list with clear sections.";

/// Render the single-stock analysis prompt
pub fn build_analysis_prompt(
    symbol: &TickerSymbol,
    company: &str,
    indicators: &IndicatorSet,
    fundamentals: &Fundamentals,
    intel: &WebIntelligence,
) -> Result<String> {
    let news: Vec<_> = intel
        .news
        .iter()
        .take(PROMPT_NEWS_LIMIT)
        .map(|item| {
            json!({
                "title": item.title,
                "snippet": truncate_chars(&item.snippet, SNIPPET_LIMIT),
            })
        })
        .collect();

    let info: Vec<_> = intel
        .search_results
        .iter()
        .take(PROMPT_SEARCH_LIMIT)
        .map(|item| {
            json!({
                "title": item.title,
                "snippet": truncate_chars(&item.snippet, SNIPPET_LIMIT),
            })
        })
        .collect();

    let context = json!({
        "symbol": symbol.as_str(),
        "company": company,
        "current_price": format!("{:.2}", indicators.current_price),
        "previous_close": format!("{:.2}", indicators.previous_close),
        "change": format!("{:.2}", indicators.change),
        "percent_change": format!("{:+.2}", indicators.percent_change),
        "high_52w": format!("{:.2}", indicators.high_52w),
        "low_52w": format!("{:.2}", indicators.low_52w),
        "sma_20": format!("{:.2}", indicators.sma_20),
        "sma_50": format!("{:.2}", indicators.sma_50),
        "volume": group_thousands(indicators.volume),
        "average_volume": group_thousands(indicators.average_volume_20),
        "sector": text_or_na(fundamentals, "sector"),
        "industry": text_or_na(fundamentals, "industry"),
        "market_cap": market_cap_crore(fundamentals),
        "pe_ratio": number_or_na(fundamentals, "trailingPE"),
        "book_value": rupees_or_na(fundamentals, "bookValue"),
        "dividend_yield": dividend_yield_percent(fundamentals),
        "beta": number_or_na(fundamentals, "beta"),
        "news": news,
        "info": info,
    });

    let env = Environment::new();
    Ok(env.render_str(ANALYSIS_TEMPLATE, &context)?)
}

/// Render the top-picks recommendation prompt over a candidate list
pub fn build_top_picks_prompt(candidates: &[&str]) -> Result<String> {
    let env = Environment::new();
    Ok(env.render_str(
        TOP_PICKS_TEMPLATE,
        json!({ "symbols": candidates.join(", ") }),
    )?)
}

/// Cut a snippet to at most `max` characters
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn text_or_na(fundamentals: &Fundamentals, key: &str) -> String {
    fundamentals
        .text(key)
        .map_or_else(|| "N/A".to_string(), str::to_string)
}

fn number_or_na(fundamentals: &Fundamentals, key: &str) -> String {
    fundamentals
        .number(key)
        .map_or_else(|| "N/A".to_string(), |value| format!("{value:.2}"))
}

fn rupees_or_na(fundamentals: &Fundamentals, key: &str) -> String {
    fundamentals
        .number(key)
        .map_or_else(|| "N/A".to_string(), |value| format!("₹{value:.2}"))
}

/// Market cap in crore units (1 crore = 1e7)
fn market_cap_crore(fundamentals: &Fundamentals) -> String {
    fundamentals
        .number("marketCap")
        .map_or_else(|| "N/A".to_string(), |value| {
            format!("₹{:.2} Cr", value / 1e7)
        })
}

/// Provider reports dividend yield as a fraction; render as a percentage
fn dividend_yield_percent(fundamentals: &Fundamentals) -> String {
    fundamentals
        .number("dividendYield")
        .map_or_else(|| "N/A".to_string(), |value| {
            format!("{:.2}%", value * 100.0)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dalal_intel::{NewsItem, SearchResult};
    use serde_json::Map;

    fn symbol() -> TickerSymbol {
        TickerSymbol::parse("RELIANCE.NS").unwrap()
    }

    fn indicators() -> IndicatorSet {
        IndicatorSet {
            current_price: 2856.75,
            previous_close: 2840.0,
            change: 16.75,
            percent_change: 0.5897887323943662,
            sma_20: 2810.4,
            sma_50: 2795.1,
            high_52w: 3024.9,
            low_52w: 2221.05,
            volume: 7_850_000.0,
            average_volume_20: 6_900_000.0,
            volatility: 1.23,
        }
    }

    fn fundamentals() -> Fundamentals {
        let value = serde_json::json!({
            "sector": "Energy",
            "industry": "Oil & Gas Refining",
            "marketCap": 19_330_000_000_000.0_f64,
            "trailingPE": 27.4,
            "bookValue": 1_171.2,
            "dividendYield": 0.0035,
            "beta": 1.05,
        });
        match value {
            serde_json::Value::Object(map) => Fundamentals::from_flat(map),
            _ => unreachable!(),
        }
    }

    fn intel(news_count: usize, search_count: usize) -> WebIntelligence {
        WebIntelligence {
            news: (0..news_count)
                .map(|i| NewsItem {
                    title: format!("Headline {i}"),
                    snippet: format!("Snippet {i}"),
                    source: "Example Wire".to_string(),
                    link: String::new(),
                })
                .collect(),
            search_results: (0..search_count)
                .map(|i| SearchResult {
                    title: format!("Result {i}"),
                    snippet: format!("Result snippet {i}"),
                    link: String::new(),
                })
                .collect(),
            subject: "Reliance Industries".to_string(),
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let first = build_analysis_prompt(
            &symbol(),
            "Reliance Industries",
            &indicators(),
            &fundamentals(),
            &intel(3, 2),
        )
        .unwrap();
        let second = build_analysis_prompt(
            &symbol(),
            "Reliance Industries",
            &indicators(),
            &fundamentals(),
            &intel(3, 2),
        )
        .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_prompt_contains_formatted_figures() {
        let prompt = build_analysis_prompt(
            &symbol(),
            "Reliance Industries",
            &indicators(),
            &fundamentals(),
            &intel(1, 1),
        )
        .unwrap();

        assert!(prompt.contains("Analyze the Indian stock RELIANCE.NS (Reliance Industries)"));
        assert!(prompt.contains("Current Price: ₹2856.75"));
        assert!(prompt.contains("Change: ₹16.75 (+0.59%)"));
        assert!(prompt.contains("Volume: 7,850,000"));
        assert!(prompt.contains("- Market Cap: ₹1933000.00 Cr"));
        assert!(prompt.contains("- P/E Ratio: 27.40"));
        assert!(prompt.contains("- Dividend Yield: 0.35%"));
        assert!(prompt.contains("- Beta: 1.05"));
        assert!(prompt.contains("7. **Risk Assessment**"));
    }

    #[test]
    fn test_missing_fundamentals_render_as_na() {
        let prompt = build_analysis_prompt(
            &symbol(),
            "Reliance",
            &indicators(),
            &Fundamentals::from_flat(Map::new()),
            &intel(0, 0),
        )
        .unwrap();

        assert!(prompt.contains("- Sector: N/A"));
        assert!(prompt.contains("- Industry: N/A"));
        assert!(prompt.contains("- Market Cap: N/A"));
        assert!(prompt.contains("- P/E Ratio: N/A"));
        assert!(prompt.contains("- Book Value: N/A"));
        assert!(prompt.contains("- Dividend Yield: N/A"));
        assert!(prompt.contains("- Beta: N/A"));
    }

    #[test]
    fn test_empty_intel_renders_fallback_lines() {
        let prompt = build_analysis_prompt(
            &symbol(),
            "Reliance",
            &indicators(),
            &fundamentals(),
            &intel(0, 0),
        )
        .unwrap();

        assert!(prompt.contains("No recent news available"));
        assert!(prompt.contains("No additional information available"));
    }

    #[test]
    fn test_news_and_search_results_are_bounded() {
        let prompt = build_analysis_prompt(
            &symbol(),
            "Reliance",
            &indicators(),
            &fundamentals(),
            &intel(25, 12),
        )
        .unwrap();

        assert!(prompt.contains("- Headline 9:"));
        assert!(!prompt.contains("- Headline 10:"));
        assert!(prompt.contains("- Result 4:"));
        assert!(!prompt.contains("- Result 5:"));
    }

    #[test]
    fn test_snippets_are_truncated() {
        let mut intel = intel(1, 0);
        intel.news[0].snippet = "x".repeat(250);

        let prompt = build_analysis_prompt(
            &symbol(),
            "Reliance",
            &indicators(),
            &fundamentals(),
            &intel,
        )
        .unwrap();

        assert!(prompt.contains(&"x".repeat(100)));
        assert!(!prompt.contains(&"x".repeat(101)));
    }

    #[test]
    fn test_top_picks_prompt_lists_candidates() {
        let prompt = build_top_picks_prompt(&["RELIANCE.NS", "TCS.NS", "ITC.NS"]).unwrap();

        assert!(prompt.contains("RELIANCE.NS, TCS.NS, ITC.NS"));
        assert!(prompt.contains("top 5 best Indian stock picks"));
        assert!(prompt.contains("Risk level (Low/Medium/High)"));
    }

    #[test]
    fn test_truncate_chars_respects_character_boundaries() {
        assert_eq!(truncate_chars("₹₹₹₹", 2), "₹₹");
        assert_eq!(truncate_chars("short", 100), "short");
    }
}
