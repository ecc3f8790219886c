//! dalal - AI-assisted analyzer for NSE/BSE equities
//!
//! An interactive terminal for looking up Indian stocks by name, viewing
//! key metrics and news, and reading a model-generated analysis.
//!
//! # Usage
//!
//! ```bash
//! # Set up environment variables (a .env file works too)
//! export GROQ_API_KEY="gsk_..."
//! export SERPER_API_KEY="..."
//!
//! # Interactive session
//! cargo run --bin dalal -p dalal-analyzer
//!
//! # One-shot
//! cargo run --bin dalal -p dalal-analyzer -- "HDFC Bank"
//! cargo run --bin dalal -p dalal-analyzer -- --best
//! ```

use clap::Parser;
use comfy_table::Table;
use dalal_analyzer::engine::{Outcome, QueryIntent};
use dalal_analyzer::prompts::group_thousands;
use dalal_analyzer::{Analyzer, AnalyzerConfig, StockReport};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// News items shown in the terminal report
const NEWS_DISPLAY_LIMIT: usize = 15;

#[derive(Debug, Parser)]
#[command(name = "dalal", version, about = "AI-assisted analyzer for NSE/BSE equities")]
struct Cli {
    /// Stock name or symbol to analyze once, then exit
    query: Option<String>,

    /// Print today's top stock picks and exit
    #[arg(long)]
    best: bool,

    /// History window for the price series
    #[arg(long, default_value = "1mo")]
    period: String,

    /// Bar interval for the price series
    #[arg(long, default_value = "1d")]
    interval: String,

    /// Groq model used for analysis
    #[arg(long)]
    model: Option<String>,

    /// Write the chart specification of each analysis as JSON
    #[arg(long, value_name = "FILE")]
    dump_chart: Option<PathBuf>,
}

fn print_banner() {
    println!(
        r"
╔══════════════════════════════════════════════════════════════╗
║                dalal - Indian Stock Analyzer                 ║
║                                                              ║
║  Type a company name or symbol to analyze it:                ║
║    Reliance, TCS, HDFC Bank, INFY.NS                         ║
║                                                              ║
║  Commands:                                                   ║
║    /best   - Today's top stock picks                         ║
║    /help   - Show this help                                  ║
║    /exit   - Quit                                            ║
╚══════════════════════════════════════════════════════════════╝
"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn,dalal_analyzer=info".to_string()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AnalyzerConfig::from_env();
    config.period = cli.period.clone();
    config.interval = cli.interval.clone();
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }

    let analyzer = Analyzer::new(config)?;

    if cli.best {
        run_best(&analyzer).await;
        return Ok(());
    }

    if let Some(query) = &cli.query {
        run_query(&analyzer, query, cli.dump_chart.as_deref()).await;
        return Ok(());
    }

    print_banner();
    repl(&analyzer, cli.dump_chart.as_deref()).await
}

async fn repl(analyzer: &Analyzer, dump_chart: Option<&Path>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("dalal> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        }

        match input.trim() {
            "" => {}
            "/exit" | "/quit" => {
                println!("Goodbye!");
                break;
            }
            "/help" => print_banner(),
            "/best" => run_best(analyzer).await,
            query => run_query(analyzer, query, dump_chart).await,
        }
    }

    Ok(())
}

async fn run_best(analyzer: &Analyzer) {
    println!("\nAnalyzing market conditions...\n");
    match analyzer.execute(QueryIntent::ShowBestPicks).await {
        Ok(Outcome::BestPicks(text)) => println!("{text}\n"),
        Ok(_) => {}
        Err(e) => eprintln!("{e}"),
    }
}

async fn run_query(analyzer: &Analyzer, input: &str, dump_chart: Option<&Path>) {
    let symbol = match analyzer.resolve_required(input).await {
        Ok(symbol) => symbol,
        Err(e) => {
            eprintln!("{e}. Try a different name or the symbol form (e.g. RELIANCE.NS).");
            return;
        }
    };

    println!("\nFetching comprehensive data for {symbol}...\n");
    let intent = QueryIntent::ShowSymbolAnalysis {
        symbol: symbol.clone(),
        company_hint: input.to_string(),
    };

    match analyzer.execute(intent).await {
        Ok(Outcome::Analysis(report)) => render_report(&report, dump_chart),
        Ok(_) => {}
        Err(e) => eprintln!("{e}. Please check the symbol and try again."),
    }
}

fn render_report(report: &StockReport, dump_chart: Option<&Path>) {
    println!("=== {} ({}) ===\n", report.company_name, report.symbol);

    let indicators = &report.indicators;
    let fundamentals = &report.fundamentals;

    let mut metrics = Table::new();
    metrics.set_header(["Current Price", "Change", "Market Cap", "P/E Ratio", "52W Range"]);
    metrics.add_row([
        format!("₹{:.2}", indicators.current_price),
        format!("₹{:.2} ({:+.2}%)", indicators.change, indicators.percent_change),
        fundamentals
            .number("marketCap")
            .map_or_else(|| "N/A".to_string(), |v| format!("₹{:.2} Cr", v / 1e7)),
        fundamentals
            .number("trailingPE")
            .map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}")),
        format!("₹{:.2} - ₹{:.2}", indicators.low_52w, indicators.high_52w),
    ]);
    println!("{metrics}\n");

    let mut technical = Table::new();
    technical.set_header(["SMA 20", "SMA 50", "Volume", "Avg Volume (20d)", "Volatility"]);
    technical.add_row([
        format!("₹{:.2}", indicators.sma_20),
        format!("₹{:.2}", indicators.sma_50),
        group_thousands(indicators.volume),
        group_thousands(indicators.average_volume_20),
        format!("{:.2}%", indicators.volatility),
    ]);
    println!("{technical}\n");

    match &report.chart {
        Some(chart) => {
            println!(
                "Chart: {} candles, {} overlay(s), {} volume bars",
                chart.candles.len(),
                chart.overlays.len(),
                chart.volume.len()
            );
            if let Some(path) = dump_chart {
                write_chart(chart, path);
            }
        }
        None => println!("Chart data loading..."),
    }

    println!("\n--- AI Analysis ---\n");
    println!("{}\n", report.analysis);

    if report.intel.news.is_empty() {
        println!("No recent news available for this stock.");
    } else {
        println!("--- Latest News ---");
        for item in report.intel.news.iter().take(NEWS_DISPLAY_LIMIT) {
            let source = if item.source.is_empty() {
                "Unknown"
            } else {
                &item.source
            };
            println!("* {} ({source})", item.title);
            if !item.snippet.is_empty() {
                println!("  {}", item.snippet);
            }
            if !item.link.is_empty() {
                println!("  {}", item.link);
            }
        }
    }

    println!("\n--- Company Information ---");
    let field = |key: &str| fundamentals.text(key).unwrap_or("N/A").to_string();
    println!("Sector: {}", field("sector"));
    println!("Industry: {}", field("industry"));
    println!("Website: {}", field("website"));
    println!(
        "Employees: {}",
        fundamentals
            .number("fullTimeEmployees")
            .map_or_else(|| "N/A".to_string(), group_thousands)
    );
    println!(
        "Headquarters: {}, {}",
        field("city"),
        fundamentals.text("country").unwrap_or("India")
    );
    if let Some(summary) = fundamentals.text("longBusinessSummary") {
        println!("\n{summary}");
    }
}

fn write_chart(chart: &dalal_analyzer::ChartSpec, path: &Path) {
    match serde_json::to_string_pretty(chart) {
        Ok(json) => match std::fs::write(path, json) {
            Ok(()) => println!("Chart specification written to {}", path.display()),
            Err(e) => eprintln!("Could not write chart file: {e}"),
        },
        Err(e) => eprintln!("Could not serialize chart: {e}"),
    }
}
