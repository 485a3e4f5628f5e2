//! Demo 1: Ticker Watch
//!
//! Showcases: Public market data, Decimal-safe spread math, call rate
//!
//! Run: cargo run --bin ticker_watch [PAIR]

use colored::*;
use luno_rest::{ClientConfig, LunoClient};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use std::time::{Duration, Instant};

fn decimal_field(ticker: &Value, field: &str) -> Option<Decimal> {
    ticker.get(field)?.as_str().and_then(|s| Decimal::from_str(s).ok())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let pair = std::env::args().nth(1).unwrap_or_else(|| "XBTZAR".to_string());

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  LUNO TICKER WATCH".cyan().bold());
    println!("{}", format!("  Polling {} every 2 seconds", pair).cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = LunoClient::with_config(ClientConfig::new().with_pair(pair.as_str()))?;
    let start = Instant::now();

    while start.elapsed() < Duration::from_secs(30) {
        match client.get_ticker(None).await {
            Ok(ticker) => {
                let bid = decimal_field(&ticker, "bid");
                let ask = decimal_field(&ticker, "ask");

                if let (Some(bid), Some(ask)) = (bid, ask) {
                    println!(
                        "  {} {}  {} {}  {} {}  │ {} {}/min",
                        "BID:".yellow(),
                        bid,
                        "ASK:".yellow(),
                        ask,
                        "SPREAD:".green(),
                        ask - bid,
                        "Calls:".dimmed(),
                        client.api_call_rate()
                    );
                }
            }
            Err(e) => println!("  {} {}", "✗".red(), e),
        }

        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    println!();
    println!("{} Done", "✓".green());

    Ok(())
}
