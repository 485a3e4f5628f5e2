//! Demo 2: Call Budget
//!
//! Showcases: Rolling call count, rate-limit errors carrying the count
//!
//! Run: cargo run --bin call_budget

use colored::*;
use luno_rest::{LunoClient, RestError};

/// Stop well below Luno's public limit
const BUDGET: usize = 20;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  CALL BUDGET".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = LunoClient::new()?;

    for round in 1.. {
        if client.api_call_rate() >= BUDGET {
            println!(
                "{} Budget of {} calls per minute reached after {} rounds",
                "!".yellow(),
                BUDGET,
                round - 1
            );
            break;
        }

        match client.market().get_all_tickers().await {
            Ok(_) => println!(
                "  {} round {:>2}  {} {}",
                "✓".green(),
                round,
                "calls/min:".dimmed(),
                client.api_call_rate()
            ),
            Err(RestError::Api(e)) if e.is_rate_limit() => {
                println!(
                    "  {} rate limited with {} calls in the window",
                    "✗".red(),
                    e.call_rate.unwrap_or_default()
                );
                break;
            }
            Err(e) => {
                println!("  {} {}", "✗".red(), e);
                break;
            }
        }
    }

    Ok(())
}
