//! Demo 3: Balances
//!
//! Showcases: Credentials from the environment, private endpoints
//!
//! Run: LUNO_API_KEY_ID=... LUNO_API_KEY_SECRET=... cargo run --bin balances

use colored::*;
use luno_rest::{ClientConfig, LunoClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::new().with_env_credentials()?;
    let client = LunoClient::with_config(config)?;

    let response = client.get_balance(None).await?;
    let balances = response
        .get("balance")
        .and_then(|b| b.as_array())
        .cloned()
        .unwrap_or_default();

    println!("{}", "  ASSET      BALANCE         RESERVED".bold());
    for entry in balances {
        println!(
            "  {:<10} {:<15} {}",
            entry["asset"].as_str().unwrap_or("?").yellow(),
            entry["balance"].as_str().unwrap_or("0"),
            entry["reserved"].as_str().unwrap_or("0")
        );
    }

    Ok(())
}
