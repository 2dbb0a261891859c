//! Info command

use achibot::Config;
use anyhow::Result;

pub fn run(config: &Config) -> Result<()> {
    println!("Server:     {}", config.server.http_url());
    println!("Socket:     {}", config.server.ws_url());
    println!("Clients:    {}", config.harness.clients);
    println!(
        "Matchmaker: query={:?} min={} max={}",
        config.matchmaker.query, config.matchmaker.min_count, config.matchmaker.max_count
    );
    println!();
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
