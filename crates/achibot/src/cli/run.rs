//! Run command

use achibot::{Config, Harness, NakamaClient};
use anyhow::Result;

pub async fn run(config: Config) -> Result<()> {
    tracing::info!(
        "Starting {} clients against {}",
        config.harness.clients,
        config.server.http_url()
    );

    let client = NakamaClient::new(config.server.clone())?;
    let harness = Harness::new(client, config);

    // Sockets stay open for as long as the connections are held
    let connections = harness.run().await?;

    for conn in &connections {
        tracing::info!(
            "Client {} ({}) waiting for a match",
            conn.index,
            conn.session.username
        );
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    Ok(())
}
