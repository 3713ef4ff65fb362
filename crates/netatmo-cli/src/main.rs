//! One-shot fetch: print the favorite-station report as pretty JSON.

use anyhow::{Context, Result};
use netatmo_api::{massage, Credentials, NetatmoClient};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

fn credentials_from_env() -> Result<Credentials> {
    let read = |name: &str| {
        std::env::var(name).with_context(|| format!("Environment variable '{name}' is not set"))
    };

    Ok(Credentials {
        username: read("NETATMO_USERNAME")?,
        password: read("NETATMO_PASSWORD")?,
        client_id: read("NETATMO_CLIENT_ID")?,
        client_secret: read("NETATMO_CLIENT_SECRET")?,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let credentials = credentials_from_env()?;
    let mut client = NetatmoClient::new(credentials)?;

    let stations = client.get_favorite_station_data().await?;
    let report = massage(&stations);

    let output =
        serde_json::to_string_pretty(&report).context("Failed to serialize station report")?;
    println!("{output}");

    Ok(())
}
