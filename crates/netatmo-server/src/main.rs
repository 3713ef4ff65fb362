//! Stateless HTTP proxy: every inbound request fetches the favorite-station
//! report and returns it as compact JSON.

use anyhow::{Context, Result};
use netatmo_api::{massage, Credentials, NetatmoClient};
use warp::http::{header, Response, StatusCode};
use warp::Filter;

const DEFAULT_PORT: u16 = 8787;

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

/// Fetch and reshape with a fresh client; no state survives the request.
async fn station_report() -> Result<String> {
    let credentials = credentials_from_env()?;
    let mut client = NetatmoClient::new(credentials)?;

    let stations = client.get_favorite_station_data().await?;
    let report = massage(&stations);

    serde_json::to_string(&report).context("Failed to serialize station report")
}

fn json_reply(body: String) -> Response<String> {
    Response::builder()
        .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .body(body)
        .unwrap_or_default()
}

fn error_reply(err: &anyhow::Error) -> Response<String> {
    tracing::error!("Station fetch failed: {err:#}");
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .body("Internal Server Error".to_string())
        .unwrap_or_default()
}

async fn handle() -> Result<Response<String>, warp::Rejection> {
    let reply = match station_report().await {
        Ok(body) => json_reply(body),
        Err(err) => error_reply(&err),
    };

    Ok(reply)
}

#[tokio::main]
async fn main() {
    init_tracing();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    // Any method, any path: the proxy serves exactly one document.
    let route = warp::any().and_then(handle);

    tracing::info!("Listening on 0.0.0.0:{port}");
    warp::serve(route).run(([0, 0, 0, 0], port)).await;
}
