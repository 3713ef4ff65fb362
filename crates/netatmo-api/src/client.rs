//! Authenticated Netatmo API client.
//!
//! Owns the OAuth2 credentials and the current token pair. Logs in lazily
//! on the first fetch and transparently refreshes the token on a 401,
//! replaying the failed request exactly once.

use std::time::Duration;

use reqwest::{header, StatusCode};
use tracing::instrument;

use crate::error::NetatmoError;
use crate::types::{Station, StationsResponse, TokenResponse};

const NETATMO_API_BASE: &str = "https://api.netatmo.com";
const TOKEN_SCOPE: &str = "read_station read_thermostat";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// OAuth2 credentials, immutable for the lifetime of the client.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
}

/// Current token pair. Overwritten wholesale on each successful token
/// response, never persisted beyond the client instance.
#[derive(Debug, Default)]
struct Session {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Client for the Netatmo station-data API.
///
/// The fetch takes `&mut self`: one in-flight request per instance.
pub struct NetatmoClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    session: Session,
}

impl NetatmoClient {
    pub fn new(credentials: Credentials) -> Result<Self, NetatmoError> {
        Self::with_base_url(credentials, NETATMO_API_BASE)
    }

    #[cfg(test)]
    pub fn new_with_base_url(
        credentials: Credentials,
        base_url: &str,
    ) -> Result<Self, NetatmoError> {
        Self::with_base_url(credentials, base_url)
    }

    fn with_base_url(credentials: Credentials, base_url: &str) -> Result<Self, NetatmoError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            credentials,
            session: Session::default(),
        })
    }

    fn auth_header(&self) -> String {
        match &self.session.access_token {
            Some(token) => format!("Bearer {token}"),
            None => String::new(),
        }
    }

    /// Fetch current data for the user's favorite stations.
    ///
    /// Logs in lazily when no access token is held yet. A 401 from the
    /// data endpoint triggers a single token refresh and one replay of the
    /// identical request; the replay's outcome is final. A 401 that
    /// survives the replay surfaces as [`NetatmoError::Unauthorized`].
    #[instrument(skip(self), level = "info")]
    pub async fn get_favorite_station_data(&mut self) -> Result<Vec<Station>, NetatmoError> {
        if self.session.access_token.is_none() {
            self.login().await?;
        }

        let mut response = self.send_station_request().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::info!("Access token rejected, refreshing");
            // The token is known bad; drop it before refreshing so a failed
            // refresh replays unauthenticated rather than with a stale token.
            self.session.access_token = None;
            self.refresh().await?;
            response = self.send_station_request().await?;
        }

        let body: StationsResponse = self.handle_response(response).await?;
        Ok(body.devices)
    }

    async fn send_station_request(&self) -> Result<reqwest::Response, NetatmoError> {
        let response = self
            .client
            .get(format!("{}/api/getstationsdata", self.base_url))
            .query(&[("get_favorites", "true")])
            .header(header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        Ok(response)
    }

    #[instrument(skip(self), level = "info")]
    async fn login(&mut self) -> Result<(), NetatmoError> {
        let grant = vec![
            ("grant_type".to_string(), "password".to_string()),
            ("username".to_string(), self.credentials.username.clone()),
            ("password".to_string(), self.credentials.password.clone()),
        ];
        self.request_token(grant).await
    }

    #[instrument(skip(self), level = "info")]
    async fn refresh(&mut self) -> Result<(), NetatmoError> {
        let refresh_token = self.session.refresh_token.clone().unwrap_or_default();
        let grant = vec![
            ("grant_type".to_string(), "refresh_token".to_string()),
            ("refresh_token".to_string(), refresh_token),
        ];
        self.request_token(grant).await
    }

    /// POST to the OAuth2 token endpoint. Fail-silent on a non-200 answer:
    /// the session keeps its prior state and the missing token surfaces
    /// downstream as an unauthenticated request.
    async fn request_token(&mut self, grant: Vec<(String, String)>) -> Result<(), NetatmoError> {
        let mut params = grant;
        params.push(("client_id".to_string(), self.credentials.client_id.clone()));
        params.push((
            "client_secret".to_string(),
            self.credentials.client_secret.clone(),
        ));
        params.push(("scope".to_string(), TOKEN_SCOPE.to_string()));

        let response = self
            .client
            .post(format!("{}/oauth2/token", self.base_url))
            .form(&params)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            tracing::warn!("Token request failed with status {}", response.status());
            return Ok(());
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| NetatmoError::Parse(format!("token response: {e}")))?;

        self.session = Session {
            access_token: Some(token.access_token),
            refresh_token: Some(token.refresh_token),
        };

        Ok(())
    }

    /// Map the final data response to a typed result.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, NetatmoError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| NetatmoError::Parse(format!("JSON parse error: {e}")))
        } else if status == StatusCode::UNAUTHORIZED {
            Err(NetatmoError::Unauthorized)
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(NetatmoError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}
