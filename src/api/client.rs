use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_TOKEN_URL: &str = "https://guardrailsai.us.auth0.com/oauth/token";
pub const DEFAULT_TOKEN_AUDIENCE: &str = "https://validator-hub-service.guardrailsai.com";
pub const DEFAULT_HUB_URL: &str = "https://hub.api.guardrailsai.com";

#[derive(Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
}

/// Where credentials are exchanged and checked.
#[derive(Debug, Clone)]
pub struct HubEndpoints {
    pub token_url: String,
    pub audience: String,
    pub hub_url: String,
}

impl Default for HubEndpoints {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            audience: DEFAULT_TOKEN_AUDIENCE.to_string(),
            hub_url: DEFAULT_HUB_URL.to_string(),
        }
    }
}

pub struct HubClient {
    pub hub_url: String,
    pub token: String,
    pub http: Client,
}

impl HubClient {
    pub async fn connect(
        endpoints: &HubEndpoints,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        debug!("Requesting access token from {}", endpoints.token_url);

        let resp = http
            .post(&endpoints.token_url)
            .json(&json!({
                "client_id": client_id,
                "client_secret": client_secret,
                "audience": endpoints.audience,
                "grant_type": "client_credentials",
            }))
            .send()
            .await
            .context("Failed to reach the token service for authentication")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("Authentication failed (HTTP {}): {}", status, body);
        }

        let token_resp: OAuthTokenResponse = resp
            .json()
            .await
            .context("Failed to parse authentication response")?;

        Ok(Self {
            hub_url: endpoints.hub_url.trim_end_matches('/').to_string(),
            token: token_resp.access_token,
            http,
        })
    }

    /// Ask the hub whether the token is accepted for this installation id.
    pub async fn authenticate(&self, installation_id: &Uuid) -> Result<()> {
        let url = auth_url(&self.hub_url);

        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header("x-anonymous-user-id", installation_id.to_string())
            .send()
            .await
            .context("Failed to reach the hub")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("Failed to authenticate (HTTP {}): {}", status, body);
        }

        Ok(())
    }
}

fn auth_url(hub_url: &str) -> String {
    format!("{}/auth", hub_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_url_strips_trailing_slash() {
        assert_eq!(auth_url("https://hub.example.com/"), "https://hub.example.com/auth");
        assert_eq!(auth_url("https://hub.example.com"), "https://hub.example.com/auth");
    }

    #[test]
    fn default_endpoints_use_constants() {
        let endpoints = HubEndpoints::default();
        assert_eq!(endpoints.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(endpoints.audience, DEFAULT_TOKEN_AUDIENCE);
        assert_eq!(endpoints.hub_url, DEFAULT_HUB_URL);
    }

    #[tokio::test]
    async fn connect_fails_when_token_service_is_unreachable() {
        let endpoints = HubEndpoints {
            token_url: "http://127.0.0.1:1/oauth/token".to_string(),
            ..HubEndpoints::default()
        };
        let err = HubClient::connect(&endpoints, "id", "secret")
            .await
            .err()
            .unwrap();
        assert!(format!("{err:#}").contains("token service"));
    }
}
