use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::OAuthConfig;

#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("token endpoint request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider rejected the code ({status}): {body}")]
    Provider { status: StatusCode, body: String },

    #[error("provider returned no access token")]
    MissingToken,
}

/// Token response shape of the provider's token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Builds the provider authorization URL and exchanges authorization codes
/// for access tokens. Configuration is immutable and injected at startup;
/// the shared HTTP client carries the request timeout, so a provider outage
/// cannot hang a worker.
#[derive(Clone)]
pub struct OAuthExchanger {
    config: OAuthConfig,
    http: reqwest::Client,
}

impl OAuthExchanger {
    pub fn new(config: OAuthConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// Pure string construction; no side effects.
    pub fn build_authorization_url(&self, state: &str) -> String {
        let mut url = format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&access_type=offline",
            self.config.auth_url,
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_url),
        );

        if !self.config.scopes.is_empty() {
            let scope = self.config.scopes.join(" ");
            url.push_str("&scope=");
            url.push_str(&urlencoding::encode(&scope));
        }

        url.push_str("&state=");
        url.push_str(&urlencoding::encode(state));
        url
    }

    pub async fn exchange(&self, code: &str) -> Result<AccessToken, ExchangeError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_url.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExchangeError::Provider { status, body });
        }

        let token: AccessToken = response.json().await?;
        if token.access_token.is_empty() {
            return Err(ExchangeError::MissingToken);
        }

        Ok(token)
    }
}
