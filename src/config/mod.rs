use std::time::Duration;

use uuid::Uuid;

use crate::session::codec::MIN_SECRET_LEN;

const DEFAULT_REDIRECT_URL: &str = "http://localhost:3000/Application/Auth";
const DEFAULT_AUTH_URL: &str = "https://www.facebook.com/v3.2/dialog/oauth";
const DEFAULT_TOKEN_URL: &str = "https://graph.facebook.com/v3.2/oauth/access_token";
const DEFAULT_PROFILE_URL: &str = "https://graph.facebook.com/me";

/// Immutable application configuration, read once at startup and passed
/// explicitly to the components that need it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub oauth: OAuthConfig,
    pub session_secret: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub profile_url: String,
    pub scopes: Vec<String>,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let server = ServerSettings {
            host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
        };

        let client_id = std::env::var("FB_CLIENT_ID").unwrap_or_default();
        if client_id.is_empty() {
            log::warn!("FB_CLIENT_ID is not set; OAuth login will fail at the provider");
        }

        let scopes: Vec<String> = std::env::var("OAUTH_SCOPES")
            .ok()
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let timeout_ms: u64 = std::env::var("OAUTH_HTTP_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10_000);

        let oauth = OAuthConfig {
            client_id,
            client_secret: std::env::var("FB_CLIENT_SECRET").unwrap_or_default(),
            redirect_url: std::env::var("OAUTH_REDIRECT_URL")
                .unwrap_or_else(|_| DEFAULT_REDIRECT_URL.to_string()),
            auth_url: std::env::var("OAUTH_AUTH_URL")
                .unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string()),
            token_url: std::env::var("OAUTH_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
            profile_url: std::env::var("OAUTH_PROFILE_URL")
                .unwrap_or_else(|_| DEFAULT_PROFILE_URL.to_string()),
            scopes,
            http_timeout: Duration::from_millis(timeout_ms),
        };

        AppConfig {
            server,
            oauth,
            session_secret: session_secret_from_env(),
        }
    }
}

fn session_secret_from_env() -> Vec<u8> {
    match std::env::var("SESSION_SECRET") {
        Ok(secret) if secret.len() >= MIN_SECRET_LEN => secret.into_bytes(),
        Ok(_) => {
            log::warn!(
                "SESSION_SECRET is shorter than {} bytes; using an ephemeral secret (sessions reset on restart)",
                MIN_SECRET_LEN
            );
            ephemeral_secret()
        }
        Err(_) => {
            log::warn!(
                "SESSION_SECRET is not set; using an ephemeral secret (sessions reset on restart)"
            );
            ephemeral_secret()
        }
    }
}

fn ephemeral_secret() -> Vec<u8> {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple()).into_bytes()
}
