// Shared fixtures for the integration suites. Each suite uses a subset.
#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;

use chat_lobby::config::OAuthConfig;
use chat_lobby::session::{SessionCodec, IDENTITY_KEY, SESSION_COOKIE};

pub const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789";

/// Closed port; suites that never talk to a provider point here.
pub const UNREACHABLE_BASE: &str = "http://127.0.0.1:9";

pub fn test_codec() -> SessionCodec {
    SessionCodec::new(TEST_SECRET.to_vec()).expect("valid codec")
}

pub fn oauth_config(base: &str) -> OAuthConfig {
    OAuthConfig {
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
        redirect_url: "http://localhost:3000/Application/Auth".to_string(),
        auth_url: format!("{base}/dialog/oauth"),
        token_url: format!("{base}/oauth/access_token"),
        profile_url: format!("{base}/me"),
        scopes: Vec::new(),
        http_timeout: Duration::from_secs(2),
    }
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .expect("http client")
}

pub fn session_cookie(uid: &str) -> Cookie<'static> {
    let mut values = HashMap::new();
    values.insert(IDENTITY_KEY.to_string(), uid.to_string());
    Cookie::new(
        SESSION_COOKIE,
        test_codec().encode(&values).expect("encode session"),
    )
}

pub fn location(resp: &ServiceResponse<impl MessageBody>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header")
        .to_string()
}

/// Decoded session map from the response's Set-Cookie, if one was written.
pub fn response_session_values(
    resp: &ServiceResponse<impl MessageBody>,
) -> Option<HashMap<String, String>> {
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)?;
    Some(test_codec().decode(cookie.value()).expect("decode session"))
}
