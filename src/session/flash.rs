use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "LOBBY_FLASH";

/// One-shot message carried across a redirect in its own cookie. The landing
/// handler reads it, surfaces it once and expires the cookie in the same
/// response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub error: String,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    pub fn into_cookie(self) -> Cookie<'static> {
        let value = match serde_json::to_vec(&self) {
            Ok(bytes) => URL_SAFE_NO_PAD.encode(bytes),
            Err(_) => String::new(),
        };

        Cookie::build(FLASH_COOKIE, value)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish()
    }

    pub fn from_request(req: &HttpRequest) -> Option<Flash> {
        let cookie = req.cookie(FLASH_COOKIE)?;
        let bytes = URL_SAFE_NO_PAD.decode(cookie.value()).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Must carry the same path as `into_cookie`; cookie identity is
    /// (name, domain, path), so a mismatched path would store a second
    /// empty cookie instead of expiring the original.
    pub fn removal_cookie() -> Cookie<'static> {
        Cookie::build(FLASH_COOKIE, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .finish()
    }
}
