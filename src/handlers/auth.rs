use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use super::{redirect_to, INDEX_PATH};
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::oauth::OAuthExchanger;
use crate::session::{Session, IDENTITY_CACHE_KEY, IDENTITY_KEY};
use crate::store::UserStore;

#[derive(Debug, Deserialize)]
pub struct AuthCallbackQuery {
    #[serde(default)]
    pub code: String,
}

/// OAuth callback. Attaches the token on success; on any failure logs the
/// error and falls through. Always redirects to the landing page without
/// surfacing an error to the user.
#[get("/Application/Auth")]
pub async fn auth_callback(
    query: web::Query<AuthCallbackQuery>,
    user: CurrentUser,
    users: web::Data<UserStore>,
    exchanger: web::Data<OAuthExchanger>,
) -> Result<HttpResponse> {
    match exchanger.exchange(&query.code).await {
        Ok(token) => {
            if users.set_access_token(user.id, token.access_token) {
                log::info!("Attached access token to user {}", user.id);
            } else {
                log::warn!("Exchange succeeded for unknown user {}", user.id);
            }
        }
        Err(err) => {
            log::error!("Exchange error for user {}: {}", user.id, err);
        }
    }

    Ok(redirect_to(INDEX_PATH))
}

/// Clears the session bindings. The identity stays in the store; the next
/// request from this browser allocates a fresh one.
#[get("/Application/LogOut")]
pub async fn logout(session: Session, user: CurrentUser) -> Result<HttpResponse> {
    session.remove(IDENTITY_KEY);
    session.remove(IDENTITY_CACHE_KEY);

    log::info!("User {} logged out", user.id);

    Ok(redirect_to("/"))
}
