use actix_web::{get, web, HttpRequest, HttpResponse};
use serde::Serialize;

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::oauth::{OAuthExchanger, Profile, ProfileFetcher};
use crate::session::Flash;

/// Fixed state value carried through the authorization URL, as registered
/// with the provider. The callback does not validate it.
const AUTH_STATE: &str = "state";

#[derive(Debug, Serialize)]
pub struct LandingUser {
    pub id: i64,
    pub connected: bool,
}

#[derive(Debug, Serialize)]
pub struct LandingResponse {
    pub user: LandingUser,
    pub auth_url: String,
    pub me: Profile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[get("/Application/Index")]
pub async fn index(
    req: HttpRequest,
    user: CurrentUser,
    exchanger: web::Data<OAuthExchanger>,
    profiles: web::Data<ProfileFetcher>,
) -> Result<HttpResponse> {
    landing_state(req, user, exchanger, profiles).await
}

#[get("/")]
pub async fn root(
    req: HttpRequest,
    user: CurrentUser,
    exchanger: web::Data<OAuthExchanger>,
    profiles: web::Data<ProfileFetcher>,
) -> Result<HttpResponse> {
    landing_state(req, user, exchanger, profiles).await
}

async fn landing_state(
    req: HttpRequest,
    user: CurrentUser,
    exchanger: web::Data<OAuthExchanger>,
    profiles: web::Data<ProfileFetcher>,
) -> Result<HttpResponse> {
    let me = match user.access_token.as_deref().filter(|t| !t.is_empty()) {
        Some(token) => match profiles.fetch_profile(token).await {
            Ok(profile) => {
                log::debug!("Fetched profile for user {}", user.id);
                profile
            }
            Err(err) => {
                log::error!("Profile fetch failed for user {}: {}", user.id, err);
                Profile::new()
            }
        },
        None => Profile::new(),
    };

    let flash = Flash::from_request(&req);

    let response = LandingResponse {
        user: LandingUser {
            id: user.id,
            connected: user.is_connected(),
        },
        auth_url: exchanger.build_authorization_url(AUTH_STATE),
        me,
        error: flash.as_ref().map(|f| f.error.clone()),
    };

    let mut builder = HttpResponse::Ok();
    if flash.is_some() {
        builder.cookie(Flash::removal_cookie());
    }

    Ok(builder.json(response))
}
