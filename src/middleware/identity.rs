use std::collections::HashMap;
use std::future::{ready, Ready};

use actix_web::{
    body::MessageBody,
    cookie::{Cookie, SameSite},
    dev::{Payload, ServiceRequest, ServiceResponse},
    middleware::Next,
    web, FromRequest, HttpMessage, HttpRequest,
};

use crate::error::LobbyError;
use crate::session::{Session, SessionCodec, IDENTITY_KEY, SESSION_COOKIE};
use crate::store::{User, UserStore};

/// Identity snapshot taken by the middleware when the request was resolved.
/// Extracting it outside the middleware scope fails with a descriptive error
/// instead of a panicking downcast.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl std::ops::Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = LobbyError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<CurrentUser>()
                .cloned()
                .ok_or(LobbyError::IdentityUnresolved),
        )
    }
}

/// Binds every request inside the scope to exactly one identity, allocating
/// one when the session carries no usable binding. Composed explicitly in
/// `main.rs` so the "every request resolves an identity" dependency is
/// visible at server-setup time.
pub async fn identity_middleware(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let codec = req
        .app_data::<web::Data<SessionCodec>>()
        .ok_or(LobbyError::SessionUnavailable)?
        .clone();

    let users = req
        .app_data::<web::Data<UserStore>>()
        .ok_or(LobbyError::IdentityUnresolved)?
        .clone();

    let values = match req.cookie(SESSION_COOKIE) {
        Some(cookie) => match codec.decode(cookie.value()) {
            Ok(values) => values,
            Err(err) => {
                log::warn!("Discarding undecodable session cookie: {}", err);
                HashMap::new()
            }
        },
        None => HashMap::new(),
    };

    let session = Session::from_values(values);
    let user = resolve_identity(&session, &users);

    req.extensions_mut().insert(session.clone());
    req.extensions_mut().insert(CurrentUser(user));

    let mut res = next.call(req).await?;

    if session.is_dirty() {
        let encoded = codec.encode(&session.snapshot()).map_err(LobbyError::from)?;
        let cookie = Cookie::build(SESSION_COOKIE, encoded)
            .path("/")
            .http_only(true)
            // The OAuth callback arrives via a cross-site top-level
            // navigation; Strict would drop the binding there.
            .same_site(SameSite::Lax)
            .finish();

        res.response_mut()
            .add_cookie(&cookie)
            .map_err(actix_web::error::ErrorInternalServerError)?;
    }

    Ok(res)
}

fn resolve_identity(session: &Session, users: &UserStore) -> User {
    if let Some(raw) = session.get(IDENTITY_KEY) {
        match raw.parse::<i64>() {
            Ok(id) => match users.get_user(id) {
                Some(user) => return user,
                None => {
                    log::warn!(
                        "Session referenced unknown user {}; discarding the binding",
                        id
                    );
                }
            },
            Err(_) => {
                log::warn!(
                    "Session held a malformed user id {:?}; discarding the binding",
                    raw
                );
            }
        }
    }

    let user = users.new_user();
    session.insert(IDENTITY_KEY, user.id.to_string());
    user
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_without_binding_allocates_and_writes_back() {
        let users = UserStore::new();
        let session = Session::from_values(HashMap::new());

        let user = resolve_identity(&session, &users);

        assert_eq!(user.id, 1);
        assert_eq!(session.get(IDENTITY_KEY).as_deref(), Some("1"));
        assert!(session.is_dirty());
    }

    #[test]
    fn test_resolve_with_valid_binding_reuses_identity() {
        let users = UserStore::new();
        let existing = users.new_user();

        let mut values = HashMap::new();
        values.insert(IDENTITY_KEY.to_string(), existing.id.to_string());
        let session = Session::from_values(values);

        let user = resolve_identity(&session, &users);

        assert_eq!(user.id, existing.id);
        assert!(!session.is_dirty());
        assert_eq!(users.user_count(), 1);
    }

    #[test]
    fn test_resolve_with_malformed_binding_falls_back() {
        let users = UserStore::new();

        let mut values = HashMap::new();
        values.insert(IDENTITY_KEY.to_string(), "not-a-number".to_string());
        let session = Session::from_values(values);

        let user = resolve_identity(&session, &users);

        assert_eq!(user.id, 1);
        assert_eq!(session.get(IDENTITY_KEY).as_deref(), Some("1"));
    }

    #[test]
    fn test_resolve_with_stale_binding_falls_back() {
        let users = UserStore::new();

        let mut values = HashMap::new();
        values.insert(IDENTITY_KEY.to_string(), "999".to_string());
        let session = Session::from_values(values);

        let user = resolve_identity(&session, &users);

        assert_eq!(user.id, 1);
        assert_eq!(session.get(IDENTITY_KEY).as_deref(), Some("1"));
    }
}
