pub mod codec;
pub mod flash;

pub use codec::{SessionCodec, SessionCodecError};
pub use flash::Flash;

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};

use crate::error::LobbyError;

pub const SESSION_COOKIE: &str = "LOBBY_SESSION";

/// Reserved session key holding the string form of the bound identity's id.
pub const IDENTITY_KEY: &str = "uid";

/// Legacy cached-identity slot. Never written; cleared on logout so stale
/// cookies from older deployments do not linger.
pub const IDENTITY_CACHE_KEY: &str = "user";

/// Request-scoped view of the browser session. Cloning shares the underlying
/// map, so the identity middleware and the handler see the same values; the
/// cookie is rewritten on the way out only when something was mutated.
#[derive(Clone, Default)]
pub struct Session {
    inner: Rc<RefCell<SessionInner>>,
}

#[derive(Default)]
struct SessionInner {
    values: HashMap<String, String>,
    dirty: bool,
}

impl Session {
    pub fn from_values(values: HashMap<String, String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SessionInner {
                values,
                dirty: false,
            })),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: String) {
        let mut inner = self.inner.borrow_mut();
        inner.values.insert(key.to_string(), value);
        inner.dirty = true;
    }

    pub fn remove(&self, key: &str) {
        let mut inner = self.inner.borrow_mut();
        if inner.values.remove(key).is_some() {
            inner.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.inner.borrow().dirty
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.inner.borrow().values.clone()
    }
}

impl FromRequest for Session {
    type Error = LobbyError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Session>()
                .cloned()
                .ok_or(LobbyError::SessionUnavailable),
        )
    }
}
