use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub access_token: Option<String>,
}

impl User {
    pub fn is_connected(&self) -> bool {
        self.access_token
            .as_deref()
            .map(|token| !token.is_empty())
            .unwrap_or(false)
    }
}

/// Process-lifetime registry of identities. Ids are allocated monotonically
/// and never reused while the store is alive; nothing is ever deleted.
#[derive(Clone)]
pub struct UserStore {
    // id -> User
    users: Arc<DashMap<i64, User>>,
    next_id: Arc<AtomicI64>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(0)),
        }
    }

    pub fn new_user(&self) -> User {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            access_token: None,
        };

        self.users.insert(id, user.clone());

        log::info!("Allocated user {}", id);
        user
    }

    pub fn get_user(&self, id: i64) -> Option<User> {
        self.users.get(&id).map(|entry| entry.value().clone())
    }

    /// Overwrites the access token for `id`. Concurrent writers race with
    /// last-write-wins semantics. Returns false when `id` was never allocated.
    pub fn set_access_token(&self, id: i64, access_token: String) -> bool {
        match self.users.get_mut(&id) {
            Some(mut entry) => {
                entry.access_token = Some(access_token);
                true
            }
            None => false,
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
