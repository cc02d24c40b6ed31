//! Display-name lookup for rendering balance sheets.
//!
//! Account creation and authentication live outside this workspace; the
//! directory only answers "what is this user called".

use std::collections::HashMap;
use std::sync::RwLock;

use tabsplit_core::{User, UserId};

pub trait UserDirectory: Send + Sync {
    fn display_name(&self, user_id: UserId) -> Option<String>;
}

/// In-memory user directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, user: User) {
        if let Ok(mut users) = self.users.write() {
            users.insert(user.id, user);
        }
    }

    pub fn get(&self, user_id: UserId) -> Option<User> {
        self.users.read().ok()?.get(&user_id).cloned()
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn display_name(&self, user_id: UserId) -> Option<String> {
        self.get(user_id).map(|u| u.name)
    }
}
