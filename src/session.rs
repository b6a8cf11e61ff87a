use base64::Engine;
use rand::RngCore;
use std::{
    collections::HashMap,
    sync::RwLock,
};

pub const SESSION_COOKIE: &str = "snapforge_session";

/// Server-side session state keyed by the opaque token held in the client's
/// cookie. Injected into the router state so tests can swap in a fake.
pub trait SessionStore: Send + Sync {
    fn get(&self, token: &str) -> Option<String>;
    fn set(&self, token: &str, user: &str);
    fn delete(&self, token: &str);
}

/// In-memory token-to-username map. Sessions do not survive process restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, token: &str) -> Option<String> {
        self.sessions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(token)
            .cloned()
    }

    fn set(&self, token: &str, user: &str) {
        self.sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.to_owned(), user.to_owned());
    }

    fn delete(&self, token: &str) {
        self.sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(token);
    }
}

/// 32 random bytes, URL-safe base64 without padding.
pub fn new_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
