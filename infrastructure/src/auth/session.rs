//! In-memory session token registry
//!
//! Process-lifetime sessions: tokens are random, opaque, and vanish on
//! restart. Suitable for the single-operator deployments this tool
//! targets; anything multi-tenant would replace this adapter behind
//! the same port.

use council_application::ports::session_auth::SessionAuth;
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// Session store keeping valid tokens in process memory
#[derive(Default)]
pub struct InMemorySessionStore {
    tokens: Mutex<HashSet<String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh session token
    pub fn issue(&self) -> String {
        let token = Uuid::new_v4().to_string();
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.insert(token.clone());
        }
        debug!("Issued session token");
        token
    }

    /// Invalidate a token; unknown tokens are ignored
    pub fn revoke(&self, token: &str) {
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.remove(token);
        }
    }
}

impl SessionAuth for InMemorySessionStore {
    fn is_authenticated(&self, token: &str) -> bool {
        self.tokens
            .lock()
            .map(|tokens| tokens.contains(token))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_is_valid() {
        let store = InMemorySessionStore::new();
        let token = store.issue();
        assert!(store.is_authenticated(&token));
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let store = InMemorySessionStore::new();
        store.issue();
        assert!(!store.is_authenticated("made-up-token"));
    }

    #[test]
    fn test_revoked_token_is_rejected() {
        let store = InMemorySessionStore::new();
        let token = store.issue();
        store.revoke(&token);
        assert!(!store.is_authenticated(&token));
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = InMemorySessionStore::new();
        assert_ne!(store.issue(), store.issue());
    }
}
