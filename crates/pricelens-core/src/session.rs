//! Session-token capability injected into the fetcher.
//!
//! The fetcher never reads ambient state for credentials; whoever owns the
//! session (login flow, keychain, CLI flag) hands the fetcher an accessor
//! and stays in charge of refreshing it.

use std::sync::{Arc, RwLock};

/// Read access to the current bearer token, if any.
///
/// Returning `None` means there is no live session; the fetcher surfaces
/// that as an auth-expired error without touching the network.
pub trait SessionProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Fixed token, for CLIs and tests.
#[derive(Debug, Clone)]
pub struct StaticSession {
    token: String,
}

impl StaticSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl SessionProvider for StaticSession {
    fn bearer_token(&self) -> Option<String> {
        Some(self.token.clone())
    }
}

/// No live session; every fetch through this provider fails auth.
#[derive(Debug, Default)]
pub struct NoSession;

impl SessionProvider for NoSession {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// Replaceable token slot for long-lived consumers whose session rotates.
#[derive(Debug, Default)]
pub struct SharedSession {
    token: Arc<RwLock<Option<String>>>,
}

impl SharedSession {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
    }
}

impl SessionProvider for SharedSession {
    fn bearer_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_session_rotates_token() {
        let session = SharedSession::new(Some(String::from("t-1")));
        assert_eq!(session.bearer_token().as_deref(), Some("t-1"));

        session.set_token(Some(String::from("t-2")));
        assert_eq!(session.bearer_token().as_deref(), Some("t-2"));

        session.set_token(None);
        assert_eq!(session.bearer_token(), None);
    }
}
