//! Identity and session state

use serde::{Deserialize, Serialize};

/// Signed-in identity as reported by the identity service.
///
/// Owned entirely by the external provider; the application never persists
/// credentials for this path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
}

impl Identity {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self { uid: uid.into(), email: email.into(), email_verified: false }
    }
}

/// "Who is signed in right now", plus whether that is known yet.
///
/// Starts as `loading` with no identity. The first resolution from the
/// identity service clears `loading` for good; later changes only replace
/// `identity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub loading: bool,
}

impl SessionState {
    pub fn initial() -> Self {
        Self { identity: None, loading: true }
    }

    pub fn resolved(identity: Option<Identity>) -> Self {
        Self { identity, loading: false }
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}
