//! Navigation links shown for a session state

use doctorfinder_domain::SessionState;

/// Which set of navigation links to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLinks {
    Loading,
    SignedIn,
    SignedOut,
}

impl NavLinks {
    pub fn for_state(state: &SessionState) -> Self {
        if state.loading {
            Self::Loading
        } else if state.is_signed_in() {
            Self::SignedIn
        } else {
            Self::SignedOut
        }
    }

    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Self::Loading => &["Loading..."],
            Self::SignedIn => &["Dashboard", "Log Out"],
            Self::SignedOut => &["Log In", "Sign Up"],
        }
    }
}
