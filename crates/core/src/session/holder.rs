//! Session state holder
//!
//! Tracks "who is signed in right now" for the whole client. The state starts
//! as loading with no identity; the first event from the identity provider
//! resolves it, and it never returns to loading afterwards.

use std::sync::Arc;

use doctorfinder_domain::{DoctorFinderError, Identity, Result, SessionState};
use parking_lot::ReentrantMutex;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::identity::ports::{IdentityProvider, ProfileCacheStore};
use crate::subscription::{ListenerRegistry, Subscription};

struct SessionShared {
    state: watch::Sender<SessionState>,
    listeners: Arc<ListenerRegistry<SessionState>>,
    // Serializes transitions so listeners observe them in order.
    transition: ReentrantMutex<()>,
}

impl SessionShared {
    fn apply(&self, identity: Option<Identity>) {
        let _guard = self.transition.lock();

        let next = SessionState::resolved(identity);
        let previous = self.state.send_replace(next.clone());
        if previous == next {
            return;
        }

        if previous.loading {
            debug!(signed_in = next.is_signed_in(), "session resolved");
        } else {
            debug!(signed_in = next.is_signed_in(), "session identity changed");
        }
        self.listeners.notify(&next);
    }
}

/// Reactive holder for the current session
pub struct SessionHolder {
    provider: Arc<dyn IdentityProvider>,
    cache: Arc<dyn ProfileCacheStore>,
    shared: Arc<SessionShared>,
    _provider_subscription: Subscription,
}

impl SessionHolder {
    /// Create the holder and start following `provider`.
    ///
    /// The provider subscription is cancelled when the holder is dropped.
    pub fn start(provider: Arc<dyn IdentityProvider>, cache: Arc<dyn ProfileCacheStore>) -> Self {
        let (state, _) = watch::channel(SessionState::initial());
        let shared = Arc::new(SessionShared {
            state,
            listeners: ListenerRegistry::new(),
            transition: ReentrantMutex::new(()),
        });

        let forward = Arc::clone(&shared);
        let subscription = provider
            .subscribe(Box::new(move |identity: &Option<Identity>| forward.apply(identity.clone())));

        Self { provider, cache, shared, _provider_subscription: subscription }
    }

    /// Latest session state
    pub fn state(&self) -> SessionState {
        self.shared.state.borrow().clone()
    }

    /// Signed-in identity, or `None` (also while still loading)
    pub fn current_identity(&self) -> Option<Identity> {
        self.shared.state.borrow().identity.clone()
    }

    /// Receiver that observes every state change
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.shared.state.subscribe()
    }

    /// Invoke `callback` on every state change until the returned
    /// subscription is cancelled. The current state is not replayed.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        self.shared.listeners.register(callback)
    }

    /// Wait for the first resolution from the identity provider.
    pub async fn wait_until_resolved(&self) -> Result<SessionState> {
        let mut receiver = self.watch();
        let state = receiver
            .wait_for(|state| !state.loading)
            .await
            .map_err(|_| DoctorFinderError::Internal("session holder closed".to_string()))?;
        Ok(state.clone())
    }

    /// Create an account. Provider errors are returned unchanged.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Identity> {
        let identity = self.provider.sign_up(email, password).await?;
        info!(uid = %identity.uid, "account created");
        self.shared.apply(Some(identity.clone()));
        Ok(identity)
    }

    /// Sign in. Provider errors are returned unchanged.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        let identity = self.provider.sign_in(email, password).await?;
        info!(uid = %identity.uid, "signed in");
        self.shared.apply(Some(identity.clone()));
        Ok(identity)
    }

    /// Clear the local profile cache, then end the session.
    ///
    /// The cache is cleared even if the provider call fails, and the local
    /// state always ends with no identity. A provider failure is still
    /// returned to the caller.
    pub async fn sign_out(&self) -> Result<()> {
        if let Err(err) = self.cache.clear().await {
            warn!(error = %err, "failed to clear profile cache during sign-out");
        }

        let result = match self.current_identity() {
            Some(identity) => self.provider.sign_out(&identity).await,
            None => Ok(()),
        };
        if let Err(err) = &result {
            warn!(error = %err, "identity service sign-out failed");
        }

        if self.current_identity().is_some() {
            self.shared.apply(None);
        }
        info!("signed out");
        result
    }
}
