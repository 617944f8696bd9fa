//! Identity toolkit REST client
//!
//! Email/password accounts against the identity service's REST surface:
//! `accounts:signUp`, `accounts:signInWithPassword`, `accounts:lookup` and
//! the secure-token refresh endpoint. The signed-in session (identity plus
//! tokens) is persisted in local storage under `authSession`, so a restarted
//! client comes back signed in.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use doctorfinder_core::{IdentityListener, IdentityProvider, ListenerRegistry, Subscription};
use doctorfinder_domain::constants::{AUTH_SESSION_KEY, TOKEN_REFRESH_MARGIN_SECS};
use doctorfinder_domain::{DoctorFinderError, Identity, Result, ServiceConfig};
use parking_lot::{Mutex, ReentrantMutex};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use super::auth::AccessTokenSource;
use super::{keyed_url, service_error_message};
use crate::errors::InfraError;
use crate::http::HttpClient;
use crate::storage::LocalStore;

/// Persisted session
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    identity: Identity,
    id_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl StoredSession {
    fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) <= now
    }
}

impl fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredSession")
            .field("identity", &self.identity)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// `accounts:signUp` / `accounts:signInWithPassword` response
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordAuthResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    id_token: String,
    refresh_token: String,
    expires_in: String,
    #[serde(default)]
    email_verified: bool,
}

/// Secure-token refresh response (snake_case on the wire)
#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    email_verified: bool,
}

/// REST identity provider with a locally persisted session
pub struct IdentityToolkitClient {
    http: HttpClient,
    config: Arc<ServiceConfig>,
    storage: Arc<LocalStore>,
    session: Mutex<Option<StoredSession>>,
    // Serializes token refreshes.
    refresh: tokio::sync::Mutex<()>,
    listeners: Arc<ListenerRegistry<Option<Identity>>>,
    // Held across a session swap and its notification, and across a
    // subscriber's registration and initial report, so every listener sees
    // identities in the order they were stored.
    emit: ReentrantMutex<()>,
}

impl IdentityToolkitClient {
    /// Create the client and restore any session persisted in `storage`.
    pub fn new(http: HttpClient, config: Arc<ServiceConfig>, storage: Arc<LocalStore>) -> Self {
        let restored = match storage.get::<StoredSession>(AUTH_SESSION_KEY) {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "could not read persisted session; starting signed out");
                None
            }
        };

        if let Some(session) = &restored {
            debug!(uid = %session.identity.uid, "restored persisted session");
        }

        Self {
            http,
            config,
            storage,
            session: Mutex::new(restored),
            refresh: tokio::sync::Mutex::new(()),
            listeners: ListenerRegistry::new(),
            emit: ReentrantMutex::new(()),
        }
    }

    /// Ask the service whether the persisted session is still valid.
    ///
    /// A session the service rejects is dropped locally and `None` is
    /// returned. Transport failures leave the session untouched.
    pub async fn verify_session(&self) -> Result<Option<Identity>> {
        if self.session.lock().is_none() {
            return Ok(None);
        }

        let token = match self.access_token().await {
            Ok(token) => token,
            Err(DoctorFinderError::Auth(message)) => {
                info!(reason = %message, "persisted session rejected");
                self.replace_session(None);
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let url = keyed_url(&self.config.identity_endpoint, "/v1/accounts:lookup", &self.config.api_key)?;
        let request = self.http.request(Method::POST, url).json(&json!({ "idToken": token }));

        match self.call::<LookupResponse>(request).await {
            Ok(lookup) => match lookup.users.into_iter().next() {
                Some(user) => {
                    let identity = Identity {
                        uid: user.local_id,
                        email: user.email,
                        email_verified: user.email_verified,
                    };
                    self.update_identity(identity.clone());
                    Ok(Some(identity))
                }
                None => {
                    self.replace_session(None);
                    Ok(None)
                }
            },
            Err(DoctorFinderError::Auth(message)) => {
                info!(reason = %message, "persisted session rejected");
                self.replace_session(None);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn password_auth(&self, path: &str, email: &str, password: &str) -> Result<Identity> {
        let url = keyed_url(&self.config.identity_endpoint, path, &self.config.api_key)?;
        let request = self.http.request(Method::POST, url).json(&json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        }));

        let response: PasswordAuthResponse = self.call(request).await?;
        let identity = Identity {
            uid: response.local_id,
            email: if response.email.is_empty() { email.to_string() } else { response.email },
            email_verified: response.email_verified,
        };

        let session = StoredSession {
            identity: identity.clone(),
            id_token: response.id_token,
            refresh_token: response.refresh_token,
            expires_at: expiry_from(&response.expires_in)?,
        };
        self.replace_session(Some(session));

        Ok(identity)
    }

    async fn refresh_tokens(&self, refresh_token: &str) -> Result<RefreshResponse> {
        let url = keyed_url(&self.config.token_endpoint, "/v1/token", &self.config.api_key)?;
        let request = self.http.request(Method::POST, url).json(&json!({
            "grant_type": "refresh_token",
            "refresh_token": refresh_token,
        }));
        self.call(request).await
    }

    /// Send `request` and decode a success body, or surface the service's
    /// error message verbatim.
    async fn call<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = self.http.send(request).await?;
        if response.status().is_success() {
            return response.json::<T>().await.map_err(|err| InfraError::from(err).into());
        }
        Err(error_from_response(response).await)
    }

    /// Install or drop the session, persist it, and notify listeners when
    /// the identity changed.
    fn replace_session(&self, session: Option<StoredSession>) {
        let _emit = self.emit.lock();
        let persisted = match &session {
            Some(session) => self.storage.set(AUTH_SESSION_KEY, session),
            None => self.storage.remove(AUTH_SESSION_KEY),
        };
        if let Err(err) = persisted {
            warn!(error = %err, "failed to persist session");
        }

        let identity = session.as_ref().map(|s| s.identity.clone());
        let previous = {
            let mut guard = self.session.lock();
            std::mem::replace(&mut *guard, session).map(|s| s.identity)
        };

        if previous != identity {
            self.listeners.notify(&identity);
        }
    }

    fn update_identity(&self, identity: Identity) {
        let updated = {
            let guard = self.session.lock();
            match guard.as_ref() {
                Some(session) if session.identity != identity => {
                    Some(StoredSession { identity, ..session.clone() })
                }
                _ => None,
            }
        };
        if let Some(session) = updated {
            self.replace_session(Some(session));
        }
    }
}

#[async_trait]
impl IdentityProvider for IdentityToolkitClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity> {
        let identity = self.password_auth("/v1/accounts:signUp", email, password).await?;
        info!(uid = %identity.uid, "account created");
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        let identity =
            self.password_auth("/v1/accounts:signInWithPassword", email, password).await?;
        info!(uid = %identity.uid, "signed in");
        Ok(identity)
    }

    async fn sign_out(&self, identity: &Identity) -> Result<()> {
        let current = self.current_identity();
        if current.as_ref().map(|c| c.uid.as_str()) != Some(identity.uid.as_str()) {
            debug!(uid = %identity.uid, "sign-out for an identity that is not signed in");
        }
        self.replace_session(None);
        info!(uid = %identity.uid, "signed out");
        Ok(())
    }

    fn subscribe(&self, listener: IdentityListener) -> Subscription {
        let listener: Arc<IdentityListener> = Arc::new(listener);
        let registered = Arc::clone(&listener);

        let _emit = self.emit.lock();
        let subscription =
            self.listeners.register(move |identity: &Option<Identity>| (registered)(identity));

        // The locally restored session is already resolved; report it now.
        let current = self.current_identity();
        (listener)(&current);

        subscription
    }

    fn current_identity(&self) -> Option<Identity> {
        self.session.lock().as_ref().map(|session| session.identity.clone())
    }
}

#[async_trait]
impl AccessTokenSource for IdentityToolkitClient {
    async fn access_token(&self) -> Result<String> {
        let _refresh = self.refresh.lock().await;

        let session = self
            .session
            .lock()
            .clone()
            .ok_or_else(|| DoctorFinderError::Auth("not signed in".into()))?;

        if !session.needs_refresh(Utc::now()) {
            return Ok(session.id_token);
        }

        debug!(uid = %session.identity.uid, "refreshing ID token");
        let refreshed = self.refresh_tokens(&session.refresh_token).await?;
        let expires_at = expiry_from(&refreshed.expires_in)?;
        let token = refreshed.id_token.clone();

        // Only keep the new tokens if the same identity is still signed in.
        let still_current = self
            .session
            .lock()
            .as_ref()
            .is_some_and(|current| current.identity.uid == session.identity.uid);
        if still_current {
            self.replace_session(Some(StoredSession {
                identity: session.identity,
                id_token: refreshed.id_token,
                refresh_token: refreshed.refresh_token,
                expires_at,
            }));
        }

        Ok(token)
    }
}

fn expiry_from(expires_in: &str) -> Result<DateTime<Utc>> {
    let seconds = expires_in.trim().parse::<i64>().map_err(|_| {
        DoctorFinderError::Network(format!("invalid token lifetime: {}", expires_in))
    })?;
    Ok(Utc::now() + Duration::seconds(seconds))
}

async fn error_from_response(response: Response) -> DoctorFinderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match service_error_message(&body) {
        Some(message) => DoctorFinderError::Auth(message),
        None if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN => {
            DoctorFinderError::Auth(format!("HTTP {}", status.as_u16()))
        }
        None => DoctorFinderError::Network(format!("identity service returned HTTP {}", status.as_u16())),
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use tempfile::TempDir;

    use super::*;

    fn session(expires_at: DateTime<Utc>) -> StoredSession {
        StoredSession {
            identity: Identity::new("uid-1", "a@example.com"),
            id_token: "id-token".into(),
            refresh_token: "refresh-token".into(),
            expires_at,
        }
    }

    #[test]
    fn refresh_is_due_inside_margin() {
        let now = Utc::now();
        assert!(session(now + Duration::seconds(30)).needs_refresh(now));
        assert!(session(now - Duration::seconds(1)).needs_refresh(now));
        assert!(!session(now + Duration::seconds(3600)).needs_refresh(now));
    }

    #[test]
    fn session_debug_hides_tokens() {
        let rendered = format!("{:?}", session(Utc::now()));
        assert!(!rendered.contains("id-token"));
        assert!(!rendered.contains("refresh-token"));
        assert!(rendered.contains("uid-1"));
    }

    #[test]
    fn subscribers_settle_on_the_stored_identity_under_concurrent_swaps() {
        let dir = TempDir::new().unwrap();
        let client = Arc::new(IdentityToolkitClient::new(
            HttpClient::new().unwrap(),
            Arc::new(ServiceConfig::new("key", "demo-project")),
            Arc::new(LocalStore::new(dir.path().join("storage.json"))),
        ));

        let writer = {
            let client = Arc::clone(&client);
            thread::spawn(move || {
                for round in 0..200 {
                    let next = (round % 2 == 0).then(|| session(Utc::now() + Duration::hours(1)));
                    client.replace_session(next);
                }
            })
        };

        let mut subscriptions = Vec::new();
        let mut last_seen = Vec::new();
        for _ in 0..50 {
            let last: Arc<Mutex<Option<Option<Identity>>>> = Arc::new(Mutex::new(None));
            let sink = Arc::clone(&last);
            subscriptions.push(client.subscribe(Box::new(move |identity: &Option<Identity>| {
                *sink.lock() = Some(identity.clone());
            })));
            last_seen.push(last);
        }
        writer.join().unwrap();

        let current = client.current_identity();
        assert_eq!(current, None);
        for last in &last_seen {
            assert_eq!(*last.lock(), Some(current.clone()));
        }
        drop(subscriptions);
    }

    #[test]
    fn expiry_rejects_non_numeric_lifetime() {
        assert!(expiry_from("3600").is_ok());
        assert!(matches!(expiry_from("soon"), Err(DoctorFinderError::Network(_))));
    }
}
