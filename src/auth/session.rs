use tokio::sync::watch;
use tracing::info;

use crate::api::ApiClient;

/// Snapshot of the current authentication state.
///
/// Invariant: `token` is `Some(t)` exactly when `client` is the
/// authenticated variant bound to `t`. The two are only ever replaced
/// together, never patched individually.
#[derive(Debug, Clone)]
pub struct Session {
    token: Option<String>,
    client: ApiClient,
}

impl Session {
    fn anonymous(client: ApiClient) -> Self {
        Self {
            token: None,
            client,
        }
    }

    fn authenticated(base: &ApiClient, token: String) -> Self {
        Self {
            client: base.with_token(&token),
            token: Some(token),
        }
    }

    /// The bearer token, if authenticated.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The client to use for resource reads under this session.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Owner of the session, created once at startup and shared by reference
/// with every consumer.
///
/// Reads are concurrent-safe snapshots; the single mutation path is
/// `authenticate`, which swaps the whole session value atomically and
/// notifies subscribers. There is no logout.
#[derive(Debug)]
pub struct SessionStore {
    base: ApiClient,
    tx: watch::Sender<Session>,
}

impl SessionStore {
    /// Create an anonymous store around an unauthenticated client.
    pub fn new(base: ApiClient) -> Self {
        let (tx, _rx) = watch::channel(Session::anonymous(base.clone()));
        Self { base, tx }
    }

    /// Create a store already bound to a fixed token, bypassing the
    /// interactive authentication flow.
    pub fn with_token(base: ApiClient, token: impl Into<String>) -> Self {
        let store = Self::new(base);
        store.authenticate(token);
        store
    }

    /// The unauthenticated client, used by the authentication endpoints
    /// regardless of the current session.
    pub fn api(&self) -> &ApiClient {
        &self.base
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Watch for session changes. The receiver observes each
    /// replacement; consumers re-read `current` (or borrow) on change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    /// Replace the session with one authenticated by `token`.
    pub fn authenticate(&self, token: impl Into<String>) {
        let session = Session::authenticated(&self.base, token.into());
        info!("session authenticated");
        self.tx.send_replace(session);
    }
}
