// Identity collaborator: who is making the booking request
//
// The requester id only becomes known once an asynchronous sign-in
// handshake has completed. Until then there is no identity.

use async_trait::async_trait;
use tokio::sync::watch;

#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    // Current requester id, `None` while the handshake is unresolved or signed out
    async fn current_identity(&self) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Pending,
    SignedIn(String),
    SignedOut,
}

impl AuthState {
    pub fn is_ready(&self) -> bool {
        !matches!(self, AuthState::Pending)
    }
}

/// Sign-in session backed by a watch channel.
///
/// `sign_in` / `sign_out` fire the readiness signal; `ready` waits for it.
/// There is no timeout: wrap `ready` in `tokio::time::timeout` if needed.
pub struct AuthSession {
    state: watch::Sender<AuthState>,
}

impl AuthSession {
    pub fn new() -> Self {
        let (state, _) = watch::channel(AuthState::Pending);
        Self { state }
    }

    pub fn sign_in(&self, user_id: &str) {
        self.state.send_replace(AuthState::SignedIn(user_id.to_string()));
    }

    pub fn sign_out(&self) {
        self.state.send_replace(AuthState::SignedOut);
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().is_ready()
    }

    // Resolves once the handshake has completed, with the signed-in user if any
    pub async fn ready(&self) -> Option<String> {
        let mut receiver = self.state.subscribe();
        let state = match receiver.wait_for(AuthState::is_ready).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so the channel cannot close while we wait
            Err(_) => AuthState::SignedOut,
        };
        match state {
            AuthState::SignedIn(user_id) => Some(user_id),
            _ => None,
        }
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for AuthSession {
    async fn current_identity(&self) -> Option<String> {
        let state = self.state.borrow().clone();
        match state {
            AuthState::SignedIn(user_id) => Some(user_id),
            _ => None,
        }
    }
}

// Fixed identity, for server-side callers that already authenticated the requester
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(Option<String>);

impl StaticIdentity {
    pub fn new(user_id: &str) -> Self {
        Self(Some(user_id.to_string()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_identity(&self) -> Option<String> {
        self.0.clone()
    }
}
