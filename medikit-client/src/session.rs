//! Authentication session.
//!
//! `AuthSession` owns the login/logout lifecycle and the cached auth
//! state. It is constructed with its gateway and credential store passed
//! in explicitly - there is no ambient global session.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use medikit_core::User;

use crate::credentials::{CredentialError, CredentialStore};
use crate::gateway::{Gateway, GatewayError, Method};
use crate::routes;

/// Error types for session operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    /// The backend answered 401. Deliberately not recovered from; the
    /// stored credential stays in place.
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other gateway failure
    #[error(transparent)]
    Gateway(GatewayError),

    /// Credential store failure
    #[error(transparent)]
    Credentials(#[from] CredentialError),
}

impl From<GatewayError> for SessionError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Unauthorized => SessionError::Unauthorized,
            other => SessionError::Gateway(other),
        }
    }
}

/// Cached authentication state.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    /// Bearer token, mirrored from the credential store
    pub token: Option<String>,
    /// The signed-in account
    pub user: Option<User>,
    /// Whether a login or restore succeeded
    pub authenticated: bool,
}

/// Registration fields for a new account.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
}

/// `{token, user}` as returned by login and register.
#[derive(Debug, Deserialize)]
struct AuthPayload {
    token: String,
    user: User,
}

/// `{user}` envelope.
#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

/// The authentication component, injected into whatever owns a screen.
pub struct AuthSession {
    gateway: Arc<dyn Gateway>,
    credentials: Arc<dyn CredentialStore>,
    state: RwLock<AuthState>,
}

impl AuthSession {
    /// Create a session over the given gateway and credential store.
    pub fn new(gateway: Arc<dyn Gateway>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            gateway,
            credentials,
            state: RwLock::new(AuthState::default()),
        }
    }

    /// Snapshot of the cached auth state.
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// Whether a login or restore succeeded.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.authenticated
    }

    /// Log in with mobile number and password.
    ///
    /// On success the token is written to the credential store (the only
    /// client-side persistence) and the state cache is updated.
    pub async fn login(&self, mobile: &str, password: &str) -> Result<User, SessionError> {
        let response = self
            .gateway
            .post(routes::LOGIN, json!({ "mobile": mobile, "password": password }))
            .await?;
        let payload: AuthPayload = response.json()?;

        self.credentials.store(&payload.token).await?;
        self.install(payload).await
    }

    /// Register a new account. A `{token, user}` answer signs the user in
    /// exactly like a login.
    pub async fn register(&self, new_user: &NewUser) -> Result<User, SessionError> {
        let body = serde_json::to_value(new_user)
            .map_err(|e| SessionError::Gateway(GatewayError::ParseError(e.to_string())))?;
        let response = self.gateway.post(routes::REGISTER, body).await?;
        let payload: AuthPayload = response.json()?;

        self.credentials.store(&payload.token).await?;
        self.install(payload).await
    }

    /// Rehydrate the session at startup from a stored credential.
    ///
    /// Returns `Ok(false)` when no credential exists; the session then
    /// stays unauthenticated without touching the network.
    pub async fn restore(&self) -> Result<bool, SessionError> {
        let Some(token) = self.credentials.load().await? else {
            return Ok(false);
        };

        let user = self.current_user().await?;
        let mut state = self.state.write().await;
        *state = AuthState {
            token: Some(token),
            user: Some(user),
            authenticated: true,
        };
        info!("session restored from stored credential");
        Ok(true)
    }

    /// Fetch the signed-in account from the backend.
    pub async fn current_user(&self) -> Result<User, SessionError> {
        let response = self.gateway.get(routes::CURRENT_USER).await?;
        let envelope: UserEnvelope = response.json()?;
        Ok(envelope.user)
    }

    /// Log out: tell the backend (best effort), then clear the credential
    /// and the cached state unconditionally.
    pub async fn logout(&self) -> Result<(), SessionError> {
        if let Err(e) = self
            .gateway
            .request(Method::Post, routes::LOGOUT, None)
            .await
        {
            warn!(error = %e, "server-side logout failed, clearing local session anyway");
        }

        self.credentials.clear().await?;
        *self.state.write().await = AuthState {
            token: None,
            user: None,
            authenticated: false,
        };
        info!("session cleared");
        Ok(())
    }

    async fn install(&self, payload: AuthPayload) -> Result<User, SessionError> {
        let mut state = self.state.write().await;
        *state = AuthState {
            token: Some(payload.token),
            user: Some(payload.user.clone()),
            authenticated: true,
        };
        info!(user = %payload.user.username, "signed in");
        Ok(payload.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MemoryCredentialStore;
    use crate::gateway::MockGateway;
    use serde_json::json;

    fn user_json() -> serde_json::Value {
        json!({"_id": "u1", "username": "kim"})
    }

    #[tokio::test]
    async fn test_login_stores_token_and_state() {
        let gateway = Arc::new(MockGateway::new().with_response(
            Method::Post,
            routes::LOGIN,
            200,
            json!({"token": "tok-1", "user": user_json()}),
        ));
        let credentials = Arc::new(MemoryCredentialStore::new());
        let session = AuthSession::new(gateway, credentials.clone());

        let user = session.login("0700123123", "hunter2").await.unwrap();
        assert_eq!(user.username, "kim");
        assert_eq!(credentials.load().await.unwrap().as_deref(), Some("tok-1"));
        assert!(session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_register_signs_in_like_login() {
        let gateway = Arc::new(MockGateway::new().with_response(
            Method::Post,
            routes::REGISTER,
            201,
            json!({"token": "tok-2", "user": user_json()}),
        ));
        let credentials = Arc::new(MemoryCredentialStore::new());
        let session = AuthSession::new(gateway, credentials.clone());

        session
            .register(&NewUser {
                username: "kim".into(),
                email: "kim@example.com".into(),
                mobile: "0700123123".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap();

        assert_eq!(credentials.load().await.unwrap().as_deref(), Some("tok-2"));
        assert!(session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_restore_without_credential_is_offline() {
        let gateway = Arc::new(MockGateway::new());
        let session = AuthSession::new(gateway.clone(), Arc::new(MemoryCredentialStore::new()));

        assert!(!session.restore().await.unwrap());
        assert_eq!(gateway.call_count(), 0);
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_restore_with_credential_fetches_user() {
        let gateway = Arc::new(MockGateway::new().with_response(
            Method::Get,
            routes::CURRENT_USER,
            200,
            json!({"user": user_json()}),
        ));
        let session = AuthSession::new(
            gateway,
            Arc::new(MemoryCredentialStore::with_token("tok-1")),
        );

        assert!(session.restore().await.unwrap());
        let state = session.state().await;
        assert_eq!(state.token.as_deref(), Some("tok-1"));
        assert_eq!(state.user.unwrap().id, "u1");
    }

    #[tokio::test]
    async fn test_unauthorized_keeps_credential() {
        let gateway = Arc::new(MockGateway::new().with_error(
            Method::Get,
            routes::CURRENT_USER,
            GatewayError::Unauthorized,
        ));
        let credentials = Arc::new(MemoryCredentialStore::with_token("stale"));
        let session = AuthSession::new(gateway, credentials.clone());

        let result = session.restore().await;
        assert!(matches!(result, Err(SessionError::Unauthorized)));
        // 401 is a no-op: the stored credential survives
        assert_eq!(credentials.load().await.unwrap().as_deref(), Some("stale"));
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_fails() {
        let gateway = Arc::new(MockGateway::new().with_error(
            Method::Post,
            routes::LOGOUT,
            GatewayError::ServerRejected {
                status: 500,
                message: "boom".into(),
            },
        ));
        let credentials = Arc::new(MemoryCredentialStore::with_token("tok-1"));
        let session = AuthSession::new(gateway, credentials.clone());

        session.logout().await.unwrap();
        assert_eq!(credentials.load().await.unwrap(), None);
        assert!(!session.is_authenticated().await);
    }
}
