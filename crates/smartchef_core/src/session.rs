//! crates/smartchef_core/src/session.rs
//!
//! Bearer-token session lifecycle. The guard owns the single process-wide
//! session and is the only writer of the persisted credentials; everything
//! that needs the token re-reads it through the guard per use, since
//! invalidation can happen while other operations are in flight.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::{Session, StoredCredentials};
use crate::ports::{AccountService, CredentialStore, PortError, PortResult};

/// How an authorization-relevant response should be acted upon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCheck {
    /// The request was accepted.
    Ok,
    /// No token is present at all. Prompt for sign-in; clear nothing.
    Unauthenticated,
    /// The server rejected an expired token. Local session state has
    /// already been invalidated by the time this value is returned.
    Expired,
    /// Any other client-side rejection, e.g. a malformed token. Session
    /// state is left untouched so a transient server issue is not turned
    /// into a forced logout.
    OtherClientError(String),
}

/// Marker the collaborators put into rejection bodies for expired tokens.
const EXPIRY_MARKER: &str = "expired";

pub struct SessionGuard {
    store: Arc<dyn CredentialStore>,
    session: RwLock<Session>,
}

impl SessionGuard {
    /// Creates the guard and primes it from persistent storage. Called once
    /// per process, before any component needs a token. An unreadable store
    /// degrades to a signed-out session.
    pub async fn bootstrap(store: Arc<dyn CredentialStore>) -> Self {
        let session = match store.load().await {
            Ok(Some(credentials)) => {
                info!(
                    "Restored session for {}",
                    credentials.display_name.as_deref().unwrap_or("<unnamed>")
                );
                Session {
                    token: Some(credentials.token),
                    display_name: credentials.display_name,
                }
            }
            Ok(None) => Session::default(),
            Err(e) => {
                warn!("Could not read persisted credentials: {}; starting signed out", e);
                Session::default()
            }
        };
        Self {
            store,
            session: RwLock::new(session),
        }
    }

    pub async fn current_token(&self) -> Option<String> {
        self.session.read().await.token.clone()
    }

    pub async fn display_name(&self) -> Option<String> {
        self.session.read().await.display_name.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    /// Installs a fresh token after a successful sign-in and persists it.
    pub async fn establish(&self, token: String, display_name: Option<String>) -> PortResult<()> {
        self.store
            .save(&StoredCredentials {
                token: token.clone(),
                display_name: display_name.clone(),
            })
            .await?;
        let mut session = self.session.write().await;
        session.token = Some(token);
        session.display_name = display_name;
        Ok(())
    }

    /// Clears the persisted token and the cached display name. Where the
    /// user lands afterwards is the caller's responsibility.
    pub async fn invalidate(&self) {
        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear persisted credentials: {}", e);
        }
        let mut session = self.session.write().await;
        session.token = None;
        session.display_name = None;
    }

    /// Classifies an authorization-relevant response.
    ///
    /// An expiry marker in a 400/401 body invalidates the session before
    /// `Expired` is returned, so a follow-up `current_token` already comes
    /// back empty. Any other 400/401 leaves session state alone.
    pub async fn interpret(&self, status: u16, body_message: &str) -> AuthCheck {
        if (200..300).contains(&status) {
            return AuthCheck::Ok;
        }
        if status == 401 || status == 400 {
            if body_message.to_lowercase().contains(EXPIRY_MARKER) {
                info!("Server reports an expired token; invalidating local session");
                self.invalidate().await;
                return AuthCheck::Expired;
            }
            if !self.is_authenticated().await {
                return AuthCheck::Unauthenticated;
            }
            return AuthCheck::OtherClientError(body_message.to_string());
        }
        AuthCheck::OtherClientError(body_message.to_string())
    }

    /// Signs in against the account collaborator and installs the returned
    /// bearer token.
    pub async fn sign_in_with(
        &self,
        accounts: &dyn AccountService,
        username: &str,
        password: &str,
    ) -> PortResult<()> {
        let signed_in = accounts.sign_in(username, password).await?;
        info!(
            "Signed in as {}",
            signed_in.display_name.as_deref().unwrap_or(username)
        );
        self.establish(signed_in.token, signed_in.display_name).await
    }

    /// Deletes the account behind the current token, then drops the local
    /// session.
    pub async fn delete_account_with(&self, accounts: &dyn AccountService) -> PortResult<()> {
        let Some(token) = self.current_token().await else {
            return Err(PortError::Rejected {
                status: 401,
                message: "not signed in".to_string(),
            });
        };
        accounts.delete_account(&token).await?;
        self.invalidate().await;
        info!("Account deleted; local session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SignedIn;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MemoryCredentialStore {
        slot: Mutex<Option<StoredCredentials>>,
    }

    impl MemoryCredentialStore {
        fn with(token: &str, name: &str) -> Self {
            Self {
                slot: Mutex::new(Some(StoredCredentials {
                    token: token.to_string(),
                    display_name: Some(name.to_string()),
                })),
            }
        }
    }

    #[async_trait]
    impl CredentialStore for MemoryCredentialStore {
        async fn load(&self) -> PortResult<Option<StoredCredentials>> {
            Ok(self.slot.lock().await.clone())
        }

        async fn save(&self, credentials: &StoredCredentials) -> PortResult<()> {
            *self.slot.lock().await = Some(credentials.clone());
            Ok(())
        }

        async fn clear(&self) -> PortResult<()> {
            *self.slot.lock().await = None;
            Ok(())
        }
    }

    async fn guard_with_token() -> (Arc<MemoryCredentialStore>, SessionGuard) {
        let store = Arc::new(MemoryCredentialStore::with("token-1", "ravi"));
        let guard = SessionGuard::bootstrap(store.clone()).await;
        (store, guard)
    }

    #[tokio::test]
    async fn bootstrap_restores_persisted_credentials() {
        let (_store, guard) = guard_with_token().await;
        assert_eq!(guard.current_token().await, Some("token-1".to_string()));
        assert_eq!(guard.display_name().await, Some("ravi".to_string()));
        assert!(guard.is_authenticated().await);
    }

    #[tokio::test]
    async fn bootstrap_with_empty_store_starts_signed_out() {
        let guard = SessionGuard::bootstrap(Arc::new(MemoryCredentialStore::default())).await;
        assert_eq!(guard.current_token().await, None);
        assert!(!guard.is_authenticated().await);
    }

    #[tokio::test]
    async fn expired_rejection_invalidates_the_session() {
        let (store, guard) = guard_with_token().await;
        let verdict = guard.interpret(401, "token expired").await;

        assert_eq!(verdict, AuthCheck::Expired);
        assert_eq!(guard.current_token().await, None);
        assert_eq!(guard.display_name().await, None);
        assert_eq!(*store.slot.lock().await, None);
    }

    #[tokio::test]
    async fn malformed_token_rejection_leaves_the_session_alone() {
        let (store, guard) = guard_with_token().await;
        let verdict = guard.interpret(401, "Invalid token").await;

        assert_eq!(verdict, AuthCheck::OtherClientError("Invalid token".to_string()));
        assert_eq!(guard.current_token().await, Some("token-1".to_string()));
        assert!(store.slot.lock().await.is_some());
    }

    #[tokio::test]
    async fn rejection_without_any_token_is_unauthenticated() {
        let guard = SessionGuard::bootstrap(Arc::new(MemoryCredentialStore::default())).await;
        let verdict = guard.interpret(401, "Access denied. No token provided.").await;
        assert_eq!(verdict, AuthCheck::Unauthenticated);
    }

    #[tokio::test]
    async fn success_statuses_interpret_as_ok() {
        let (_store, guard) = guard_with_token().await;
        assert_eq!(guard.interpret(200, "").await, AuthCheck::Ok);
    }

    #[tokio::test]
    async fn sign_in_establishes_and_persists_the_token() {
        struct FakeAccounts;

        #[async_trait]
        impl AccountService for FakeAccounts {
            async fn sign_in(&self, username: &str, _password: &str) -> PortResult<SignedIn> {
                Ok(SignedIn {
                    token: "fresh-token".to_string(),
                    display_name: Some(username.to_string()),
                })
            }

            async fn sign_up(&self, _username: &str, _password: &str) -> PortResult<()> {
                Ok(())
            }

            async fn delete_account(&self, _token: &str) -> PortResult<()> {
                Ok(())
            }
        }

        let store = Arc::new(MemoryCredentialStore::default());
        let guard = SessionGuard::bootstrap(store.clone()).await;
        guard.sign_in_with(&FakeAccounts, "ravi", "secret").await.unwrap();

        assert_eq!(guard.current_token().await, Some("fresh-token".to_string()));
        assert_eq!(
            store.slot.lock().await.as_ref().map(|c| c.token.clone()),
            Some("fresh-token".to_string())
        );
    }
}
