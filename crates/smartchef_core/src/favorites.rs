//! crates/smartchef_core/src/favorites.rs
//!
//! The mutation surface for bookmarking recipes. Composes the session guard
//! (authentication) with the storage collaborator (persistence) and owns the
//! idempotency and conflict rules of the favoriting contract.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{CanonicalRecipe, FavoriteDraft, FavoriteRecord, FavoriteStatus};
use crate::ports::{FavoritesStore, PortError};
use crate::session::{AuthCheck, SessionGuard};

/// Errors surfaced by favorite operations, one variant per taxonomy entry.
#[derive(Debug, thiserror::Error)]
pub enum FavoriteError {
    /// No token is present; prompt for sign-in. No network call was made
    /// and no session state changed.
    #[error("Not signed in")]
    Unauthenticated,
    /// The token expired. The session has already been invalidated; the
    /// caller must re-authenticate. Never retried automatically.
    #[error("Session expired")]
    Expired,
    /// Generic authentication failure, e.g. a malformed token. Session
    /// state is untouched.
    #[error("Authentication failed: {0}")]
    Auth(String),
    /// The favorite does not exist server-side. Client state is likely
    /// stale; the caller should reconcile, e.g. by re-fetching the list.
    #[error("Favorite not found: {0}")]
    NotFound(String),
    /// The collaborator was unreachable or failed internally. Means "try
    /// again", never a negative result.
    #[error("Favorites service unavailable: {0}")]
    Unavailable(String),
}

pub struct FavoritesGateway {
    store: Arc<dyn FavoritesStore>,
    guard: Arc<SessionGuard>,
}

impl FavoritesGateway {
    pub fn new(store: Arc<dyn FavoritesStore>, guard: Arc<SessionGuard>) -> Self {
        Self { store, guard }
    }

    async fn require_token(&self) -> Result<String, FavoriteError> {
        self.guard
            .current_token()
            .await
            .ok_or(FavoriteError::Unauthenticated)
    }

    /// Maps a port failure through the session guard's interpretation.
    async fn classify(&self, error: PortError) -> FavoriteError {
        match error {
            PortError::NotFound(what) => FavoriteError::NotFound(what),
            PortError::Rejected { status, message } => {
                match self.guard.interpret(status, &message).await {
                    AuthCheck::Expired => FavoriteError::Expired,
                    AuthCheck::Unauthenticated => FavoriteError::Unauthenticated,
                    AuthCheck::Ok | AuthCheck::OtherClientError(_) => FavoriteError::Auth(message),
                }
            }
            PortError::Network(detail) | PortError::Unexpected(detail) => {
                FavoriteError::Unavailable(detail)
            }
        }
    }

    /// Read-only favorite lookup. A transport or server failure yields
    /// `Unknown`, never `NotFavorited`, so the caller's UI cannot present
    /// a failed check as a negative answer.
    pub async fn check(&self, recipe_identifier: &str) -> Result<FavoriteStatus, FavoriteError> {
        let token = self.require_token().await?;
        match self.store.contains(&token, recipe_identifier).await {
            Ok(true) => Ok(FavoriteStatus::Favorited),
            Ok(false) => Ok(FavoriteStatus::NotFavorited),
            Err(PortError::Rejected { status, message }) => {
                match self.guard.interpret(status, &message).await {
                    AuthCheck::Expired => Err(FavoriteError::Expired),
                    AuthCheck::Unauthenticated => Err(FavoriteError::Unauthenticated),
                    _ => Err(FavoriteError::Auth(message)),
                }
            }
            Err(e) => {
                warn!("Favorite lookup failed: {}; status unknown", e);
                Ok(FavoriteStatus::Unknown)
            }
        }
    }

    /// Saves a favorite snapshot of the canonical recipe.
    ///
    /// Re-adding an already-favorited recipe is not rejected here; the
    /// storage collaborator decides de-duplication. An `Expired` rejection
    /// is surfaced for re-authentication, never retried.
    pub async fn add(&self, canonical: &CanonicalRecipe) -> Result<FavoriteRecord, FavoriteError> {
        let token = self.require_token().await?;

        let mut snapshot = canonical.clone();
        if snapshot.identifier.is_empty() {
            // Recipes from id-less sources still need a stable key.
            snapshot.identifier = Uuid::new_v4().to_string();
        }
        let draft = FavoriteDraft {
            recipe_identifier: snapshot.identifier.clone(),
            snapshot,
            saved_at: Utc::now(),
        };

        match self.store.save(&token, &draft).await {
            Ok(record) => {
                info!("Saved favorite {}", record.recipe_identifier);
                Ok(record)
            }
            Err(e) => Err(self.classify(e).await),
        }
    }

    /// Removes one favorite. A missing favorite is a reported failure, not
    /// silently ignored, since it usually means the client's cached
    /// favorite view is stale.
    pub async fn remove(&self, recipe_identifier: &str) -> Result<(), FavoriteError> {
        let token = self.require_token().await?;
        match self.store.delete(&token, recipe_identifier).await {
            Ok(()) => {
                info!("Removed favorite {}", recipe_identifier);
                Ok(())
            }
            Err(e) => Err(self.classify(e).await),
        }
    }

    /// Fetches the signed-in user's saved favorites.
    pub async fn list(&self) -> Result<Vec<FavoriteRecord>, FavoriteError> {
        let token = self.require_token().await?;
        match self.store.list(&token).await {
            Ok(records) => Ok(records),
            Err(e) => Err(self.classify(e).await),
        }
    }
}
