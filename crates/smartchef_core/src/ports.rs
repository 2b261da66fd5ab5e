//! crates/smartchef_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of the concrete HTTP and storage collaborators.

use async_trait::async_trait;

use crate::domain::{FavoriteDraft, FavoriteRecord, Locale, RawRecipe, StoredCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The collaborator answered with a client-error status. Carries the
    /// status and body message so the session guard can tell an expired
    /// token apart from a malformed one.
    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    /// The collaborator was unreachable or failed on its side. Kept apart
    /// from `Rejected` so callers never mistake "could not ask" for "said no".
    #[error("Network or server error: {0}")]
    Network(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Translates one atomic unit of text between two locales.
    ///
    /// Best effort: the service is unauthenticated and rate-limit-unaware;
    /// degradation on failure is the orchestrator's responsibility.
    async fn translate(&self, text: &str, source: Locale, target: Locale) -> PortResult<String>;
}

/// The favorites persistence collaborator. The bearer token is passed per
/// call; implementations attach it to the outgoing request.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Persists one favorite snapshot. De-duplication of repeated saves for
    /// the same recipe is the collaborator's decision, not the caller's.
    async fn save(&self, token: &str, draft: &FavoriteDraft) -> PortResult<FavoriteRecord>;

    /// Whether the given recipe is already among the user's favorites.
    async fn contains(&self, token: &str, recipe_identifier: &str) -> PortResult<bool>;

    async fn list(&self, token: &str) -> PortResult<Vec<FavoriteRecord>>;

    /// Removes one favorite. A missing record is `PortError::NotFound`.
    async fn delete(&self, token: &str, recipe_identifier: &str) -> PortResult<()>;
}

/// Persistent client-side storage for the bearer token and cached display
/// name. Read once at process start; written only by the `SessionGuard`.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> PortResult<Option<StoredCredentials>>;
    async fn save(&self, credentials: &StoredCredentials) -> PortResult<()>;
    async fn clear(&self) -> PortResult<()>;
}

/// A successful sign-in response from the account collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedIn {
    pub token: String,
    pub display_name: Option<String>,
}

#[async_trait]
pub trait AccountService: Send + Sync {
    async fn sign_in(&self, username: &str, password: &str) -> PortResult<SignedIn>;

    /// Registers a new account. No token is issued; sign-in is a separate step.
    async fn sign_up(&self, username: &str, password: &str) -> PortResult<()>;

    async fn delete_account(&self, token: &str) -> PortResult<()>;
}

#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Fetches one random recipe suggestion from the discovery collaborator.
    async fn random_recipe(&self, persons: u32, locale: Locale) -> PortResult<RawRecipe>;

    /// Invokes the recipe-generation model with a fully rendered prompt and
    /// returns its raw text output.
    async fn generate_recipe(&self, prompt: &str) -> PortResult<String>;
}
