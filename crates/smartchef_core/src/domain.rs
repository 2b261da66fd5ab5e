//! crates/smartchef_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any wire format or storage backend.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// The closed set of display languages the app supports.
///
/// `English` is the native locale of all recipe content; the other variants
/// are translation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    English,
    Telugu,
    Hindi,
}

impl Locale {
    /// The native locale of canonical content. Translation always starts
    /// here, never from a previously localized result.
    pub const SOURCE: Locale = Locale::English;

    /// Two-letter code understood by the translation endpoint.
    pub fn code(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Telugu => "te",
            Locale::Hindi => "hi",
        }
    }

    pub fn is_source(self) -> bool {
        self == Self::SOURCE
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Locale::English => "english",
            Locale::Telugu => "telugu",
            Locale::Hindi => "hindi",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Ok(Locale::English),
            "telugu" | "te" => Ok(Locale::Telugu),
            "hindi" | "hi" => Ok(Locale::Hindi),
            other => Err(format!("'{}' is not a supported language", other)),
        }
    }
}

/// An untrusted recipe payload as delivered by the discovery, generation or
/// seasonal collaborators. Any field may be absent or malformed; the
/// normalizer is the only component that ever inspects one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecipe {
    pub identifier: Option<String>,
    pub title: Option<String>,
    pub ingredients: Option<RawIngredients>,
    pub instructions: Option<String>,
    pub image: Option<String>,
    pub full_text: Option<String>,
}

/// Ingredient payloads arrive either as a proper list or as a single
/// comma-separated string, depending on the upstream source.
#[derive(Debug, Clone, PartialEq)]
pub enum RawIngredients {
    List(Vec<String>),
    Text(String),
}

/// The normalized, locale-neutral recipe structure, derived exactly once
/// per raw input and trusted everywhere downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecipe {
    pub identifier: String,
    /// Never empty; defaulted when the source had no usable title.
    pub title: String,
    pub ingredients: Vec<String>,
    /// Ordered display steps; each ends with terminal punctuation.
    pub steps: Vec<String>,
    pub full_text: String,
    /// Possibly empty; the presentation layer decides on a placeholder.
    pub image: String,
}

/// A canonical recipe with its text fields translated into one target
/// locale. The image and identifier are locale-invariant and copied
/// through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedRecipe {
    pub locale: Locale,
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub full_text: String,
    pub image: String,
    pub identifier: String,
}

impl LocalizedRecipe {
    /// Mirrors the canonical text into a localized view without issuing a
    /// single translation request. Used for the source-locale fast path and
    /// as the whole-operation fallback.
    pub fn untranslated(canonical: &CanonicalRecipe, locale: Locale) -> Self {
        Self {
            locale,
            title: canonical.title.clone(),
            ingredients: canonical.ingredients.clone(),
            steps: canonical.steps.clone(),
            full_text: canonical.full_text.clone(),
            image: canonical.image.clone(),
            identifier: canonical.identifier.clone(),
        }
    }
}

/// The client's authentication state. Exactly one lives per process, owned
/// and written only by the `SessionGuard`.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub token: Option<String>,
    pub display_name: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// What the persistent credential store holds between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCredentials {
    pub token: String,
    pub display_name: Option<String>,
}

/// What the client currently knows about a recipe's favorite state.
///
/// `Unknown` covers both "not yet checked" and "the check failed"; a
/// failed lookup is never collapsed into `NotFavorited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteStatus {
    Favorited,
    NotFavorited,
    Unknown,
}

/// The document sent to the storage collaborator when saving a favorite.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteDraft {
    pub recipe_identifier: String,
    pub snapshot: CanonicalRecipe,
    pub saved_at: DateTime<Utc>,
}

/// A persisted association between a user and a recipe snapshot. Owned by
/// the storage collaborator, which guarantees at most one record per
/// (owner, recipe) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteRecord {
    pub recipe_identifier: String,
    /// Server-assigned and opaque to this client.
    pub owner_id: String,
    pub snapshot: CanonicalRecipe,
    pub saved_at: DateTime<Utc>,
}
