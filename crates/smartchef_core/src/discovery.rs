//! crates/smartchef_core/src/discovery.rs
//!
//! Random-recipe retrieval with duplicate suppression. The upstream feed
//! occasionally serves the same recipe twice in a row; fetching is a
//! bounded loop with an explicit give-up error, so a degenerate feed can
//! never drive unbounded retries.

use tracing::debug;

use crate::domain::{Locale, RawRecipe};
use crate::ports::{PortError, RecipeSource};

/// How many times the feed is asked before giving up on a fresh recipe.
pub const MAX_FETCH_ATTEMPTS: u32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// Every attempt returned the recipe the caller already had.
    #[error("The recipe feed returned duplicates {0} times in a row")]
    Exhausted(u32),
    #[error(transparent)]
    Source(#[from] PortError),
}

/// Fetches a random recipe whose identifier differs from `last_identifier`.
pub async fn fresh_random_recipe(
    source: &dyn RecipeSource,
    persons: u32,
    locale: Locale,
    last_identifier: Option<&str>,
) -> Result<RawRecipe, DiscoveryError> {
    for attempt in 1..=MAX_FETCH_ATTEMPTS {
        let raw = source.random_recipe(persons, locale).await?;
        match (raw.identifier.as_deref(), last_identifier) {
            (Some(id), Some(last)) if id == last => {
                debug!("Attempt {}: feed repeated recipe {}", attempt, id);
            }
            _ => return Ok(raw),
        }
    }
    Err(DiscoveryError::Exhausted(MAX_FETCH_ATTEMPTS))
}
