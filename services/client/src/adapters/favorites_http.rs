//! services/client/src/adapters/favorites_http.rs
//!
//! This module contains the HTTP adapter for the favorites storage
//! collaborator. It implements the `FavoritesStore` port from the `core`
//! crate.
//!
//! Wire records carry a flattened snapshot with `instructions` as one text
//! blob; incoming records are rebuilt through the core normalizer so no
//! loose payload leaks past this boundary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartchef_core::domain::{FavoriteDraft, FavoriteRecord, RawIngredients, RawRecipe};
use smartchef_core::normalize::normalize;
use smartchef_core::ports::{FavoritesStore, PortError, PortResult};

use super::error_from_response;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `FavoritesStore` port against the recipe
/// backend's REST surface.
#[derive(Clone)]
pub struct HttpFavoritesStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpFavoritesStore {
    /// Creates a new `HttpFavoritesStore`.
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/favorites{}", self.base_url, suffix)
    }
}

//=========================================================================================
// Wire Record Structs
//=========================================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FavoritePayload<'a> {
    recipe_identifier: &'a str,
    title: &'a str,
    ingredients: &'a [String],
    instructions: String,
    image: &'a str,
    full_text: &'a str,
    saved_at: DateTime<Utc>,
}

impl<'a> FavoritePayload<'a> {
    fn from_draft(draft: &'a FavoriteDraft) -> Self {
        Self {
            recipe_identifier: &draft.recipe_identifier,
            title: &draft.snapshot.title,
            ingredients: &draft.snapshot.ingredients,
            instructions: draft.snapshot.steps.join("\n"),
            image: &draft.snapshot.image,
            full_text: &draft.snapshot.full_text,
            saved_at: draft.saved_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteRecordWire {
    recipe_identifier: String,
    #[serde(default)]
    owner_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    ingredients: Option<Vec<String>>,
    #[serde(default)]
    instructions: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    full_text: Option<String>,
    saved_at: DateTime<Utc>,
}

impl FavoriteRecordWire {
    /// Rebuilds the domain record, funnelling the flattened snapshot back
    /// through the normalizer so canonical invariants hold again.
    fn to_domain(self) -> FavoriteRecord {
        let raw = RawRecipe {
            identifier: Some(self.recipe_identifier.clone()),
            title: self.title,
            ingredients: self.ingredients.map(RawIngredients::List),
            instructions: self.instructions,
            image: self.image,
            full_text: self.full_text,
        };
        FavoriteRecord {
            recipe_identifier: self.recipe_identifier,
            owner_id: self.owner_id,
            snapshot: normalize(&raw),
            saved_at: self.saved_at,
        }
    }
}

#[derive(Deserialize)]
struct SaveResponse {
    #[serde(default)]
    favorite: Option<FavoriteRecordWire>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckResponse {
    is_favorited: bool,
}

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    favorites: Vec<FavoriteRecordWire>,
}

//=========================================================================================
// `FavoritesStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl FavoritesStore for HttpFavoritesStore {
    async fn save(&self, token: &str, draft: &FavoriteDraft) -> PortResult<FavoriteRecord> {
        let response = self
            .http
            .post(self.url(""))
            .bearer_auth(token)
            .json(&FavoritePayload::from_draft(draft))
            .send()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "favorites backend").await);
        }

        // The backend only promises a 200; when it echoes the stored record
        // we take it, otherwise the draft we sent is the snapshot of record.
        let echoed = response
            .json::<SaveResponse>()
            .await
            .ok()
            .and_then(|body| body.favorite);
        Ok(match echoed {
            Some(wire) => wire.to_domain(),
            None => FavoriteRecord {
                recipe_identifier: draft.recipe_identifier.clone(),
                owner_id: String::new(),
                snapshot: draft.snapshot.clone(),
                saved_at: draft.saved_at,
            },
        })
    }

    async fn contains(&self, token: &str, recipe_identifier: &str) -> PortResult<bool> {
        let response = self
            .http
            .get(self.url(&format!("/check/{}", recipe_identifier)))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "favorites backend").await);
        }

        let body: CheckResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(body.is_favorited)
    }

    async fn list(&self, token: &str) -> PortResult<Vec<FavoriteRecord>> {
        let response = self
            .http
            .get(self.url(""))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "favorites backend").await);
        }

        let body: ListResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(body.favorites.into_iter().map(FavoriteRecordWire::to_domain).collect())
    }

    async fn delete(&self, token: &str, recipe_identifier: &str) -> PortResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/{}", recipe_identifier)))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, recipe_identifier).await);
        }
        Ok(())
    }
}
