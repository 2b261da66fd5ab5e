//! services/client/src/adapters/recipes_http.rs
//!
//! This module contains the HTTP adapter for the recipe discovery and
//! generation collaborators. It implements the `RecipeSource` port from the
//! `core` crate.
//!
//! Inbound recipe payloads are deliberately loose (identifiers under `id`
//! or `_id`, ingredients as a list or one comma string) and are carried
//! into the domain's raw sum type untouched; only the normalizer interprets
//! them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use smartchef_core::domain::{Locale, RawIngredients, RawRecipe};
use smartchef_core::ports::{PortError, PortResult, RecipeSource};

use super::error_from_response;

/// An adapter that implements the `RecipeSource` port against the recipe
/// backend's discovery and generation routes.
#[derive(Clone)]
pub struct HttpRecipeSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRecipeSource {
    /// Creates a new `HttpRecipeSource`.
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IngredientsWire {
    List(Vec<String>),
    Text(String),
}

#[derive(Deserialize)]
struct RawRecipeWire {
    #[serde(default, alias = "_id")]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    ingredients: Option<IngredientsWire>,
    #[serde(default)]
    instructions: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    full_text: Option<String>,
}

impl RawRecipeWire {
    fn to_domain(self) -> RawRecipe {
        RawRecipe {
            identifier: self.id,
            title: self.title,
            ingredients: self.ingredients.map(|wire| match wire {
                IngredientsWire::List(items) => RawIngredients::List(items),
                IngredientsWire::Text(text) => RawIngredients::Text(text),
            }),
            instructions: self.instructions,
            image: self.image,
            full_text: self.full_text,
        }
    }
}

#[derive(Deserialize)]
struct RandomRecipeResponse {
    recipe: RawRecipeWire,
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    generated_text: String,
}

#[async_trait]
impl RecipeSource for HttpRecipeSource {
    async fn random_recipe(&self, persons: u32, locale: Locale) -> PortResult<RawRecipe> {
        let response = self
            .http
            .get(format!("{}/random-recipe", self.base_url))
            .query(&[
                ("persons", persons.to_string()),
                ("language", locale.to_string()),
            ])
            .send()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "recipe feed").await);
        }

        let body: RandomRecipeResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(body.recipe.to_domain())
    }

    async fn generate_recipe(&self, prompt: &str) -> PortResult<String> {
        let response = self
            .http
            .post(format!("{}/generate", self.base_url))
            .json(&GenerateBody { prompt })
            .send()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "recipe generator").await);
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(body.generated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn recipes_with_an_underscore_id_still_carry_their_identifier() {
        let wire: RawRecipeWire = serde_json::from_value(serde_json::json!({
            "_id": "abc123",
            "title": "Soup"
        }))
        .unwrap();
        let raw = wire.to_domain();
        assert_eq!(raw.identifier.as_deref(), Some("abc123"));
        assert_eq!(raw.title.as_deref(), Some("Soup"));
    }

    #[test]
    fn ingredients_deserialize_from_both_wire_shapes() {
        let as_list: RawRecipeWire = serde_json::from_value(serde_json::json!({
            "ingredients": ["water", "salt"]
        }))
        .unwrap();
        assert_eq!(
            as_list.to_domain().ingredients,
            Some(RawIngredients::List(vec![
                "water".to_string(),
                "salt".to_string()
            ]))
        );

        let as_text: RawRecipeWire = serde_json::from_value(serde_json::json!({
            "ingredients": "water, salt"
        }))
        .unwrap();
        assert_eq!(
            as_text.to_domain().ingredients,
            Some(RawIngredients::Text("water, salt".to_string()))
        );
    }

    #[test]
    fn entirely_empty_payloads_deserialize_to_an_empty_raw_recipe() {
        let wire: RawRecipeWire = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(wire.to_domain(), RawRecipe::default());
    }
}
