//! crates/smartchef_core/src/generate.rs
//!
//! Prompt construction for the recipe-generation model and parsing of its
//! sectioned text output into a raw recipe payload. The model invocation
//! itself stays behind the `RecipeSource` port.

use crate::domain::{RawIngredients, RawRecipe};
use crate::ports::{PortResult, RecipeSource};

/// What the user asked the generator for.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub ingredients: String,
    pub persons: u32,
    pub meal_type: String,
}

/// Renders the generation prompt, pinning the sectioned output format the
/// parser below understands.
pub fn build_prompt(request: &GenerationRequest) -> String {
    format!(
        "Generate a recipe with the following requirements:\n\
         Ingredients: {}\n\
         Number of persons: {}\n\
         Meal type: {}\n\n\
         Please provide the recipe in the following format:\n\
         Title:\n\
         Description:\n\
         Ingredients (with quantities for {} persons):\n\
         Instructions (step by step):",
        request.ingredients, request.persons, request.meal_type, request.persons
    )
}

/// Parses the generator's sectioned output into a raw payload for the
/// normalizer. Sections are blank-line separated; unrecognized ones are
/// ignored. The complete output is kept as the full text.
pub fn parse_generated(text: &str) -> RawRecipe {
    let mut recipe = RawRecipe {
        full_text: Some(text.to_string()),
        ..RawRecipe::default()
    };

    for section in text.split("\n\n") {
        let section = section.trim();
        if let Some(rest) = section.strip_prefix("Title:") {
            recipe.title = Some(rest.trim().to_string());
        } else if let Some(rest) = section.strip_prefix("Ingredients:") {
            let items: Vec<String> = rest
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
            recipe.ingredients = Some(RawIngredients::List(items));
        } else if let Some(rest) = section.strip_prefix("Instructions:") {
            recipe.instructions = Some(rest.trim().to_string());
        }
    }

    recipe
}

/// Asks the generation collaborator for a recipe and parses its output.
pub async fn generate(
    source: &dyn RecipeSource,
    request: &GenerationRequest,
) -> PortResult<RawRecipe> {
    let prompt = build_prompt(request);
    let text = source.generate_recipe(&prompt).await?;
    Ok(parse_generated(&text))
}
