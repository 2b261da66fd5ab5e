//! crates/smartchef_core/src/normalize.rs
//!
//! Turns an arbitrary, loosely-structured recipe payload into the canonical
//! shape that everything downstream renders, translates and persists.
//!
//! Normalization never fails: absent or malformed fields degrade to safe
//! defaults rather than surfacing an error. A recipe with zero derivable
//! steps or ingredients is still valid; rendering the "unavailable" state
//! for those sections is the presentation layer's job.

use regex::Regex;

use crate::domain::{CanonicalRecipe, RawIngredients, RawRecipe};

/// Title used when the source payload has none.
pub const UNTITLED: &str = "Untitled Recipe";

/// Marker that separates preamble noise from the recipe body in generated
/// full-text blobs.
const TITLE_MARKER: &str = "TITLE:";

/// Derives the canonical recipe from an untrusted payload.
///
/// Idempotent: normalizing a value that is already canonical yields an
/// identical result.
pub fn normalize(raw: &RawRecipe) -> CanonicalRecipe {
    let title = match raw.title.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => UNTITLED.to_string(),
    };

    CanonicalRecipe {
        identifier: raw.identifier.clone().unwrap_or_default(),
        title,
        ingredients: derive_ingredients(raw.ingredients.as_ref()),
        steps: split_steps(raw.instructions.as_deref().unwrap_or_default()),
        full_text: clean_full_text(raw.full_text.as_deref().unwrap_or_default()).to_string(),
        image: raw.image.clone().unwrap_or_default(),
    }
}

fn derive_ingredients(raw: Option<&RawIngredients>) -> Vec<String> {
    match raw {
        Some(RawIngredients::List(items)) => items
            .iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        Some(RawIngredients::Text(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

/// Splits free-form instruction text into ordered, displayable steps.
///
/// Newline boundaries win; when they yield at most one fragment the text is
/// re-split on sentence-ending periods. Fragments that are only a list
/// number ("3" or "3.") are artifacts of numbered source text and dropped.
/// Every surviving step has interior newlines collapsed and ends with
/// terminal punctuation. Source order is preserved; this is the canonical
/// step order used everywhere downstream.
pub fn split_steps(instructions: &str) -> Vec<String> {
    if instructions.trim().is_empty() {
        return Vec::new();
    }

    let mut fragments: Vec<&str> = instructions
        .split('\n')
        .filter(|fragment| !fragment.trim().is_empty())
        .collect();

    if fragments.len() <= 1 {
        let sentence_break = Regex::new(r"\.\s+").unwrap();
        fragments = sentence_break
            .split(instructions)
            .filter(|fragment| !fragment.trim().is_empty())
            .collect();
    }

    let list_number = Regex::new(r"^\d+\.?$").unwrap();

    fragments
        .into_iter()
        .map(str::trim)
        .filter(|fragment| !list_number.is_match(fragment))
        .map(|fragment| {
            let mut step = fragment.replace('\n', " ").trim().to_string();
            if !matches!(step.chars().last(), Some('.') | Some('!') | Some('?')) {
                step.push('.');
            }
            step
        })
        .collect()
}

/// Truncates a generated full-text blob to start at the `TITLE:` marker,
/// discarding any preamble. Text without the marker passes through as is.
fn clean_full_text(text: &str) -> &str {
    match text.find(TITLE_MARKER) {
        Some(position) => &text[position..],
        None => text,
    }
}
