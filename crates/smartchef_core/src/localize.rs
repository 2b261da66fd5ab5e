//! crates/smartchef_core/src/localize.rs
//!
//! Per-field translation orchestration. Translation always starts from the
//! retained canonical original, never from a previously localized result,
//! so repeating a localization cannot compound translation error.

use futures::future::join_all;
use tracing::warn;

use crate::domain::{CanonicalRecipe, Locale, LocalizedRecipe};
use crate::ports::TranslationService;

/// The result of localizing one canonical recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedOutcome {
    pub recipe: LocalizedRecipe,
    /// True when at least one unit fell back to its original-locale text.
    /// Aggregated across the whole operation so the caller can show a
    /// single "translation partially failed" notice instead of per-field
    /// noise.
    pub degraded: bool,
}

/// Localizes a canonical recipe into the target locale.
///
/// The source locale is the zero-failure fast path: the canonical text is
/// mirrored without a single translation request. Otherwise every atomic
/// unit (the title, each ingredient entry, each step, and the cleaned full
/// text) gets its own request, all in flight at once, bounding latency to
/// the slowest request rather than the sum.
pub async fn localize(
    translator: &dyn TranslationService,
    canonical: &CanonicalRecipe,
    target: Locale,
) -> LocalizedOutcome {
    if target.is_source() {
        return LocalizedOutcome {
            recipe: LocalizedRecipe::untranslated(canonical, target),
            degraded: false,
        };
    }

    let title = translate_unit(translator, &canonical.title, target);
    let full_text = translate_unit(translator, &canonical.full_text, target);
    // Ingredient entries and steps are translated individually, never as
    // one joined blob, so list boundaries survive the round trip.
    let ingredients = join_all(
        canonical
            .ingredients
            .iter()
            .map(|entry| translate_unit(translator, entry, target)),
    );
    let steps = join_all(
        canonical
            .steps
            .iter()
            .map(|step| translate_unit(translator, step, target)),
    );

    let (title, full_text, ingredients, steps) =
        futures::join!(title, full_text, ingredients, steps);

    let mut degraded = title.1 || full_text.1;
    let ingredients = collect_units(ingredients, &mut degraded);
    let steps = collect_units(steps, &mut degraded);

    LocalizedOutcome {
        recipe: LocalizedRecipe {
            locale: target,
            title: title.0,
            ingredients,
            steps,
            full_text: full_text.0,
            image: canonical.image.clone(),
            identifier: canonical.identifier.clone(),
        },
        degraded,
    }
}

fn collect_units(units: Vec<(String, bool)>, degraded: &mut bool) -> Vec<String> {
    units
        .into_iter()
        .map(|(text, fell_back)| {
            *degraded |= fell_back;
            text
        })
        .collect()
}

/// Translates one unit of text, substituting the original on any failure.
/// The bool half of the pair reports whether the fallback fired. Blank
/// units are passed through without a request.
async fn translate_unit(
    translator: &dyn TranslationService,
    text: &str,
    target: Locale,
) -> (String, bool) {
    if text.trim().is_empty() {
        return (text.to_string(), false);
    }
    match translator.translate(text, Locale::SOURCE, target).await {
        Ok(translated) if !translated.trim().is_empty() => (translated, false),
        Ok(_) => {
            warn!("Translation returned an empty result; keeping original text");
            (text.to_string(), true)
        }
        Err(e) => {
            warn!("Translation request failed: {}; keeping original text", e);
            (text.to_string(), true)
        }
    }
}
