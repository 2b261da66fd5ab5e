//! End-to-end exercise of the core: raw payload in, normalized and
//! displayed out, with the source-locale fast path and the signed-out
//! favoriting short-circuit.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use smartchef_core::{
    localize, normalize, CredentialStore, FavoriteDraft, FavoriteError, FavoriteRecord,
    FavoriteStatus, FavoritesGateway, FavoritesStore, Locale, PortResult, RawIngredients,
    RawRecipe, RecipeView, SessionGuard, StoredCredentials, TranslationService, ViewPhase,
};

struct CountingTranslator {
    calls: AtomicUsize,
}

#[async_trait]
impl TranslationService for CountingTranslator {
    async fn translate(&self, text: &str, _source: Locale, target: Locale) -> PortResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("[{}] {}", target.code(), text))
    }
}

struct CountingStore {
    calls: AtomicUsize,
}

#[async_trait]
impl FavoritesStore for CountingStore {
    async fn save(&self, _token: &str, draft: &FavoriteDraft) -> PortResult<FavoriteRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FavoriteRecord {
            recipe_identifier: draft.recipe_identifier.clone(),
            owner_id: "owner-1".to_string(),
            snapshot: draft.snapshot.clone(),
            saved_at: draft.saved_at,
        })
    }

    async fn contains(&self, _token: &str, _recipe_identifier: &str) -> PortResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(false)
    }

    async fn list(&self, _token: &str) -> PortResult<Vec<FavoriteRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn delete(&self, _token: &str, _recipe_identifier: &str) -> PortResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct EmptyCredentials;

#[async_trait]
impl CredentialStore for EmptyCredentials {
    async fn load(&self) -> PortResult<Option<StoredCredentials>> {
        Ok(None)
    }

    async fn save(&self, _credentials: &StoredCredentials) -> PortResult<()> {
        Ok(())
    }

    async fn clear(&self) -> PortResult<()> {
        Ok(())
    }
}

fn raw_soup() -> RawRecipe {
    RawRecipe {
        identifier: Some("soup-1".to_string()),
        title: Some("Soup".to_string()),
        ingredients: Some(RawIngredients::Text("water, salt".to_string())),
        instructions: Some("Boil water.\nAdd salt.".to_string()),
        image: None,
        full_text: None,
    }
}

#[tokio::test]
async fn raw_payload_flows_to_a_displayed_recipe_without_network_calls() {
    let canonical = normalize(&raw_soup());
    assert_eq!(canonical.steps, vec!["Boil water.", "Add salt."]);
    assert_eq!(canonical.ingredients, vec!["water", "salt"]);

    // Source-locale localization is the zero-request fast path.
    let translator = CountingTranslator {
        calls: AtomicUsize::new(0),
    };
    let outcome = localize(&translator, &canonical, Locale::English).await;
    assert_eq!(outcome.recipe.title, canonical.title);
    assert_eq!(outcome.recipe.steps, canonical.steps);
    assert_eq!(outcome.recipe.ingredients, canonical.ingredients);
    assert_eq!(outcome.recipe.full_text, canonical.full_text);
    assert!(!outcome.degraded);
    assert_eq!(translator.calls.load(Ordering::SeqCst), 0);

    // Favoriting while signed out short-circuits before any network call.
    let store = Arc::new(CountingStore {
        calls: AtomicUsize::new(0),
    });
    let guard = Arc::new(SessionGuard::bootstrap(Arc::new(EmptyCredentials)).await);
    let gateway = FavoritesGateway::new(store.clone(), guard);
    assert!(matches!(
        gateway.add(&canonical).await,
        Err(FavoriteError::Unauthenticated)
    ));
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn the_view_composes_all_three_components() {
    let translator = Arc::new(CountingTranslator {
        calls: AtomicUsize::new(0),
    });
    let guard = Arc::new(SessionGuard::bootstrap(Arc::new(EmptyCredentials)).await);
    let favorites = Arc::new(FavoritesGateway::new(
        Arc::new(CountingStore {
            calls: AtomicUsize::new(0),
        }),
        guard,
    ));
    let view = RecipeView::new(translator.clone(), favorites);

    view.present(Some(raw_soup())).await;
    let snapshot = view.snapshot().await;
    assert_eq!(snapshot.phase, ViewPhase::Ready);
    assert_eq!(snapshot.locale, Locale::English);
    assert_eq!(snapshot.favorite, FavoriteStatus::Unknown);
    assert_eq!(translator.calls.load(Ordering::SeqCst), 0);

    view.set_locale(Locale::Hindi).await;
    let snapshot = view.snapshot().await;
    let displayed = snapshot.displayed.unwrap();
    assert_eq!(displayed.locale, Locale::Hindi);
    assert_eq!(displayed.title, "[hi] Soup");
    assert!(!snapshot.translation_degraded);
}
