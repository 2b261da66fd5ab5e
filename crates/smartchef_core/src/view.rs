//! crates/smartchef_core/src/view.rs
//!
//! The per-view state machine for one displayed recipe. Composes the
//! normalizer, the translation orchestrator and the favorites gateway:
//! holds the "original" (canonical) vs "displayed" (localized) recipe,
//! drives translation on locale change and exposes favorite status.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::domain::{CanonicalRecipe, FavoriteStatus, Locale, LocalizedRecipe, RawRecipe};
use crate::favorites::{FavoriteError, FavoritesGateway};
use crate::localize::localize;
use crate::normalize::normalize;
use crate::ports::TranslationService;

/// Top-level phase of a recipe view.
///
/// `Translating` is deliberately not a phase: once `Ready`, locale changes
/// run as a sub-state that always lands back in `Ready`, whether the
/// translation succeeded, partially failed, or wholly fell back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    /// Waiting for a payload.
    Loading,
    /// A canonical recipe is held and displayable.
    Ready,
    /// No recipe payload arrived at all.
    Unavailable,
}

/// A renderable snapshot of the view's current state.
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub phase: ViewPhase,
    pub displayed: Option<LocalizedRecipe>,
    pub locale: Locale,
    pub translating: bool,
    pub translation_degraded: bool,
    pub favorite: FavoriteStatus,
}

struct ViewInner {
    phase: ViewPhase,
    original: Option<CanonicalRecipe>,
    displayed: Option<LocalizedRecipe>,
    locale: Locale,
    translating: bool,
    degraded: bool,
    favorite: FavoriteStatus,
}

pub struct RecipeView {
    translator: Arc<dyn TranslationService>,
    favorites: Arc<FavoritesGateway>,
    inner: Mutex<ViewInner>,
}

impl RecipeView {
    pub fn new(translator: Arc<dyn TranslationService>, favorites: Arc<FavoritesGateway>) -> Self {
        Self {
            translator,
            favorites,
            inner: Mutex::new(ViewInner {
                phase: ViewPhase::Loading,
                original: None,
                displayed: None,
                locale: Locale::SOURCE,
                translating: false,
                degraded: false,
                favorite: FavoriteStatus::Unknown,
            }),
        }
    }

    /// Accepts or rejects the inbound payload. An absent payload parks the
    /// view in `Unavailable`. Otherwise the canonical form is computed once
    /// here and retained, unmutated, for the life of the view, so that
    /// switching locales never compounds translation error.
    pub async fn present(&self, raw: Option<RawRecipe>) {
        let mut inner = self.inner.lock().await;
        let Some(raw) = raw else {
            inner.phase = ViewPhase::Unavailable;
            inner.original = None;
            inner.displayed = None;
            return;
        };

        let mut canonical = normalize(&raw);
        if canonical.identifier.is_empty() {
            // Favorite operations need a stable key for this view's lifetime.
            canonical.identifier = Uuid::new_v4().to_string();
        }

        inner.displayed = Some(LocalizedRecipe::untranslated(&canonical, Locale::SOURCE));
        inner.original = Some(canonical);
        inner.locale = Locale::SOURCE;
        inner.phase = ViewPhase::Ready;
        inner.translating = false;
        inner.degraded = false;
        inner.favorite = FavoriteStatus::Unknown;
    }

    /// Switches the displayed locale.
    ///
    /// Localization always starts from the retained canonical original. If
    /// the user switches again while a request is in flight, the stale
    /// result is discarded by locale tag: whichever locale is active when a
    /// result resolves wins, regardless of arrival order.
    pub async fn set_locale(&self, target: Locale) {
        let canonical = {
            let mut inner = self.inner.lock().await;
            if inner.phase != ViewPhase::Ready {
                return;
            }
            let Some(canonical) = inner.original.clone() else {
                return;
            };
            inner.locale = target;
            inner.translating = true;
            canonical
        };

        let outcome = localize(self.translator.as_ref(), &canonical, target).await;

        let mut inner = self.inner.lock().await;
        if inner.locale != target {
            // Superseded while in flight; a later locale owns the view now.
            info!("Discarding stale localization for {}", target);
            return;
        }
        inner.displayed = Some(outcome.recipe);
        inner.degraded = outcome.degraded;
        inner.translating = false;
    }

    /// Resolves the favorite status through the gateway. Failures leave the
    /// status `Unknown` rather than guessing a negative.
    pub async fn refresh_favorite(&self) {
        let identifier = {
            let inner = self.inner.lock().await;
            let Some(original) = &inner.original else {
                return;
            };
            original.identifier.clone()
        };

        let status = match self.favorites.check(&identifier).await {
            Ok(status) => status,
            Err(e) => {
                info!("Favorite status unresolved: {}", e);
                FavoriteStatus::Unknown
            }
        };
        self.inner.lock().await.favorite = status;
    }

    /// Adds or removes the favorite depending on the current status. The
    /// view is marked `Favorited` only after the collaborator confirms the
    /// save; an unresolved status is treated as "not favorited yet".
    pub async fn toggle_favorite(&self) -> Result<FavoriteStatus, FavoriteError> {
        let (canonical, current) = {
            let inner = self.inner.lock().await;
            let Some(original) = inner.original.clone() else {
                return Err(FavoriteError::Unavailable(
                    "no recipe is displayed".to_string(),
                ));
            };
            (original, inner.favorite)
        };

        let updated = match current {
            FavoriteStatus::Favorited => {
                self.favorites.remove(&canonical.identifier).await?;
                FavoriteStatus::NotFavorited
            }
            FavoriteStatus::NotFavorited | FavoriteStatus::Unknown => {
                self.favorites.add(&canonical).await?;
                FavoriteStatus::Favorited
            }
        };

        self.inner.lock().await.favorite = updated;
        Ok(updated)
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        let inner = self.inner.lock().await;
        ViewSnapshot {
            phase: inner.phase,
            displayed: inner.displayed.clone(),
            locale: inner.locale,
            translating: inner.translating,
            translation_degraded: inner.degraded,
            favorite: inner.favorite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FavoriteDraft, FavoriteRecord, RawIngredients, StoredCredentials};
    use crate::ports::{CredentialStore, FavoritesStore, PortError, PortResult};
    use crate::session::SessionGuard;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use tokio::sync::Notify;

    /// Prefixes units with the target code; can hold one locale's requests
    /// until released, to interleave overlapping localizations.
    struct GatedTranslator {
        gated: Option<(Locale, Arc<Notify>)>,
    }

    #[async_trait]
    impl crate::ports::TranslationService for GatedTranslator {
        async fn translate(&self, text: &str, _source: Locale, target: Locale) -> PortResult<String> {
            if let Some((locale, gate)) = &self.gated {
                if *locale == target {
                    gate.notified().await;
                }
            }
            Ok(format!("[{}] {}", target.code(), text))
        }
    }

    struct MemoryFavorites {
        favorited: Mutex<bool>,
        fail_delete: bool,
    }

    #[async_trait]
    impl FavoritesStore for MemoryFavorites {
        async fn save(&self, _token: &str, draft: &FavoriteDraft) -> PortResult<FavoriteRecord> {
            *self.favorited.lock().await = true;
            Ok(FavoriteRecord {
                recipe_identifier: draft.recipe_identifier.clone(),
                owner_id: "owner-1".to_string(),
                snapshot: draft.snapshot.clone(),
                saved_at: draft.saved_at,
            })
        }

        async fn contains(&self, _token: &str, _recipe_identifier: &str) -> PortResult<bool> {
            Ok(*self.favorited.lock().await)
        }

        async fn list(&self, _token: &str) -> PortResult<Vec<FavoriteRecord>> {
            Ok(Vec::new())
        }

        async fn delete(&self, _token: &str, recipe_identifier: &str) -> PortResult<()> {
            if self.fail_delete {
                return Err(PortError::NotFound(recipe_identifier.to_string()));
            }
            *self.favorited.lock().await = false;
            Ok(())
        }
    }

    struct StaticCredentials(Option<String>);

    #[async_trait]
    impl CredentialStore for StaticCredentials {
        async fn load(&self) -> PortResult<Option<StoredCredentials>> {
            Ok(self.0.clone().map(|token| StoredCredentials {
                token,
                display_name: None,
            }))
        }

        async fn save(&self, _credentials: &StoredCredentials) -> PortResult<()> {
            Ok(())
        }

        async fn clear(&self) -> PortResult<()> {
            Ok(())
        }
    }

    async fn view_with(
        translator: GatedTranslator,
        token: Option<&str>,
        fail_delete: bool,
    ) -> Arc<RecipeView> {
        let guard = Arc::new(
            SessionGuard::bootstrap(Arc::new(StaticCredentials(token.map(str::to_string)))).await,
        );
        let favorites = Arc::new(FavoritesGateway::new(
            Arc::new(MemoryFavorites {
                favorited: Mutex::new(false),
                fail_delete,
            }),
            guard,
        ));
        Arc::new(RecipeView::new(Arc::new(translator), favorites))
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
    async fn absent_payload_parks_the_view_in_unavailable() {
        let view = view_with(GatedTranslator { gated: None }, None, false).await;
        view.present(None).await;

        let snapshot = view.snapshot().await;
        assert_eq!(snapshot.phase, ViewPhase::Unavailable);
        assert!(snapshot.displayed.is_none());
    }

    #[tokio::test]
    async fn empty_recipes_are_ready_not_errors() {
        let view = view_with(GatedTranslator { gated: None }, None, false).await;
        view.present(Some(RawRecipe::default())).await;

        let snapshot = view.snapshot().await;
        assert_eq!(snapshot.phase, ViewPhase::Ready);
        let displayed = snapshot.displayed.unwrap();
        assert!(displayed.steps.is_empty());
        assert!(displayed.ingredients.is_empty());
    }

    #[tokio::test]
    async fn locale_change_translates_from_the_retained_original() {
        let view = view_with(GatedTranslator { gated: None }, None, false).await;
        view.present(Some(raw_soup())).await;

        view.set_locale(Locale::Telugu).await;
        let first = view.snapshot().await.displayed.unwrap();
        assert_eq!(first.title, "[te] Soup");

        // Switching again starts from the canonical text, not from the
        // Telugu rendering: no "[hi] [te]" stacking.
        view.set_locale(Locale::Hindi).await;
        let second = view.snapshot().await.displayed.unwrap();
        assert_eq!(second.title, "[hi] Soup");
        assert_eq!(second.steps, vec!["[hi] Boil water.", "[hi] Add salt."]);
    }

    #[tokio::test]
    async fn stale_localization_is_discarded_by_locale_tag() {
        let gate = Arc::new(Notify::new());
        let view = view_with(
            GatedTranslator {
                gated: Some((Locale::Telugu, gate.clone())),
            },
            None,
            false,
        )
        .await;
        view.present(Some(raw_soup())).await;

        // First request parks on the gate with Telugu as the active locale.
        let slow = tokio::spawn({
            let view = view.clone();
            async move { view.set_locale(Locale::Telugu).await }
        });
        tokio::task::yield_now().await;

        // The user navigates on; Hindi resolves immediately and wins.
        view.set_locale(Locale::Hindi).await;
        assert_eq!(view.snapshot().await.displayed.unwrap().locale, Locale::Hindi);

        // The Telugu response arrives last but its locale tag is stale.
        gate.notify_waiters();
        slow.await.unwrap();

        let snapshot = view.snapshot().await;
        let displayed = snapshot.displayed.unwrap();
        assert_eq!(displayed.locale, Locale::Hindi);
        assert_eq!(displayed.title, "[hi] Soup");
        assert!(!snapshot.translating);
    }

    #[tokio::test]
    async fn toggle_marks_favorited_only_after_confirmed_success() {
        let view = view_with(GatedTranslator { gated: None }, Some("token-1"), false).await;
        view.present(Some(raw_soup())).await;
        assert_eq!(view.snapshot().await.favorite, FavoriteStatus::Unknown);

        let updated = view.toggle_favorite().await.unwrap();
        assert_eq!(updated, FavoriteStatus::Favorited);
        assert_eq!(view.snapshot().await.favorite, FavoriteStatus::Favorited);

        let updated = view.toggle_favorite().await.unwrap();
        assert_eq!(updated, FavoriteStatus::NotFavorited);
    }

    #[tokio::test]
    async fn failed_toggle_leaves_the_status_unchanged() {
        let view = view_with(GatedTranslator { gated: None }, None, false).await;
        view.present(Some(raw_soup())).await;

        assert!(matches!(
            view.toggle_favorite().await,
            Err(FavoriteError::Unauthenticated)
        ));
        assert_eq!(view.snapshot().await.favorite, FavoriteStatus::Unknown);
    }

    #[tokio::test]
    async fn refresh_favorite_resolves_through_the_gateway() {
        let view = view_with(GatedTranslator { gated: None }, Some("token-1"), false).await;
        view.present(Some(raw_soup())).await;

        view.refresh_favorite().await;
        assert_eq!(view.snapshot().await.favorite, FavoriteStatus::NotFavorited);

        view.toggle_favorite().await.unwrap();
        view.refresh_favorite().await;
        assert_eq!(view.snapshot().await.favorite, FavoriteStatus::Favorited);
    }

    #[tokio::test]
    async fn id_less_recipes_get_a_stable_view_key() {
        let view = view_with(GatedTranslator { gated: None }, Some("token-1"), false).await;
        view.present(Some(RawRecipe {
            identifier: None,
            ..raw_soup()
        }))
        .await;

        let displayed = view.snapshot().await.displayed.unwrap();
        assert!(!displayed.identifier.is_empty());
    }
}
