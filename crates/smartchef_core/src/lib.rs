pub mod discovery;
pub mod domain;
pub mod favorites;
pub mod generate;
pub mod localize;
pub mod normalize;
pub mod ports;
pub mod session;
pub mod view;

pub use domain::{
    CanonicalRecipe, FavoriteDraft, FavoriteRecord, FavoriteStatus, Locale, LocalizedRecipe,
    RawIngredients, RawRecipe, Session, StoredCredentials,
};
pub use favorites::{FavoriteError, FavoritesGateway};
pub use localize::{localize, LocalizedOutcome};
pub use normalize::normalize;
pub use ports::{
    AccountService, CredentialStore, FavoritesStore, PortError, PortResult, RecipeSource,
    SignedIn, TranslationService,
};
pub use session::{AuthCheck, SessionGuard};
pub use view::{RecipeView, ViewPhase, ViewSnapshot};
