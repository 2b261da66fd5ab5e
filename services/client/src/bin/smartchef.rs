//! services/client/src/bin/smartchef.rs
//!
//! Wires the configuration, adapters, session guard and recipe view
//! together and drives them from a small interactive prompt. Rendering here
//! is deliberately plain text; the view state machine owns all behavior.

use std::sync::Arc;

use client_lib::{
    adapters::{
        FileCredentialStore, GtxTranslateAdapter, HttpAccountService, HttpFavoritesStore,
        HttpRecipeSource,
    },
    config::Config,
    error::AppError,
};
use smartchef_core::{
    discovery::fresh_random_recipe,
    generate::{generate, GenerationRequest},
    AccountService, FavoriteStatus, FavoritesGateway, Locale, RecipeView, SessionGuard,
    ViewPhase, ViewSnapshot,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PERSONS: u32 = 2;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Backend at {}", config.api_base_url);

    // --- 2. Initialize Service Adapters ---
    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;
    let translator = Arc::new(GtxTranslateAdapter::new(
        http.clone(),
        config.translate_endpoint.clone(),
    ));
    let favorites_store = Arc::new(HttpFavoritesStore::new(
        http.clone(),
        config.api_base_url.clone(),
    ));
    let accounts = HttpAccountService::new(http.clone(), config.api_base_url.clone());
    let recipes = HttpRecipeSource::new(http, config.api_base_url.clone());
    let credential_store = Arc::new(FileCredentialStore::new(config.credentials_path.clone()));

    // --- 3. Restore the Session & Build the View ---
    let guard = Arc::new(SessionGuard::bootstrap(credential_store).await);
    let gateway = Arc::new(FavoritesGateway::new(favorites_store, guard.clone()));
    let view = Arc::new(RecipeView::new(translator, gateway.clone()));

    match guard.display_name().await {
        Some(name) => println!("Welcome back, {}.", name),
        None => println!("Welcome to SmartChef. Type 'signin <user> <password>' to sign in."),
    }
    println!("Type 'help' for the command list.\n");

    // --- 4. Drive the View From Stdin ---
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_recipe_id: Option<String> = None;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "random" => {
                match fresh_random_recipe(
                    &recipes,
                    DEFAULT_PERSONS,
                    config.default_locale,
                    last_recipe_id.as_deref(),
                )
                .await
                {
                    Ok(raw) => {
                        last_recipe_id = raw.identifier.clone();
                        view.present(Some(raw)).await;
                        if !config.default_locale.is_source() {
                            view.set_locale(config.default_locale).await;
                        }
                        view.refresh_favorite().await;
                        render(&view.snapshot().await);
                    }
                    Err(e) => println!("Could not fetch a recipe: {}", e),
                }
            }
            "gen" => {
                if rest.is_empty() {
                    println!("Usage: gen <comma-separated ingredients>");
                    continue;
                }
                let request = GenerationRequest {
                    ingredients: rest.to_string(),
                    persons: DEFAULT_PERSONS,
                    meal_type: "dinner".to_string(),
                };
                match generate(&recipes, &request).await {
                    Ok(raw) => {
                        view.present(Some(raw)).await;
                        view.refresh_favorite().await;
                        render(&view.snapshot().await);
                    }
                    Err(e) => println!("Generation failed: {}", e),
                }
            }
            "lang" => match rest.parse::<Locale>() {
                Ok(locale) => {
                    view.set_locale(locale).await;
                    render(&view.snapshot().await);
                }
                Err(e) => println!("{}", e),
            },
            "fav" => match view.toggle_favorite().await {
                Ok(FavoriteStatus::Favorited) => println!("Added to favorites."),
                Ok(_) => println!("Removed from favorites."),
                Err(e) => println!("{}", e),
            },
            "favs" => match gateway.list().await {
                Ok(records) if records.is_empty() => println!("No favorites saved yet."),
                Ok(records) => {
                    for record in records {
                        println!("- {} ({})", record.snapshot.title, record.recipe_identifier);
                    }
                }
                Err(e) => println!("{}", e),
            },
            "signin" => match rest.split_once(' ') {
                Some((username, password)) => {
                    match guard.sign_in_with(&accounts, username, password.trim()).await {
                        Ok(()) => println!("Signed in."),
                        Err(e) => println!("Sign-in failed: {}", e),
                    }
                }
                None => println!("Usage: signin <user> <password>"),
            },
            "signup" => match rest.split_once(' ') {
                Some((username, password)) => {
                    match accounts.sign_up(username, password.trim()).await {
                        Ok(()) => println!("Account created. Sign in to continue."),
                        Err(e) => println!("Sign-up failed: {}", e),
                    }
                }
                None => println!("Usage: signup <user> <password>"),
            },
            "signout" => {
                guard.invalidate().await;
                println!("Signed out.");
            }
            "delete-account" => match guard.delete_account_with(&accounts).await {
                Ok(()) => println!("Account deleted."),
                Err(e) => println!("Could not delete the account: {}", e),
            },
            "show" => render(&view.snapshot().await),
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("Unknown command '{}'. Type 'help'.", other),
        }
    }

    info!("Goodbye.");
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  random                  fetch a random recipe");
    println!("  gen <ingredients>       generate a recipe from ingredients");
    println!("  lang <english|telugu|hindi>  switch the display language");
    println!("  fav                     toggle the favorite on the shown recipe");
    println!("  favs                    list saved favorites");
    println!("  signin <user> <pass>    sign in");
    println!("  signup <user> <pass>    create an account");
    println!("  signout                 sign out");
    println!("  delete-account          delete the signed-in account");
    println!("  show                    re-render the current recipe");
    println!("  quit                    leave");
}

fn render(snapshot: &ViewSnapshot) {
    match snapshot.phase {
        ViewPhase::Loading => {
            println!("Loading recipe...");
            return;
        }
        ViewPhase::Unavailable => {
            println!("Error loading recipe. Please try again.");
            return;
        }
        ViewPhase::Ready => {}
    }
    let Some(recipe) = &snapshot.displayed else {
        return;
    };

    println!("\n=== {} ===", recipe.title);
    match snapshot.favorite {
        FavoriteStatus::Favorited => println!("(in your favorites)"),
        FavoriteStatus::NotFavorited => {}
        FavoriteStatus::Unknown => println!("(favorite status unknown)"),
    }
    if snapshot.translating {
        println!("Translating...");
    }
    if snapshot.translation_degraded {
        println!("Translation partially failed. Some text is shown in the original language.");
    }

    println!("\nIngredients:");
    if recipe.ingredients.is_empty() {
        println!("  No ingredients information available.");
    } else {
        for ingredient in &recipe.ingredients {
            println!("  - {}", ingredient);
        }
    }

    println!("\nCooking Instructions:");
    if recipe.steps.is_empty() {
        println!("  No cooking instructions available.");
    } else {
        for (index, step) in recipe.steps.iter().enumerate() {
            println!("  {}. {}", index + 1, step);
        }
    }

    if !recipe.full_text.is_empty() {
        println!("\nFull Recipe Details:\n{}", recipe.full_text);
    }
    println!();
}
