/*
 * Responsibility
 * - Load Config → build dependencies → assemble the Router
 * - Apply middleware (session filter, transport layers)
 * - Start serving via axum::serve()
 */
use std::sync::Arc;
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::{Config, ConfigError};
use crate::middleware;
use crate::repos::user_directory::{InMemoryUserDirectory, UserDirectory};
use crate::services::auth::{AccountService, TokenProvider};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics via tracing so they are not lost when stderr is
        // swallowed by the process manager.
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    // In development, fail fast on panics so they are noticed immediately.
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting {} in {:?} mode on {}",
        env!("CARGO_PKG_NAME"),
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build process-level services and the shared state.
pub fn build_state(config: &Config) -> Result<AppState, ConfigError> {
    let tokens = Arc::new(TokenProvider::new(
        &config.token_secret,
        config.token_ttl_seconds,
    )?);

    let users: Arc<dyn UserDirectory> = Arc::new(InMemoryUserDirectory::new());
    let accounts = Arc::new(AccountService::new(users.clone()));

    Ok(AppState::new(tokens, accounts, users, config.carrier.clone()))
}

/// Assemble the full router: versioned API, session filter, transport layers.
pub fn build_router(state: AppState) -> Router {
    let v1 = middleware::auth::session::apply(api::v1::routes(), state.clone());

    let router = Router::new().nest("/api/v1", v1).with_state(state);

    middleware::http::apply(router)
}
