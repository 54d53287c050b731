/*
 * Responsibility
 * - The v1 URL structure
 * - /health and the auth routes are public; /users/me requires an
 *   authenticated caller (enforced by the CurrentUser extractor, not by
 *   routing)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{auth, health, users};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/auth/signup", post(auth::sign_up))
        .route("/auth/login", post(auth::login))
        .route("/users/me", get(users::me))
}
