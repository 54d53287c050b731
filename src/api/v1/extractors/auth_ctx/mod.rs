/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Provide handlers with the request's resolved identity (AuthCtx)
 * - HTTP / axum specifics stay in core; plain types live in types
 *
 * Public API:
 * - AuthCtx
 * - CurrentUser
 */

mod core;
mod types;

pub use self::core::CurrentUser;
pub use types::AuthCtx;
