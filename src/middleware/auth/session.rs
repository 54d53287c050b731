/*
 * Responsibility
 * - Pull the candidate token from the configured carrier
 *   (Authorization: Bearer, or a named cookie)
 * - Validate it and resolve the subject against the user directory
 * - Attach the resulting AuthCtx to the request and always forward
 *
 * Failures never reject here: the request proceeds anonymous and protected
 * routes reject downstream via CurrentUser.
 */
use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};
use chrono::Utc;

use crate::api::v1::extractors::AuthCtx;
use crate::config::TokenCarrier;
use crate::state::AppState;

/// Attach the session filter to every route of the given router.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, session_middleware))
}

async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let mut ctx = AuthCtx::anonymous();

    // No candidate token is not an error; the request stays anonymous.
    if let Some(token) = extract_token(&state.carrier, req.headers()) {
        match state.tokens.validate(&token, Utc::now()) {
            Ok(claims) => match state.users.find_by_email(&claims.sub).await {
                // The directory record wins over the role embedded in the
                // token, so demotions take effect before expiry.
                Ok(Some(user)) => ctx.set(user.email, user.role),
                Ok(None) => {
                    tracing::warn!(subject = %claims.sub, "session subject no longer exists");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "user directory lookup failed");
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "session token rejected");
            }
        }
    }

    req.extensions_mut().insert(ctx);
    next.run(req).await
}

/// Read the candidate token from the active carrier, if any.
fn extract_token(carrier: &TokenCarrier, headers: &HeaderMap) -> Option<String> {
    match carrier {
        TokenCarrier::Bearer => headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|auth| auth.strip_prefix("Bearer "))
            .map(str::to_string),
        TokenCarrier::Cookie { name } => cookie_value(headers, name),
    }
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn bearer_carrier_reads_the_authorization_header() {
        let carrier = TokenCarrier::Bearer;

        let present = headers(&[(header::AUTHORIZATION, "Bearer abc.def.ghi")]);
        assert_eq!(
            extract_token(&carrier, &present),
            Some("abc.def.ghi".to_string())
        );

        assert_eq!(extract_token(&carrier, &HeaderMap::new()), None);

        let wrong_scheme = headers(&[(header::AUTHORIZATION, "Basic abc")]);
        assert_eq!(extract_token(&carrier, &wrong_scheme), None);

        // Scheme matching is exact.
        let lowercase = headers(&[(header::AUTHORIZATION, "bearer abc")]);
        assert_eq!(extract_token(&carrier, &lowercase), None);
    }

    #[test]
    fn bearer_carrier_ignores_cookies() {
        let carrier = TokenCarrier::Bearer;
        let map = headers(&[(header::COOKIE, "session_token=abc")]);
        assert_eq!(extract_token(&carrier, &map), None);
    }

    #[test]
    fn cookie_carrier_reads_only_the_named_cookie() {
        let carrier = TokenCarrier::Cookie {
            name: "session_token".to_string(),
        };

        let single = headers(&[(header::COOKIE, "session_token=abc")]);
        assert_eq!(extract_token(&carrier, &single), Some("abc".to_string()));

        let crowded = headers(&[(header::COOKIE, "theme=dark; session_token=abc; lang=en")]);
        assert_eq!(extract_token(&carrier, &crowded), Some("abc".to_string()));

        let other = headers(&[(header::COOKIE, "theme=dark")]);
        assert_eq!(extract_token(&carrier, &other), None);

        assert_eq!(extract_token(&carrier, &HeaderMap::new()), None);
    }

    #[test]
    fn cookie_carrier_ignores_the_authorization_header() {
        let carrier = TokenCarrier::Cookie {
            name: "session_token".to_string(),
        };
        let map = headers(&[(header::AUTHORIZATION, "Bearer abc")]);
        assert_eq!(extract_token(&carrier, &map), None);
    }
}
