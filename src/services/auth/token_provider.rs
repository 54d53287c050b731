/*
 * Responsibility
 * - issue(): build claims (iat / exp from TTL) and sign via the codec
 * - validate(): decode via the codec, then interpret expiry
 * - The only place that interprets time; callers pass `now` explicitly
 */
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::error;

use crate::config::{ConfigError, SigningSecret};
use crate::error::AppError;
use crate::repos::user_directory::Role;
use crate::services::auth::token_codec::{DecodeError, SessionClaims, TokenCodec};

/// Session validation failures, logged (never returned to clients verbatim)
/// by the session filter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("malformed token")]
    MalformedToken,
    #[error("bad signature")]
    BadSignature,
    #[error("token expired")]
    TokenExpired,
}

impl From<DecodeError> for AuthError {
    fn from(e: DecodeError) -> Self {
        match e {
            DecodeError::MalformedToken => Self::MalformedToken,
            DecodeError::BadSignature => Self::BadSignature,
        }
    }
}

/// Issues and validates session tokens.
///
/// Owns the signing key (through the codec) and the configured TTL. Both
/// `issue` and `validate` take `now` as an argument, so expiry behavior is
/// fully deterministic under test.
#[derive(Debug)]
pub struct TokenProvider {
    codec: TokenCodec,
    ttl_seconds: i64,
}

impl TokenProvider {
    /// Ceiling on the configurable TTL (ten years). Bounding it here keeps
    /// `iat + ttl` representable for any clock value chrono can produce.
    pub const MAX_TTL_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

    /// TTL must be positive and at most `MAX_TTL_SECONDS`; anything else is
    /// a startup error.
    pub fn new(secret: &SigningSecret, ttl_seconds: i64) -> Result<Self, ConfigError> {
        if ttl_seconds <= 0 || ttl_seconds > Self::MAX_TTL_SECONDS {
            return Err(ConfigError::Invalid("AUTH_TOKEN_TTL_SECONDS"));
        }

        Ok(Self {
            codec: TokenCodec::new(secret),
            ttl_seconds,
        })
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issue a signed session token for an authenticated subject.
    pub fn issue(&self, subject: &str, role: Role, now: DateTime<Utc>) -> Result<String, AppError> {
        let iat = now.timestamp();
        let claims = SessionClaims {
            sub: subject.to_string(),
            role,
            iat,
            exp: iat + self.ttl_seconds,
        };

        self.codec.encode(&claims).map_err(|e| {
            error!(error = %e, "failed to sign session token");
            AppError::Internal
        })
    }

    /// Decode and verify a candidate token, then interpret expiry at `now`.
    ///
    /// The boundary is inclusive: a token is expired from the exact second
    /// its `exp` names.
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, AuthError> {
        let claims = self.codec.decode(token)?;

        if now.timestamp() >= claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use chrono::Duration;

    fn secret() -> SigningSecret {
        SigningSecret::from_base64(&STANDARD.encode([7u8; 32])).unwrap()
    }

    fn provider(ttl_seconds: i64) -> TokenProvider {
        TokenProvider::new(&secret(), ttl_seconds).unwrap()
    }

    fn at(unix: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(unix, 0).unwrap()
    }

    #[test]
    fn rejects_non_positive_ttl_at_construction() {
        for ttl in [0, -1, -3600] {
            let err = TokenProvider::new(&secret(), ttl).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid("AUTH_TOKEN_TTL_SECONDS")),
                "ttl: {ttl}"
            );
        }
    }

    #[test]
    fn rejects_ttls_beyond_the_ceiling_at_construction() {
        for ttl in [TokenProvider::MAX_TTL_SECONDS + 1, i64::MAX] {
            let err = TokenProvider::new(&secret(), ttl).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid("AUTH_TOKEN_TTL_SECONDS")),
                "ttl: {ttl}"
            );
        }
    }

    #[test]
    fn issues_at_the_ttl_ceiling_without_overflow() {
        let provider = provider(TokenProvider::MAX_TTL_SECONDS);
        let now = at(1_700_000_000);

        let token = provider.issue("a@b.com", Role::User, now).unwrap();
        let claims = provider.validate(&token, now).unwrap();

        assert_eq!(claims.exp, 1_700_000_000 + TokenProvider::MAX_TTL_SECONDS);
    }

    #[test]
    fn issued_claims_round_trip() {
        let provider = provider(3600);
        let now = at(1_700_000_000);

        let token = provider.issue("a@b.com", Role::User, now).unwrap();
        let claims = provider.validate(&token, now).unwrap();

        assert_eq!(claims.sub, "a@b.com");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_003_600);
    }

    #[test]
    fn accepts_fresh_tokens_and_rejects_stale_ones() {
        let provider = provider(3600);
        let issued = at(1_700_000_000);
        let token = provider.issue("a@b.com", Role::User, issued).unwrap();

        let fresh = provider
            .validate(&token, issued + Duration::seconds(1))
            .unwrap();
        assert_eq!(fresh.role, Role::User);

        let stale = provider.validate(&token, issued + Duration::seconds(3601));
        assert_eq!(stale, Err(AuthError::TokenExpired));
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let provider = provider(60);
        let issued = at(1_700_000_000);
        let token = provider.issue("a@b.com", Role::Admin, issued).unwrap();

        assert!(provider.validate(&token, at(1_700_000_059)).is_ok());
        assert_eq!(
            provider.validate(&token, at(1_700_000_060)),
            Err(AuthError::TokenExpired)
        );
        assert_eq!(
            provider.validate(&token, at(1_700_000_061)),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn validation_is_deterministic() {
        let provider = provider(3600);
        let issued = at(1_700_000_000);
        let token = provider.issue("a@b.com", Role::User, issued).unwrap();

        let early = issued + Duration::seconds(10);
        assert_eq!(
            provider.validate(&token, early),
            provider.validate(&token, early)
        );

        let late = issued + Duration::seconds(7200);
        assert_eq!(
            provider.validate(&token, late),
            provider.validate(&token, late)
        );
    }

    #[test]
    fn propagates_codec_classification() {
        let provider = provider(3600);
        let now = at(1_700_000_000);

        assert_eq!(
            provider.validate("garbage", now),
            Err(AuthError::MalformedToken)
        );

        let other_secret =
            SigningSecret::from_base64(&STANDARD.encode([9u8; 32])).unwrap();
        let foreign = TokenProvider::new(&other_secret, 3600).unwrap();
        let token = foreign.issue("a@b.com", Role::User, now).unwrap();
        assert_eq!(
            provider.validate(&token, now),
            Err(AuthError::BadSignature)
        );
    }
}
