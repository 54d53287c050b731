/*
 * Responsibility
 * - SessionClaims <-> signed compact token string (HS256)
 * - Classify rejected tokens: malformed vs bad signature
 * - No clock access; expiry is interpreted by the token provider
 */
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::SigningSecret;
use crate::repos::user_directory::Role;

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the account email.
    pub sub: String,
    pub role: Role,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expires-at, unix seconds.
    pub exp: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed token")]
    MalformedToken,
    #[error("bad signature")]
    BadSignature,
}

/// HS256 encoder/decoder for session tokens.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

// Do not print key material.
impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by the provider against an explicit clock.
        validation.validate_exp = false;
        validation.required_spec_claims.remove("exp");
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Serialize and sign claims into the three-segment compact form.
    ///
    /// Deterministic: identical claims under the same key produce an
    /// identical token string.
    pub fn encode(&self, claims: &SessionClaims) -> Result<String, jsonwebtoken::errors::Error> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, claims, &self.encoding_key)
    }

    /// Parse and verify a candidate token.
    ///
    /// `MalformedToken`: not three dot-separated segments, or the header or
    /// payload segment does not decode to the expected shape.
    /// `BadSignature`: structurally fine but the MAC does not verify; this
    /// covers wrong keys, tampered header/payload bytes, corrupted signature
    /// segments and headers demanding a different algorithm.
    pub fn decode(&self, token: &str) -> Result<SessionClaims, DecodeError> {
        check_structure(token)?;

        // Structure was vetted above, so any rejection left is
        // signature-class. The MAC comparison itself happens inside
        // jsonwebtoken, in constant time.
        match jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(_) => Err(DecodeError::BadSignature),
        }
    }
}

/// Structural validation: segment arithmetic, base64url, claim shape.
fn check_structure(token: &str) -> Result<(), DecodeError> {
    let mut segments = token.split('.');
    let (header, payload, signature) = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(h), Some(p), Some(s), None) => (h, p, s),
        _ => return Err(DecodeError::MalformedToken),
    };

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| DecodeError::MalformedToken)?;
    let header_json: serde_json::Value =
        serde_json::from_slice(&header_bytes).map_err(|_| DecodeError::MalformedToken)?;
    if !header_json.get("alg").is_some_and(|alg| alg.is_string()) {
        return Err(DecodeError::MalformedToken);
    }

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| DecodeError::MalformedToken)?;
    let claims: SessionClaims =
        serde_json::from_slice(&payload_bytes).map_err(|_| DecodeError::MalformedToken)?;
    if claims.sub.trim().is_empty() {
        return Err(DecodeError::MalformedToken);
    }

    // An undecodable signature segment is a signature failure, not a
    // structural one: any corruption of this segment must surface as
    // BadSignature.
    URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| DecodeError::BadSignature)?;

    Ok(())
}
