/*
 * Responsibility
 * - Signup / login request and response DTOs
 * - validate() for shape checks before any service call
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::user_directory::{Role, UserRecord};

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub nickname: String,
}

impl SignUpRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;

        let nickname_chars = self.nickname.trim().chars().count();
        if !(2..=50).contains(&nickname_chars) {
            return Err("nickname must be 2 to 50 characters");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("email is required");
    }
    if email.len() > 100 {
        return Err("email must be <= 100 chars");
    }

    // Shape check only.
    let Some((local, domain)) = email.split_once('@') else {
        return Err("email must be a valid address");
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err("email must be a valid address");
    }

    Ok(())
}

fn validate_password(password: &str) -> Result<(), &'static str> {
    let chars = password.chars().count();
    if !(8..=20).contains(&chars) {
        return Err("password must be 8 to 20 characters");
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub id: Uuid,
    pub email: String,
    pub nickname: String,
    pub role: Role,
}

impl From<UserRecord> for SignUpResponse {
    fn from(u: UserRecord) -> Self {
        Self {
            id: u.id,
            email: u.email,
            nickname: u.nickname,
            role: u.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always "Bearer"; cookie deployments additionally get a Set-Cookie.
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
    pub user_id: Uuid,
    pub email: String,
    pub nickname: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str, password: &str, nickname: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            nickname: nickname.to_string(),
        }
    }

    #[test]
    fn accepts_a_well_formed_signup() {
        assert!(signup("a@b.com", "password-1", "alice").validate().is_ok());
    }

    #[test]
    fn rejects_password_outside_8_to_20_chars() {
        assert!(signup("a@b.com", "short_7", "alice").validate().is_err());
        assert!(
            signup("a@b.com", &"x".repeat(21), "alice")
                .validate()
                .is_err()
        );
        assert!(signup("a@b.com", &"x".repeat(20), "alice").validate().is_ok());
        assert!(signup("a@b.com", &"x".repeat(8), "alice").validate().is_ok());
    }

    #[test]
    fn rejects_nickname_outside_2_to_50_chars() {
        assert!(signup("a@b.com", "password-1", "x").validate().is_err());
        assert!(
            signup("a@b.com", "password-1", &"x".repeat(51))
                .validate()
                .is_err()
        );
        assert!(
            signup("a@b.com", "password-1", &"x".repeat(50))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn counts_nickname_length_in_characters_not_bytes() {
        // 4 characters, 12 bytes.
        assert!(signup("a@b.com", "password-1", "ニックネ").validate().is_ok());
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "   ", "plain", "no-at.example.com", "a@", "@b.com", "a@nodot"] {
            assert!(
                signup(email, "password-1", "alice").validate().is_err(),
                "email: {email:?}"
            );
        }
    }

    #[test]
    fn rejects_overlong_emails() {
        let local = "x".repeat(95);
        let email = format!("{local}@ex.com");
        assert!(email.len() > 100);
        assert!(signup(&email, "password-1", "alice").validate().is_err());
    }

    #[test]
    fn login_reuses_the_same_checks() {
        let ok = LoginRequest {
            email: "a@b.com".to_string(),
            password: "password-1".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "a@b.com".to_string(),
            password: "short".to_string(),
        };
        assert!(bad.validate().is_err());
    }
}
