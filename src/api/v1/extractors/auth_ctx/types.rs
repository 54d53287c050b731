/*
 * Responsibility
 * - The identity context handlers see for every request
 * - The session filter resolves a token and stores one in request
 *   extensions; handlers only read it
 */

use crate::repos::user_directory::Role;

/// Request-scoped record of the resolved identity.
///
/// Starts anonymous; the session filter populates it at most once, when a
/// token verifies and its subject still exists in the directory.
#[derive(Debug, Clone, Default)]
pub struct AuthCtx {
    authenticated: bool,
    subject: String,
    role: Option<Role>,
}

impl AuthCtx {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Populate the context. Only the session filter calls this; a second
    /// call on the same context is a logic error.
    pub fn set(&mut self, subject: impl Into<String>, role: Role) {
        debug_assert!(
            !self.authenticated,
            "AuthCtx may be populated at most once per request"
        );
        self.authenticated = true;
        self.subject = subject.into();
        self.role = Some(role);
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The authenticated account's email; empty while anonymous.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_anonymous() {
        let ctx = AuthCtx::anonymous();
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.subject(), "");
        assert_eq!(ctx.role(), None);
    }

    #[test]
    fn set_populates_identity() {
        let mut ctx = AuthCtx::anonymous();
        ctx.set("a@b.com", Role::Admin);

        assert!(ctx.is_authenticated());
        assert_eq!(ctx.subject(), "a@b.com");
        assert_eq!(ctx.role(), Some(Role::Admin));
    }
}
