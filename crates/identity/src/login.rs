//! Mock identity provider.
//!
//! No credentials are checked: any well-formed email signs in, and the
//! configured admin address receives the admin role.

use frostcart_core::{DomainError, DomainResult};

use crate::user::{Role, User, UserId};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockAuthenticator {
    admin_email: String,
}

impl MockAuthenticator {
    pub fn new(admin_email: impl Into<String>) -> Self {
        Self {
            admin_email: admin_email.into(),
        }
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    /// Email/password form sign-in.
    pub fn login_with_email(&self, email: &str, password: &str) -> DomainResult<User> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DomainError::validation("email cannot be empty"));
        }
        if !email.contains('@') {
            return Err(DomainError::validation(format!("'{email}' is not an email address")));
        }
        if password.is_empty() {
            return Err(DomainError::validation("password cannot be empty"));
        }

        let is_admin = email.eq_ignore_ascii_case(self.admin_email.trim());
        let (name, role) = if is_admin {
            ("Admin User", Role::Admin)
        } else {
            ("Regular User", Role::User)
        };

        Ok(User {
            id: UserId::new("1"),
            email: email.to_string(),
            name: name.to_string(),
            role,
        })
    }

    /// "Continue with Google": always the same shopper account.
    pub fn login_with_google(&self) -> User {
        User {
            id: UserId::new("2"),
            email: "user@example.com".to_string(),
            name: "Google User".to_string(),
            role: Role::User,
        }
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_EMAIL)
    }
}
