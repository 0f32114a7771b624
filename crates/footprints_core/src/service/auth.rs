//! Moderator password gate.
//!
//! # Invariants
//! - A [`ModeratorToken`] can only be obtained through [`AdminGate::verify`].
//! - Passwords are never logged.

use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingPassword,
    InvalidPassword,
    /// No admin password is configured; the gate rejects everyone.
    NotConfigured,
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPassword => write!(f, "password is required"),
            Self::InvalidPassword => write!(f, "invalid password"),
            Self::NotConfigured => write!(f, "moderation is disabled: no admin password configured"),
        }
    }
}

impl Error for AuthError {}

/// Proof of a successful password check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeratorToken {
    _private: (),
}

/// Compares supplied passwords against the configured one.
#[derive(Clone, Default)]
pub struct AdminGate {
    password: Option<String>,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("configured", &self.password.is_some())
            .finish()
    }
}

impl AdminGate {
    pub fn new(password: Option<String>) -> Self {
        Self {
            password: password.filter(|value| !value.is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.password.is_some()
    }

    pub fn verify(&self, supplied: &str) -> Result<ModeratorToken, AuthError> {
        let Some(expected) = self.password.as_deref() else {
            warn!("event=admin_auth module=auth status=error error_code=not_configured");
            return Err(AuthError::NotConfigured);
        };
        if supplied.is_empty() {
            return Err(AuthError::MissingPassword);
        }
        if !constant_time_eq(expected.as_bytes(), supplied.as_bytes()) {
            warn!("event=admin_auth module=auth status=error error_code=invalid_password");
            return Err(AuthError::InvalidPassword);
        }
        Ok(ModeratorToken { _private: () })
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
