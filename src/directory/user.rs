//! # User Model
//!
//! The user record served by the directory, plus the validated input type
//! shared by the create and update operations.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::{DirectoryError, DirectoryResult};

/// Accepted email shape: `local@domain.tld`, no whitespace or extra `@`.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// Returns whether the email matches the accepted pattern
pub fn email_is_valid(email: &str) -> bool {
    email_regex().is_match(email)
}

/// A user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the store
    pub id: u64,

    /// Display name (non-empty)
    pub name: String,

    /// Email address (unique across the collection)
    pub email: String,

    /// Free-text role label, used only for grouping
    pub role: String,
}

/// Input for the create and update operations.
///
/// All three fields are required. Absent JSON fields deserialize to the
/// empty string so that a missing field and an empty field fail the same
/// presence check.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

impl UserDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: role.into(),
        }
    }

    /// Check required-field presence and email shape.
    ///
    /// Presence is checked for all three fields before the email format,
    /// so a request that is missing fields reports that first.
    pub fn validate(&self) -> DirectoryResult<()> {
        if self.name.is_empty() || self.email.is_empty() || self.role.is_empty() {
            return Err(DirectoryError::MissingFields);
        }

        if !email_is_valid(&self.email) {
            return Err(DirectoryError::InvalidEmail);
        }

        Ok(())
    }

    /// Materialize a record with the given id
    pub fn into_user(self, id: u64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            role: self.role,
        }
    }
}
