//! Connection profile for one Jira instance.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Connection details for a Jira instance.
///
/// The API token may be written inline, but normally comes from the
/// environment or the OS keyring (see [`crate::api::Auth::resolve`]).
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Unique, whitespace-free profile name. Also the keyring user.
    pub name: String,

    /// Base URL, e.g. `https://company.atlassian.net`.
    pub url: String,

    /// Account email used for Basic auth.
    pub email: String,

    /// Inline API token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("email", &self.email)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Profile {
    /// Create a profile without a stored token.
    pub fn new(name: impl Into<String>, url: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            email: email.into(),
            token: None,
        }
    }

    /// Check the profile for obvious mistakes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first problem found.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(ConfigError::ValidationError(msg));

        if self.name.is_empty() {
            return invalid("profile name cannot be empty".to_string());
        }
        if self.name.contains(char::is_whitespace) {
            return invalid(format!(
                "profile name '{}' cannot contain whitespace",
                self.name
            ));
        }
        if self.url.is_empty() {
            return invalid(format!("profile '{}': URL cannot be empty", self.name));
        }
        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return invalid(format!(
                "profile '{}': URL must start with http:// or https://",
                self.name
            ));
        }
        if self.host().is_empty() {
            return invalid(format!("profile '{}': URL has no host", self.name));
        }
        if self.email.is_empty() {
            return invalid(format!("profile '{}': email cannot be empty", self.name));
        }
        if !self.email.contains('@') {
            return invalid(format!(
                "profile '{}': '{}' does not appear to be a valid email address",
                self.name, self.email
            ));
        }
        if matches!(self.token.as_deref(), Some(t) if t.trim().is_empty()) {
            return invalid(format!("profile '{}': token cannot be blank", self.name));
        }

        Ok(())
    }

    /// The host part of the URL, shown in the status bar.
    pub fn host(&self) -> &str {
        let rest = self
            .url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.url);
        let authority = rest.split('/').next().unwrap_or_default();
        authority.rsplit('@').next().unwrap_or_default()
    }
}
