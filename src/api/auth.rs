//! Basic authentication for the Jira API.
//!
//! The API token is looked up in order: the `SPRINTDECK_API_TOKEN`
//! environment variable, the profile's inline `token`, then the OS keyring.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tracing::debug;

use super::error::{ApiError, Result};
use crate::config::Profile;

/// Keyring service under which tokens are stored, one entry per profile.
pub const KEYRING_SERVICE: &str = "sprintdeck";

/// Environment variable that overrides every other token source.
pub const TOKEN_ENV_VAR: &str = "SPRINTDECK_API_TOKEN";

/// Where a token was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Environment,
    Profile,
    Keyring,
}

/// Encoded credentials. The raw token is not kept.
#[derive(Debug, Clone)]
pub struct Auth {
    email: String,
    auth_header: String,
}

impl Auth {
    /// Basic auth for `email` and an API token.
    pub fn new(email: &str, token: &str) -> Self {
        Self {
            email: email.to_string(),
            auth_header: build_auth_header(email, token),
        }
    }

    /// Resolve credentials for a profile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Keyring`] if no token is found anywhere.
    pub fn resolve(profile: &Profile) -> Result<(Self, TokenSource)> {
        let env_token = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|t| !t.trim().is_empty());

        let (token, source) = match (env_token, profile.token.as_deref()) {
            (Some(token), _) => (token, TokenSource::Environment),
            (None, Some(token)) => (token.to_string(), TokenSource::Profile),
            (None, None) => (keyring_token(&profile.name)?, TokenSource::Keyring),
        };

        debug!(profile = %profile.name, source = ?source, "Resolved API token");
        Ok((Self::new(&profile.email, token.trim()), source))
    }

    /// The complete `Basic ...` header value.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }

    /// The account email.
    pub fn email(&self) -> &str {
        &self.email
    }
}

fn build_auth_header(email: &str, token: &str) -> String {
    let credentials = format!("{}:{}", email, token);
    format!("Basic {}", BASE64.encode(credentials.as_bytes()))
}

/// Read a profile's token from the OS keyring.
fn keyring_token(profile_name: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry.get_password().map_err(|e| {
        ApiError::Keyring(format!(
            "no API token for profile '{}' (set {} or add it to the keyring): {}",
            profile_name, TOKEN_ENV_VAR, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn decode(auth: &Auth) -> String {
        let encoded = auth.header_value().strip_prefix("Basic ").unwrap();
        String::from_utf8(BASE64.decode(encoded).unwrap()).unwrap()
    }

    #[test]
    fn test_build_auth_header() {
        let auth = Auth::new("user@example.com", "api_token_here");
        assert_eq!(decode(&auth), "user@example.com:api_token_here");
        assert_eq!(auth.email(), "user@example.com");
    }

    #[test]
    fn test_auth_does_not_expose_token() {
        let auth = Auth::new("user@example.com", "secret_token");
        assert!(!format!("{:?}", auth).contains("secret_token"));
    }

    #[test]
    #[serial]
    fn test_env_token_wins() {
        std::env::set_var(TOKEN_ENV_VAR, "from-env");
        let mut profile = Profile::new("work", "https://x.net", "me@x.net");
        profile.token = Some("inline".to_string());

        let (auth, source) = Auth::resolve(&profile).unwrap();
        std::env::remove_var(TOKEN_ENV_VAR);

        assert_eq!(source, TokenSource::Environment);
        assert_eq!(decode(&auth), "me@x.net:from-env");
    }

    #[test]
    #[serial]
    fn test_profile_token_used_without_env() {
        std::env::remove_var(TOKEN_ENV_VAR);
        let mut profile = Profile::new("work", "https://x.net", "me@x.net");
        profile.token = Some(" inline \n".to_string());

        let (auth, source) = Auth::resolve(&profile).unwrap();

        assert_eq!(source, TokenSource::Profile);
        assert_eq!(decode(&auth), "me@x.net:inline");
    }
}
