//! Jira API client and response types.

mod auth;
mod client;
mod error;
pub mod types;

pub use auth::{Auth, TokenSource, KEYRING_SERVICE, TOKEN_ENV_VAR};
pub use client::{JiraClient, DEFAULT_MAX_RETRIES};
pub use error::{ApiError, Result};
pub use types::{Board, Comment, CurrentUser, Issue, IssueSummary, Sprint};
