//! Jira REST client.
//!
//! Boards and sprints come from the Agile 1.0 API; issues and the current
//! user from REST API v2, which returns descriptions and comment bodies as
//! wiki markup.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::types::{Board, CurrentUser, Issue, IssuePage, IssueSummary, Page, Sprint};
use crate::config::Profile;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default attempts per request for transient failures.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Base delay between retries in milliseconds.
const RETRY_DELAY_MS: u64 = 1000;

/// Upper bound on pages followed for one listing.
const MAX_PAGES: u32 = 200;

/// Fields requested for the issue detail view.
const ISSUE_FIELDS: &str = "summary,description,assignee,reporter,comment";

/// Async Jira client. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct JiraClient {
    client: Client,
    base_url: String,
    auth: Auth,
    max_retries: u32,
}

impl JiraClient {
    /// Create a client for a profile, resolving its API token.
    ///
    /// The connection is not checked; call [`JiraClient::connect`] for that.
    #[instrument(skip(profile), fields(profile_name = %profile.name))]
    pub fn new(profile: &Profile) -> Result<Self> {
        let (auth, source) = Auth::resolve(profile)?;
        info!(token_source = ?source, "Creating Jira client");
        Ok(Self {
            client: Self::build_http_client()?,
            base_url: normalize_base_url(&profile.url),
            auth,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Create a client with explicit credentials.
    pub fn with_credentials(base_url: &str, email: &str, token: &str) -> Result<Self> {
        Ok(Self {
            client: Self::build_http_client()?,
            base_url: normalize_base_url(base_url),
            auth: Auth::new(email, token),
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Set the number of attempts per request (at least one).
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    fn build_http_client() -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Network)
    }

    /// Check the URL and credentials by fetching the current user.
    #[instrument(skip(self))]
    pub async fn connect(&self) -> Result<CurrentUser> {
        debug!("Validating Jira connection");

        let user = self.get_current_user().await.map_err(|e| {
            error!("Connection validation failed: {}", e);
            match e {
                ApiError::Unauthorized | ApiError::Forbidden => e,
                ApiError::Network(_) => {
                    ApiError::ConnectionFailed(format!("cannot reach {}: {}", self.base_url, e))
                }
                _ => ApiError::ConnectionFailed(e.to_string()),
            }
        })?;

        info!("Connected as user: {}", user.display_name);
        Ok(user)
    }

    /// `GET /rest/api/2/myself`.
    #[instrument(skip(self))]
    pub async fn get_current_user(&self) -> Result<CurrentUser> {
        let url = format!("{}/rest/api/2/myself", self.base_url);
        self.get(&url).await
    }

    /// Every board visible to the user, following pagination.
    #[instrument(skip(self))]
    pub async fn get_boards(&self) -> Result<Vec<Board>> {
        let url = format!("{}/rest/agile/1.0/board", self.base_url);
        let boards = self.get_all_pages(&url, "board list").await?;
        debug!("Fetched {} boards", boards.len());
        Ok(boards)
    }

    /// Active sprints of a board.
    #[instrument(skip(self), fields(board_id = %board_id))]
    pub async fn get_active_sprints(&self, board_id: &str) -> Result<Vec<Sprint>> {
        let url = format!(
            "{}/rest/agile/1.0/board/{}/sprint?state=active",
            self.base_url,
            urlencoding::encode(board_id)
        );
        let sprints = self
            .get_all_pages(&url, &format!("board {}", board_id))
            .await?;
        debug!("Fetched {} active sprints", sprints.len());
        Ok(sprints)
    }

    /// Issues of a sprint, following pagination.
    #[instrument(skip(self), fields(sprint_id = %sprint_id))]
    pub async fn get_sprint_issues(&self, sprint_id: &str) -> Result<Vec<IssueSummary>> {
        let base = format!(
            "{}/rest/agile/1.0/sprint/{}/issue?fields=summary",
            self.base_url,
            urlencoding::encode(sprint_id)
        );

        let mut issues = Vec::new();
        let mut start_at = 0;
        for _ in 0..MAX_PAGES {
            let url = format!("{}&startAt={}", base, start_at);
            let page: IssuePage = self
                .get(&url)
                .await
                .map_err(|e| with_not_found_context(e, || format!("sprint {}", sprint_id)))?;
            let more = page.has_more();
            start_at = page.next_start();
            issues.extend(page.issues);
            if !more {
                break;
            }
        }

        debug!("Fetched {} sprint issues", issues.len());
        Ok(issues)
    }

    /// One issue with description and comments.
    #[instrument(skip(self), fields(issue_id = %issue_id))]
    pub async fn get_issue(&self, issue_id: &str) -> Result<Issue> {
        let url = format!(
            "{}/rest/api/2/issue/{}?fields={}",
            self.base_url,
            urlencoding::encode(issue_id),
            ISSUE_FIELDS
        );
        let issue: Issue = self
            .get(&url)
            .await
            .map_err(|e| with_not_found_context(e, || format!("issue {}", issue_id)))?;

        debug!("Fetched issue: {}", issue.key);
        Ok(issue)
    }

    /// Collect `values` from an Agile endpoint until `isLast`.
    async fn get_all_pages<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<Vec<T>> {
        let separator = if url.contains('?') { '&' } else { '?' };
        let mut values = Vec::new();
        let mut start_at = 0;

        for _ in 0..MAX_PAGES {
            let page_url = format!("{}{}startAt={}", url, separator, start_at);
            let page: Page<T> = self
                .get(&page_url)
                .await
                .map_err(|e| with_not_found_context(e, || what.to_string()))?;
            let more = page.has_more();
            start_at = page.next_start();
            values.extend(page.values);
            if !more {
                return Ok(values);
            }
        }

        warn!("Stopped after {} pages of {}", MAX_PAGES, what);
        Ok(values)
    }

    /// GET with authentication, retrying transient failures with backoff.
    #[instrument(skip(self), fields(url = %url))]
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!("Request attempt {}/{}", attempt, self.max_retries);

            match self.execute_get::<T>(url).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay = retry_delay(attempt);
                    warn!(
                        "Request failed (attempt {}), retrying in {}ms: {}",
                        attempt, delay, e
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn execute_get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        handle_response(response).await
    }

    /// The Jira base URL requests are made against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attempts made for a request before giving up.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let url = response.url().path().to_string();

    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("failed to parse response: {}", e)))
    } else {
        let body = response.text().await.unwrap_or_default();
        debug!("Error response body: {}", body);
        Err(error_from_response(status, &url, &body))
    }
}

/// Build an error from a failed response, preferring Jira's own messages.
fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return ApiError::from_status(status, url);
    };

    let mut messages: Vec<String> = json
        .get("errorMessages")
        .and_then(|m| m.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if let Some(errors) = json.get("errors").and_then(|e| e.as_object()) {
        messages.extend(errors.iter().map(|(field, msg)| match msg.as_str() {
            Some(text) => format!("{}: {}", field, text),
            None => format!("{}: {}", field, msg),
        }));
    }

    if messages.is_empty() {
        ApiError::from_status(status, url)
    } else {
        ApiError::from_status(status, &messages.join(", "))
    }
}

/// Name what was missing in a 404, keeping any message Jira supplied.
fn with_not_found_context(error: ApiError, what: impl FnOnce() -> String) -> ApiError {
    match error {
        ApiError::NotFound(path) if path.starts_with('/') => ApiError::NotFound(what()),
        ApiError::NotFound(message) => ApiError::NotFound(format!("{}: {}", what(), message)),
        other => other,
    }
}

/// Exponential backoff: 1s, 2s, 4s, ...
fn retry_delay(attempt: u32) -> u64 {
    RETRY_DELAY_MS * 2u64.pow(attempt.saturating_sub(1).min(16))
}

/// Remove trailing slashes, warning about plain HTTP outside localhost.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');
    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}", url);
    }
    url.to_string()
}
