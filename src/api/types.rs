//! JIRA API response types.
//!
//! These types model the JIRA Agile 1.0 board/sprint endpoints and the
//! REST API v2 issue endpoint. API v2 is used for issues because it returns
//! descriptions and comment bodies as wiki-markup strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The current authenticated user.
///
/// Returned by `GET /rest/api/2/myself`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// The user's account ID (Cloud only).
    #[serde(default)]
    pub account_id: Option<String>,
    /// The user's display name.
    pub display_name: String,
    /// The user's email address (may be hidden).
    #[serde(default)]
    pub email_address: Option<String>,
}

/// A page of values from an Agile endpoint.
///
/// Returned by `GET /rest/agile/1.0/board` and
/// `GET /rest/agile/1.0/board/{boardId}/sprint`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The index of the first value.
    #[serde(default)]
    pub start_at: u32,
    /// Maximum values requested.
    #[serde(default)]
    pub max_results: u32,
    /// Whether this is the final page.
    #[serde(default = "default_true")]
    pub is_last: bool,
    /// The values on this page.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

fn default_true() -> bool {
    true
}

impl<T> Page<T> {
    /// Get the starting index for the next page.
    pub fn next_start(&self) -> u32 {
        self.start_at.saturating_add(page_len(self.values.len()))
    }

    /// Check if another page should be requested.
    ///
    /// An empty page is treated as final even when `isLast` is false, as is
    /// a page whose offset can no longer advance.
    pub fn has_more(&self) -> bool {
        !self.is_last && !self.values.is_empty() && self.next_start() > self.start_at
    }
}

/// An agile board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// The board ID.
    pub id: u64,
    /// The board name.
    pub name: String,
    /// The board type ("scrum", "kanban", "simple").
    #[serde(default, rename = "type")]
    pub board_type: Option<String>,
}

/// A sprint of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    /// The sprint ID.
    pub id: u64,
    /// The sprint name.
    pub name: String,
    /// The sprint state ("active", "future", "closed").
    #[serde(default)]
    pub state: Option<String>,
    /// RFC 3339 start timestamp.
    #[serde(default)]
    pub start_date: Option<String>,
    /// RFC 3339 end timestamp.
    #[serde(default)]
    pub end_date: Option<String>,
    /// The board the sprint was created on.
    #[serde(default)]
    pub origin_board_id: Option<u64>,
}

/// Issues page returned by `GET /rest/agile/1.0/sprint/{sprintId}/issue`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePage {
    /// The index of the first result.
    #[serde(default)]
    pub start_at: u32,
    /// Maximum results requested.
    #[serde(default)]
    pub max_results: u32,
    /// Total number of matching issues.
    #[serde(default)]
    pub total: u32,
    /// The issues on this page.
    #[serde(default)]
    pub issues: Vec<IssueSummary>,
}

impl IssuePage {
    /// Check if there are more pages of results.
    pub fn has_more(&self) -> bool {
        !self.issues.is_empty() && self.next_start() < self.total
    }

    /// Get the starting index for the next page.
    pub fn next_start(&self) -> u32 {
        self.start_at.saturating_add(page_len(self.issues.len()))
    }
}

/// A page length as a Jira offset.
fn page_len(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// An issue as listed within a sprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    /// The issue ID.
    pub id: String,
    /// The issue key (e.g., "PROJ-123").
    pub key: String,
    /// The requested subset of fields.
    pub fields: SummaryFields,
}

/// Fields requested for listed issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryFields {
    /// The issue summary/title.
    #[serde(default)]
    pub summary: String,
}

/// A JIRA issue with the fields needed for the detail view.
///
/// Returned by `GET /rest/api/2/issue/{issueIdOrKey}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// The issue ID.
    pub id: String,
    /// The issue key (e.g., "PROJ-123").
    pub key: String,
    /// The issue fields.
    pub fields: IssueFields,
}

impl Issue {
    /// Get the issue summary.
    pub fn summary(&self) -> &str {
        &self.fields.summary
    }

    /// Get the description in wiki markup, or an empty string if not set.
    pub fn description(&self) -> &str {
        self.fields.description.as_deref().unwrap_or_default()
    }

    /// Get the assignee display name, or an empty string if unassigned.
    pub fn assignee_name(&self) -> &str {
        self.fields
            .assignee
            .as_ref()
            .map(|u| u.display_name.as_str())
            .unwrap_or_default()
    }

    /// Get the reporter display name, or an empty string if not set.
    pub fn reporter_name(&self) -> &str {
        self.fields
            .reporter
            .as_ref()
            .map(|u| u.display_name.as_str())
            .unwrap_or_default()
    }

    /// Comments in the order JIRA returned them (oldest first).
    pub fn comments(&self) -> &[Comment] {
        self.fields
            .comment
            .as_ref()
            .map(|c| c.comments.as_slice())
            .unwrap_or_default()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.fields.summary)
    }
}

/// Issue fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueFields {
    /// The issue summary/title.
    #[serde(default)]
    pub summary: String,
    /// The issue description in wiki markup.
    #[serde(default)]
    pub description: Option<String>,
    /// The issue assignee.
    #[serde(default)]
    pub assignee: Option<User>,
    /// The issue reporter.
    #[serde(default)]
    pub reporter: Option<User>,
    /// Comments on the issue.
    #[serde(default)]
    pub comment: Option<CommentPage>,
}

/// A JIRA user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user's account ID (Cloud only).
    #[serde(default)]
    pub account_id: Option<String>,
    /// The user's display name.
    pub display_name: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// Comments embedded in an issue response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    /// The list of comments.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Total number of comments.
    #[serde(default)]
    pub total: u32,
}

/// A comment on a JIRA issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// The comment ID.
    pub id: String,
    /// The user who authored the comment (absent for deleted users).
    #[serde(default)]
    pub author: Option<User>,
    /// The user who last edited the comment.
    #[serde(default)]
    pub update_author: Option<User>,
    /// The comment body in wiki markup.
    #[serde(default)]
    pub body: String,
    /// When the comment was created.
    pub created: String,
    /// When the comment was last updated.
    pub updated: String,
}

impl Comment {
    /// Whether the comment was edited after it was posted.
    pub fn is_edited(&self) -> bool {
        self.created != self.updated
    }

    /// Author display name, or an empty string.
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|u| u.display_name.as_str())
            .unwrap_or_default()
    }

    /// Last editor display name, falling back to the author.
    pub fn editor_name(&self) -> &str {
        self.update_author
            .as_ref()
            .map(|u| u.display_name.as_str())
            .unwrap_or_else(|| self.author_name())
    }
}
