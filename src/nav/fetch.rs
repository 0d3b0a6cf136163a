//! Fetch requests issued by navigation and the results they produce.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{InvariantViolation, Level};
use crate::api::types::{Board, Issue, IssueSummary, Sprint};

/// What to fetch from the remote data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchRequest {
    /// All boards (the unscoped root fetch).
    Boards,
    /// Active sprints of a board.
    Sprints { board_id: String },
    /// Issues of a sprint.
    Issues { sprint_id: String },
    /// One issue with comments.
    IssueDetail { issue_id: String },
}

impl FetchRequest {
    /// The request that loads `level`, scoped by the id selected one level up.
    ///
    /// The root takes no selector; every other level requires one.
    pub fn for_level(level: Level, selector: Option<&str>) -> Result<Self, InvariantViolation> {
        match (level, selector) {
            (Level::BoardList, None) => Ok(FetchRequest::Boards),
            (Level::SprintList, Some(id)) => Ok(FetchRequest::Sprints {
                board_id: id.to_string(),
            }),
            (Level::IssueList, Some(id)) => Ok(FetchRequest::Issues {
                sprint_id: id.to_string(),
            }),
            (Level::IssueDetail, Some(id)) => Ok(FetchRequest::IssueDetail {
                issue_id: id.to_string(),
            }),
            (Level::BoardList, Some(id)) => Err(InvariantViolation::ScopedRootFetch(id.to_string())),
            (level, None) => Err(InvariantViolation::MissingSelector(level)),
        }
    }

    /// The level whose content this request loads.
    pub fn level(&self) -> Level {
        match self {
            FetchRequest::Boards => Level::BoardList,
            FetchRequest::Sprints { .. } => Level::SprintList,
            FetchRequest::Issues { .. } => Level::IssueList,
            FetchRequest::IssueDetail { .. } => Level::IssueDetail,
        }
    }

    /// The scoping id, if any.
    pub fn scope(&self) -> Option<&str> {
        match self {
            FetchRequest::Boards => None,
            FetchRequest::Sprints { board_id } => Some(board_id),
            FetchRequest::Issues { sprint_id } => Some(sprint_id),
            FetchRequest::IssueDetail { issue_id } => Some(issue_id),
        }
    }
}

impl fmt::Display for FetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope() {
            Some(scope) => write!(f, "{} of {}", self.level(), scope),
            None => write!(f, "{}", self.level()),
        }
    }
}

/// Tag attached to every fetch so its result can be matched to the request.
///
/// A result is honored only when its ticket equals the state machine's
/// pending ticket. The generation increases with every issued fetch, so an
/// older request for the same level is rejected as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchTicket {
    /// The level the fetch was issued for.
    pub level: Level,
    /// Monotonic request counter.
    pub generation: u64,
}

/// The outcome of a successful fetch, one variant per request kind.
#[derive(Debug, Clone)]
pub enum FetchResult {
    Boards(Vec<Board>),
    Sprints(Vec<Sprint>),
    Issues(Vec<IssueSummary>),
    IssueDetail(Box<Issue>),
}

impl FetchResult {
    /// The level this result renders as.
    pub fn level(&self) -> Level {
        match self {
            FetchResult::Boards(_) => Level::BoardList,
            FetchResult::Sprints(_) => Level::SprintList,
            FetchResult::Issues(_) => Level::IssueList,
            FetchResult::IssueDetail(_) => Level::IssueDetail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_level_root_is_unscoped() {
        assert_eq!(
            FetchRequest::for_level(Level::BoardList, None).unwrap(),
            FetchRequest::Boards
        );
    }

    #[test]
    fn test_for_level_scoped() {
        let request = FetchRequest::for_level(Level::SprintList, Some("7")).unwrap();
        assert_eq!(
            request,
            FetchRequest::Sprints {
                board_id: "7".to_string()
            }
        );
        assert_eq!(request.level(), Level::SprintList);
        assert_eq!(request.scope(), Some("7"));
        assert_eq!(request.to_string(), "Sprints of 7");
    }

    #[test]
    fn test_for_level_rejects_scoped_root() {
        let err = FetchRequest::for_level(Level::BoardList, Some("7")).unwrap_err();
        assert!(matches!(err, InvariantViolation::ScopedRootFetch(_)));
    }

    #[test]
    fn test_for_level_rejects_missing_selector() {
        let err = FetchRequest::for_level(Level::IssueDetail, None).unwrap_err();
        assert!(matches!(
            err,
            InvariantViolation::MissingSelector(Level::IssueDetail)
        ));
    }

    #[test]
    fn test_result_level() {
        assert_eq!(FetchResult::Boards(vec![]).level(), Level::BoardList);
        assert_eq!(FetchResult::Issues(vec![]).level(), Level::IssueList);
    }
}
