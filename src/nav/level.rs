//! Hierarchy levels of the drill-down.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The tier of the hierarchy currently displayed.
///
/// Levels are ordered from the root (`BoardList`) to the leaf (`IssueDetail`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    /// All boards visible to the signed-in user.
    BoardList,
    /// Active sprints of one board.
    SprintList,
    /// Issues of one sprint.
    IssueList,
    /// A single issue.
    IssueDetail,
}

impl Level {
    /// The root level, shown at startup and after backing out of everything.
    pub const ROOT: Level = Level::BoardList;

    /// The level reached by selecting a row at this level.
    ///
    /// Returns `None` for `IssueDetail`, which has no children.
    pub fn child(self) -> Option<Level> {
        match self {
            Level::BoardList => Some(Level::SprintList),
            Level::SprintList => Some(Level::IssueList),
            Level::IssueList => Some(Level::IssueDetail),
            Level::IssueDetail => None,
        }
    }

    /// Whether this level is rendered as a selectable list.
    pub fn is_list(self) -> bool {
        self.child().is_some()
    }

    /// Short label for the title line and status bar.
    pub fn label(self) -> &'static str {
        match self {
            Level::BoardList => "Boards",
            Level::SprintList => "Sprints",
            Level::IssueList => "Issues",
            Level::IssueDetail => "Issue",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
