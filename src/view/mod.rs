//! Turning fetched data into displayable content.

mod detail;
mod list;
mod time;

use chrono::Local;

pub use detail::{issue_to_detail, CommentBlock, DetailContent};
pub use list::{
    boards_to_list, issues_to_list, sprints_to_list, Column, ColumnKey, ListContent, ListRow, Width,
};
pub use time::{format_in, parse_timestamp, DISPLAY_FORMAT};

use crate::nav::{FetchResult, Level};

/// Content for one level, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    List(ListContent),
    Detail(Box<DetailContent>),
}

impl Content {
    /// The level this content belongs to.
    pub fn level(&self) -> Level {
        match self {
            Content::List(list) => list.level,
            Content::Detail(_) => Level::IssueDetail,
        }
    }
}

/// Materialize a fetch result with dates in the local zone.
pub fn materialize(result: &FetchResult) -> Content {
    match result {
        FetchResult::Boards(boards) => Content::List(boards_to_list(boards)),
        FetchResult::Sprints(sprints) => Content::List(sprints_to_list(sprints, &Local)),
        FetchResult::Issues(issues) => Content::List(issues_to_list(issues)),
        FetchResult::IssueDetail(issue) => Content::Detail(Box::new(issue_to_detail(issue, &Local))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Board;

    #[test]
    fn test_materialize_keeps_level() {
        let content = materialize(&FetchResult::Boards(vec![Board {
            id: 1,
            name: "Main".to_string(),
            board_type: None,
        }]));
        assert_eq!(content.level(), Level::BoardList);
        assert!(matches!(content, Content::List(ref list) if list.len() == 1));

        assert_eq!(materialize(&FetchResult::Sprints(vec![])).level(), Level::SprintList);
        assert_eq!(materialize(&FetchResult::Issues(vec![])).level(), Level::IssueList);
    }
}
