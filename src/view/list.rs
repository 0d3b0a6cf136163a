//! Tabular content for the list levels.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;

use chrono::TimeZone;
use tracing::warn;
use unicode_width::UnicodeWidthStr;

use super::time::format_in;
use crate::api::types::{Board, IssueSummary, Sprint};
use crate::nav::Level;

/// Identifies a cell within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnKey {
    Id,
    Name,
    StartDate,
    EndDate,
    IssueKey,
    Summary,
}

/// How wide a column is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Exactly this many cells.
    Fixed(u16),
    /// Whatever space remains, shared between flexible columns.
    Flex,
}

/// A table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: ColumnKey,
    pub title: &'static str,
    pub width: Width,
}

/// One selectable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    /// The id pushed onto the navigation path when the row is entered.
    pub id: String,
    pub cells: BTreeMap<ColumnKey, String>,
}

impl ListRow {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cells: BTreeMap::new(),
        }
    }

    fn cell(mut self, key: ColumnKey, value: impl Into<String>) -> Self {
        self.cells.insert(key, value.into());
        self
    }

    /// The text of a cell, empty if the row has none for `key`.
    pub fn get(&self, key: ColumnKey) -> &str {
        self.cells.get(&key).map(String::as_str).unwrap_or_default()
    }
}

/// A materialized list level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListContent {
    pub level: Level,
    pub columns: Vec<Column>,
    pub rows: Vec<ListRow>,
}

impl ListContent {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The id of the row at `index`.
    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(|row| row.id.as_str())
    }
}

/// Column sizing rule before row data is known.
enum Sizing {
    /// Sized to the widest cell or title.
    Fit,
    Flex,
}

/// Assemble content: drop duplicate ids and size columns to their data.
fn build(level: Level, layout: &[(ColumnKey, &'static str, Sizing)], rows: Vec<ListRow>) -> ListContent {
    let mut seen = HashSet::new();
    let rows: Vec<ListRow> = rows
        .into_iter()
        .filter(|row| {
            let fresh = seen.insert(row.id.clone());
            if !fresh {
                warn!(level = %level, id = %row.id, "Dropping row with duplicate id");
            }
            fresh
        })
        .collect();

    let columns = layout
        .iter()
        .map(|(key, title, sizing)| {
            let width = match sizing {
                Sizing::Flex => Width::Flex,
                Sizing::Fit => {
                    let widest = rows
                        .iter()
                        .map(|row| row.get(*key).width())
                        .chain(std::iter::once(title.width()))
                        .max()
                        .unwrap_or_default();
                    Width::Fixed(u16::try_from(widest).unwrap_or(u16::MAX))
                }
            };
            Column {
                key: *key,
                title: *title,
                width,
            }
        })
        .collect();

    ListContent {
        level,
        columns,
        rows,
    }
}

/// Boards: id and name.
pub fn boards_to_list(boards: &[Board]) -> ListContent {
    let rows = boards
        .iter()
        .map(|board| {
            let id = board.id.to_string();
            ListRow::new(id.clone())
                .cell(ColumnKey::Id, id)
                .cell(ColumnKey::Name, board.name.clone())
        })
        .collect();

    build(
        Level::BoardList,
        &[
            (ColumnKey::Id, "ID", Sizing::Fit),
            (ColumnKey::Name, "Name", Sizing::Flex),
        ],
        rows,
    )
}

/// Sprints: id, name and the start/end dates in `zone`.
pub fn sprints_to_list<Tz>(sprints: &[Sprint], zone: &Tz) -> ListContent
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let date = |raw: &Option<String>| {
        raw.as_deref()
            .map(|value| format_in(value, zone))
            .unwrap_or_default()
    };

    let rows = sprints
        .iter()
        .map(|sprint| {
            let id = sprint.id.to_string();
            ListRow::new(id.clone())
                .cell(ColumnKey::Id, id)
                .cell(ColumnKey::Name, sprint.name.clone())
                .cell(ColumnKey::StartDate, date(&sprint.start_date))
                .cell(ColumnKey::EndDate, date(&sprint.end_date))
        })
        .collect();

    build(
        Level::SprintList,
        &[
            (ColumnKey::Id, "ID", Sizing::Fit),
            (ColumnKey::Name, "Name", Sizing::Flex),
            (ColumnKey::StartDate, "Start Date", Sizing::Fit),
            (ColumnKey::EndDate, "End Date", Sizing::Fit),
        ],
        rows,
    )
}

/// Issues: key and summary. Rows are identified by issue id.
pub fn issues_to_list(issues: &[IssueSummary]) -> ListContent {
    let rows = issues
        .iter()
        .map(|issue| {
            ListRow::new(issue.id.clone())
                .cell(ColumnKey::IssueKey, issue.key.clone())
                .cell(ColumnKey::Summary, issue.fields.summary.clone())
        })
        .collect();

    build(
        Level::IssueList,
        &[
            (ColumnKey::IssueKey, "Key", Sizing::Fit),
            (ColumnKey::Summary, "Summary", Sizing::Flex),
        ],
        rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::SummaryFields;
    use chrono::Utc;

    fn board(id: u64, name: &str) -> Board {
        Board {
            id,
            name: name.to_string(),
            board_type: None,
        }
    }

    #[test]
    fn test_boards_to_list() {
        let content = boards_to_list(&[board(7, "Platform"), board(12, "Ops")]);

        assert_eq!(content.level, Level::BoardList);
        assert_eq!(content.len(), 2);
        assert_eq!(content.id_at(1), Some("12"));
        assert_eq!(content.rows[0].get(ColumnKey::Name), "Platform");
        assert_eq!(content.columns[0].width, Width::Fixed(2));
        assert_eq!(content.columns[1].width, Width::Flex);
    }

    #[test]
    fn test_fixed_width_counts_title() {
        let content = boards_to_list(&[board(1, "A")]);
        assert_eq!(content.columns[0].width, Width::Fixed(2));
    }

    #[test]
    fn test_duplicate_ids_dropped() {
        let content = boards_to_list(&[board(7, "First"), board(7, "Second"), board(8, "Third")]);
        assert_eq!(content.len(), 2);
        assert_eq!(content.rows[0].get(ColumnKey::Name), "First");
        assert_eq!(content.id_at(1), Some("8"));
    }

    #[test]
    fn test_sprints_to_list_formats_dates() {
        let sprint = Sprint {
            id: 42,
            name: "Sprint 42".to_string(),
            state: Some("active".to_string()),
            start_date: Some("2024-01-08T09:00:00.000Z".to_string()),
            end_date: None,
            origin_board_id: Some(7),
        };
        let content = sprints_to_list(&[sprint], &Utc);

        let row = &content.rows[0];
        assert_eq!(row.id, "42");
        assert_eq!(row.get(ColumnKey::StartDate), "Mon, 08 Jan 2024 09:00:00 +0000");
        assert_eq!(row.get(ColumnKey::EndDate), "");
        assert_eq!(content.columns[2].width, Width::Fixed(31));
        assert_eq!(content.columns[3].width, Width::Fixed(8));
    }

    #[test]
    fn test_issues_keyed_by_id() {
        let issue = IssueSummary {
            id: "10001".to_string(),
            key: "PLAT-1".to_string(),
            fields: SummaryFields {
                summary: "Fix it".to_string(),
            },
        };
        let content = issues_to_list(&[issue]);

        assert_eq!(content.id_at(0), Some("10001"));
        assert_eq!(content.rows[0].get(ColumnKey::IssueKey), "PLAT-1");
        assert_eq!(content.columns[0].width, Width::Fixed(6));
    }

    #[test]
    fn test_wide_characters_measured_by_display_width() {
        let issue = IssueSummary {
            id: "1".to_string(),
            key: "日本語-1".to_string(),
            fields: SummaryFields {
                summary: String::new(),
            },
        };
        let content = issues_to_list(&[issue]);
        assert_eq!(content.columns[0].width, Width::Fixed(8));
    }

    #[test]
    fn test_empty_list() {
        let content = issues_to_list(&[]);
        assert!(content.is_empty());
        assert_eq!(content.id_at(0), None);
        assert_eq!(content.columns[0].width, Width::Fixed(3));
    }
}
