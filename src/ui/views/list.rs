//! Table view for the board, sprint and issue levels.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::events::FilterKey;
use crate::ui::{render_filter_bar, RowFilter};
use crate::view::{ListContent, Width};

/// Rows moved by page up/down when the height is not known yet.
const DEFAULT_PAGE_SIZE: usize = 10;

/// Selection, scroll and filter state for a list level.
///
/// The selection indexes the visible rows. With a filter active those are a
/// subset of the content's rows, so ids are looked up through `visible`.
#[derive(Debug, Default)]
pub struct ListView {
    state: TableState,
    /// Visible rows at the last render.
    page_size: usize,
    filter: RowFilter,
    /// Indices into the content's rows, in display order.
    visible: Vec<usize>,
}

impl ListView {
    /// Create an empty list view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show freshly fetched content: clear the filter and select the first row.
    pub fn reset(&mut self, content: &ListContent) {
        self.state = TableState::default();
        self.filter.clear();
        self.visible = (0..content.len()).collect();
        if !self.visible.is_empty() {
            self.state.select(Some(0));
        }
    }

    /// Index of the selection among the visible rows.
    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    /// The id of the selected row of `content`.
    pub fn selected_id<'a>(&self, content: &'a ListContent) -> Option<&'a str> {
        self.selected()
            .and_then(|index| self.visible.get(index))
            .and_then(|&row| content.id_at(row))
    }

    /// Number of rows that pass the filter.
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Whether keys currently go to the filter.
    pub fn is_filtering(&self) -> bool {
        self.filter.is_editing()
    }

    /// Whether a filter is narrowing the rows.
    pub fn has_filter(&self) -> bool {
        self.filter.is_active()
    }

    /// Begin typing a filter.
    pub fn start_filter(&mut self, content: &ListContent) {
        self.filter.start();
        self.refilter(content);
    }

    /// Apply one filter edit.
    pub fn edit_filter(&mut self, key: FilterKey, content: &ListContent) {
        match key {
            FilterKey::Push(c) => self.filter.push_char(c),
            FilterKey::Pop => {
                self.filter.pop_char();
            }
            FilterKey::Confirm => {
                self.filter.confirm();
                return;
            }
            FilterKey::Cancel => self.filter.clear(),
        }
        self.refilter(content);
    }

    /// Drop the filter, keeping the selected row selected.
    pub fn clear_filter(&mut self, content: &ListContent) {
        self.filter.clear();
        self.refilter(content);
    }

    /// Recompute the visible rows, keeping the selected row if it still
    /// matches.
    fn refilter(&mut self, content: &ListContent) {
        let current = self.selected().and_then(|index| self.visible.get(index).copied());
        self.visible = self.filter.matching_rows(content);

        let selection = match current.and_then(|row| self.visible.iter().position(|&r| r == row)) {
            Some(position) => Some(position),
            None if self.visible.is_empty() => None,
            None => Some(0),
        };
        self.state.select(selection);
    }

    /// Move the selection down one row.
    pub fn select_next(&mut self) {
        self.move_by(1);
    }

    /// Move the selection up one row.
    pub fn select_prev(&mut self) {
        self.move_by(-1);
    }

    /// Move the selection down one page.
    pub fn page_down(&mut self) {
        self.move_by(self.page() as isize);
    }

    /// Move the selection up one page.
    pub fn page_up(&mut self) {
        self.move_by(-(self.page() as isize));
    }

    /// Select the first visible row.
    pub fn select_first(&mut self) {
        if !self.visible.is_empty() {
            self.state.select(Some(0));
        }
    }

    /// Select the last visible row.
    pub fn select_last(&mut self) {
        if !self.visible.is_empty() {
            self.state.select(Some(self.visible.len() - 1));
        }
    }

    fn page(&self) -> usize {
        if self.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        }
    }

    /// Move the selection by `delta`, clamped to the visible rows.
    fn move_by(&mut self, delta: isize) {
        let len = self.visible.len();
        if len == 0 {
            self.state.select(None);
            return;
        }
        let current = self.state.selected().unwrap_or(0).min(len - 1);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.state.select(Some(next));
    }

    /// Draw the table, with the filter prompt under it while a filter is on.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, content: &ListContent) {
        let (table_area, filter_area) = if self.filter.is_active() {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        let count = if self.filter.is_active() {
            format!("{}/{}", self.visible.len(), content.len())
        } else {
            content.len().to_string()
        };
        let block = Block::default()
            .title(format!(" {} ({}) ", content.level.label(), count))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        if self.visible.is_empty() {
            let message = if content.is_empty() {
                format!("No {} to show.", content.level.label().to_lowercase())
            } else {
                "No rows match the filter.".to_string()
            };
            let message = Paragraph::new(Line::styled(message, Style::default().fg(Color::DarkGray)))
                .block(block);
            frame.render_widget(message, table_area);
        } else {
            self.render_table(frame, table_area, content, block);
        }

        if let Some(filter_area) = filter_area {
            render_filter_bar(
                frame,
                filter_area,
                &self.filter,
                self.visible.len(),
                content.len(),
            );
        }
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect, content: &ListContent, block: Block) {
        // borders and header
        self.page_size = usize::from(area.height.saturating_sub(3)).max(1);

        let widths: Vec<Constraint> = content
            .columns
            .iter()
            .map(|column| match column.width {
                Width::Fixed(width) => Constraint::Length(width),
                Width::Flex => Constraint::Fill(1),
            })
            .collect();

        let header = Row::new(
            content
                .columns
                .iter()
                .map(|column| Cell::from(column.title)),
        )
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let rows = self
            .visible
            .iter()
            .filter_map(|&index| content.rows.get(index))
            .map(|row| {
                Row::new(
                    content
                        .columns
                        .iter()
                        .map(|column| Cell::from(row.get(column.key).to_string())),
                )
            });

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(2)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}
