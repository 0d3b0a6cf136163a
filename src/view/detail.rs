//! Content for the issue detail level.

use std::fmt::Display;

use chrono::TimeZone;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use super::time::format_in;
use crate::api::types::{Comment, Issue};
use crate::markup::{render_heading, render_markup};

/// One rendered comment.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentBlock {
    /// Author/date line, plus an edit note when the comment was changed.
    pub header: Vec<Line<'static>>,
    pub body: Text<'static>,
}

/// A materialized issue.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailContent {
    pub issue_id: String,
    pub key: String,
    pub title: Text<'static>,
    pub description: Text<'static>,
    pub comments: Vec<CommentBlock>,
    /// Assignee and reporter.
    pub details: Text<'static>,
}

impl DetailContent {
    /// The scrolling pane under the title: description, then comments.
    pub fn body(&self) -> Text<'static> {
        let mut lines: Vec<Line<'static>> = Vec::new();
        if self.description.lines.is_empty() {
            lines.push(Line::styled(
                "No description.",
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            lines.extend(self.description.lines.iter().cloned());
        }

        if !self.comments.is_empty() {
            lines.push(Line::default());
            lines.extend(render_heading("Comments", 2).lines);
            for comment in &self.comments {
                lines.push(Line::default());
                lines.extend(comment.framed());
            }
        }

        Text::from(lines)
    }
}

impl CommentBlock {
    /// Header and body behind a light box-drawing gutter.
    fn framed(&self) -> Vec<Line<'static>> {
        let border = Style::default().fg(Color::DarkGray);
        let mut lines = Vec::with_capacity(self.header.len() + self.body.lines.len() + 1);
        for (i, line) in self.header.iter().chain(self.body.lines.iter()).enumerate() {
            let gutter = if i == 0 { "┌ " } else { "│ " };
            let mut spans = vec![Span::styled(gutter, border)];
            spans.extend(line.spans.iter().cloned());
            lines.push(Line::from(spans).style(line.style));
        }
        lines.push(Line::styled("└─", border));
        lines
    }
}

/// Build the detail view of an issue, rendering dates in `zone`.
pub fn issue_to_detail<Tz>(issue: &Issue, zone: &Tz) -> DetailContent
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let label = Style::default().fg(Color::DarkGray);
    let mut details = render_heading("Details", 3);
    details.lines.push(Line::from(vec![
        Span::styled("Assignee: ", label),
        Span::raw(issue.assignee_name().to_string()),
    ]));
    details.lines.push(Line::from(vec![
        Span::styled("Reporter: ", label),
        Span::raw(issue.reporter_name().to_string()),
    ]));

    DetailContent {
        issue_id: issue.id.clone(),
        key: issue.key.clone(),
        title: render_heading(&issue.to_string(), 1),
        description: render_markup(issue.description()),
        comments: issue
            .comments()
            .iter()
            .map(|comment| comment_block(comment, zone))
            .collect(),
        details,
    }
}

fn comment_block<Tz>(comment: &Comment, zone: &Tz) -> CommentBlock
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let author = Style::default().add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(Color::DarkGray);

    let mut header = vec![Line::from(vec![
        Span::styled(comment.author_name().to_string(), author),
        Span::styled(format!(", at {}", format_in(&comment.created, zone)), muted),
    ])];
    if comment.is_edited() {
        header.push(Line::styled(
            format!(
                "(Last updated by {} at {})",
                comment.editor_name(),
                format_in(&comment.updated, zone)
            ),
            muted.add_modifier(Modifier::ITALIC),
        ));
    }

    CommentBlock {
        header,
        body: render_markup(&comment.body),
    }
}
