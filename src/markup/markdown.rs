//! CommonMark to styled terminal text.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Render CommonMark into styled lines.
pub fn markdown_to_text(input: &str) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut writer = TextWriter::default();
    writer.run(Parser::new_ext(input, opts));
    writer.into_text()
}

/// Style for a heading of the given depth (1 is the largest).
pub fn heading_style(level: u8) -> Style {
    match level {
        1 => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        2 => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        3 => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        _ => Style::default().add_modifier(Modifier::BOLD),
    }
}

#[derive(Default)]
struct TextWriter {
    lines: Vec<Line<'static>>,
    /// Spans of the line being built.
    spans: Vec<Span<'static>>,
    /// Inline styles, innermost last.
    styles: Vec<Style>,
    lists: Vec<ListState>,
    /// Marker for the first line of the current list item.
    marker: Option<String>,
    /// Indent applied to continuation lines of the current list item.
    item_indent: usize,
    quote_depth: usize,
    code: Option<String>,
    link: Option<PendingLink>,
}

struct ListState {
    next: Option<u64>,
}

struct PendingLink {
    url: String,
    first_span: usize,
}

impl TextWriter {
    fn run<'a, I>(&mut self, events: I)
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            match event {
                Event::Start(tag) => self.start(tag),
                Event::End(tag) => self.end(tag),
                Event::Text(text) => self.text(text),
                Event::Code(code) => {
                    let style = self.style().fg(Color::Cyan);
                    self.spans.push(Span::styled(code.into_string(), style));
                }
                Event::Html(raw) | Event::InlineHtml(raw) => {
                    self.push_str(raw.trim_end_matches('\n'))
                }
                Event::FootnoteReference(name) => self.push_str(&format!("[{}]", name)),
                Event::SoftBreak => self.push_str(" "),
                Event::HardBreak => self.flush(),
                Event::Rule => {
                    self.flush();
                    self.lines.push(Line::styled(
                        "─".repeat(24),
                        Style::default().fg(Color::DarkGray),
                    ));
                    self.blank();
                }
                Event::TaskListMarker(done) => self.push_str(if done { "[x] " } else { "[ ] " }),
            }
        }
        self.flush();
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.flush(),
            Tag::Heading { level, .. } => {
                self.flush();
                self.styles.push(heading_style(heading_depth(level)));
            }
            Tag::BlockQuote => {
                self.flush();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        self.lines.push(Line::styled(
                            format!("[{}]", lang),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                }
                self.code = Some(String::new());
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(ListState { next: start });
            }
            Tag::Item => {
                self.flush();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(ListState { next: Some(n) }) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                let indent = "  ".repeat(depth);
                self.item_indent = indent.len() + marker.chars().count();
                self.marker = Some(format!("{}{}", indent, marker));
            }
            Tag::Emphasis => self.push_style(Modifier::ITALIC),
            Tag::Strong => self.push_style(Modifier::BOLD),
            Tag::Strikethrough => self.push_style(Modifier::CROSSED_OUT),
            Tag::Link { dest_url, .. } => {
                self.link = Some(PendingLink {
                    url: dest_url.into_string(),
                    first_span: self.spans.len(),
                });
                let style = self.style().fg(Color::Blue).add_modifier(Modifier::UNDERLINED);
                self.styles.push(style);
            }
            Tag::Image { dest_url, .. } => {
                self.push_str(&format!("[image: {}]", dest_url));
            }
            Tag::Table(_) | Tag::TableHead | Tag::TableRow => self.flush(),
            Tag::TableCell
            | Tag::FootnoteDefinition(_)
            | Tag::HtmlBlock
            | Tag::MetadataBlock(_) => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Heading(_) => {
                self.flush();
                self.styles.pop();
                self.blank();
            }
            TagEnd::BlockQuote => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                if self.quote_depth == 0 {
                    self.blank();
                }
            }
            TagEnd::CodeBlock => {
                let body = self.code.take().unwrap_or_default();
                let style = Style::default().fg(Color::Cyan);
                for line in body.trim_end_matches('\n').lines() {
                    self.lines.push(Line::from(vec![
                        Span::styled("│ ", Style::default().fg(Color::DarkGray)),
                        Span::styled(line.to_string(), style),
                    ]));
                }
                self.blank();
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.item_indent = 0;
                    self.marker = None;
                    self.blank();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link => {
                self.styles.pop();
                if let Some(link) = self.link.take() {
                    let label: String = self.spans[link.first_span.min(self.spans.len())..]
                        .iter()
                        .map(|s| s.content.as_ref())
                        .collect();
                    if !link.url.is_empty() && label != link.url {
                        self.spans.push(Span::styled(
                            format!(" <{}>", link.url),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                }
            }
            TagEnd::TableCell => self.push_str(" │ "),
            TagEnd::TableHead | TagEnd::TableRow => self.flush(),
            TagEnd::Table => {
                self.flush();
                self.blank();
            }
            _ => {}
        }
    }

    fn text(&mut self, text: CowStr<'_>) {
        if let Some(code) = self.code.as_mut() {
            code.push_str(&text);
            return;
        }
        self.push_str(&text);
    }

    fn push_str(&mut self, text: &str) {
        let style = self.style();
        self.spans.push(Span::styled(text.to_string(), style));
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, modifier: Modifier) {
        let style = self.style().add_modifier(modifier);
        self.styles.push(style);
    }

    /// Move the pending spans into a finished line with quote and list prefixes.
    fn flush(&mut self) {
        if self.spans.is_empty() {
            return;
        }

        let mut prefix = Vec::new();
        if self.quote_depth > 0 {
            prefix.push(Span::styled(
                "│ ".repeat(self.quote_depth),
                Style::default().fg(Color::Green),
            ));
        }
        match self.marker.take() {
            Some(marker) => prefix.push(Span::styled(marker, Style::default().fg(Color::Yellow))),
            None if self.item_indent > 0 && !self.lists.is_empty() => {
                prefix.push(Span::raw(" ".repeat(self.item_indent)));
            }
            None => {}
        }

        prefix.append(&mut self.spans);
        self.lines.push(Line::from(prefix));
    }

    fn blank(&mut self) {
        if self.lines.last().map_or(false, |l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn into_text(mut self) -> Text<'static> {
        while self.lines.last().map_or(false, |l| l.spans.is_empty()) {
            self.lines.pop();
        }
        if self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        Text::from(self.lines)
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        let text = markdown_to_text("first\n\nsecond");
        assert_eq!(plain(&text), vec!["first", "", "second"]);
    }

    #[test]
    fn test_heading_is_styled() {
        let text = markdown_to_text("# Title");
        assert_eq!(plain(&text), vec!["Title"]);
        assert_eq!(text.lines[0].spans[0].style, heading_style(1));
    }

    #[test]
    fn test_strong_and_emphasis_modifiers() {
        let text = markdown_to_text("a **b** *c*");
        let spans = &text.lines[0].spans;
        let bold = spans.iter().find(|s| s.content == "b").unwrap();
        let italic = spans.iter().find(|s| s.content == "c").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
        assert!(italic.style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_bullet_and_ordered_lists() {
        let text = markdown_to_text("- one\n- two\n\n1. first\n1. second");
        assert_eq!(
            plain(&text),
            vec!["• one", "• two", "", "1. first", "2. second"]
        );
    }

    #[test]
    fn test_nested_list_indents() {
        let text = markdown_to_text("- outer\n  - inner");
        assert_eq!(plain(&text), vec!["• outer", "  • inner"]);
    }

    #[test]
    fn test_code_block_keeps_lines() {
        let text = markdown_to_text("```\nlet a = 1;\nlet b = 2;\n```");
        assert_eq!(plain(&text), vec!["│ let a = 1;", "│ let b = 2;"]);
    }

    #[test]
    fn test_link_shows_target() {
        let text = markdown_to_text("[docs](https://example.com)");
        assert_eq!(plain(&text), vec!["docs <https://example.com>"]);
    }

    #[test]
    fn test_autolink_not_duplicated() {
        let text = markdown_to_text("<https://example.com>");
        assert_eq!(plain(&text), vec!["https://example.com"]);
    }

    #[test]
    fn test_block_quote_prefix() {
        let text = markdown_to_text("> quoted");
        assert_eq!(plain(&text), vec!["│ quoted"]);
    }

    #[test]
    fn test_empty_input_yields_one_line() {
        assert_eq!(markdown_to_text("").lines.len(), 1);
    }
}
