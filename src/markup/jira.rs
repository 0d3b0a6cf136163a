//! Jira wiki markup to Markdown conversion.
//!
//! Covers the subset of wiki markup that shows up in issue descriptions and
//! comments: headings, emphasis, monospace, links, lists, quotes and
//! code/noformat blocks. Anything unrecognized passes through unchanged.

use super::RenderError;

/// A multi-line block that is open while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Code,
    NoFormat,
    Quote,
}

impl Block {
    fn tag(self) -> &'static str {
        match self {
            Block::Code => "code",
            Block::NoFormat => "noformat",
            Block::Quote => "quote",
        }
    }

    fn closing(self) -> &'static str {
        match self {
            Block::Code => "{code}",
            Block::NoFormat => "{noformat}",
            Block::Quote => "{quote}",
        }
    }
}

/// Convert Jira wiki markup into CommonMark.
///
/// # Errors
///
/// Returns [`RenderError::UnterminatedBlock`] if a `{code}`, `{noformat}` or
/// `{quote}` block is never closed.
pub fn jira_to_markdown(source: &str) -> Result<String, RenderError> {
    let mut out: Vec<String> = Vec::new();
    let mut open: Option<(Block, usize)> = None;

    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim_end_matches('\r');

        match open {
            Some((block @ (Block::Code | Block::NoFormat), _)) => {
                if let Some(pos) = line.find(block.closing()) {
                    let before = &line[..pos];
                    if !before.is_empty() {
                        out.push(before.to_string());
                    }
                    out.push("```".to_string());
                    open = None;
                    let rest = &line[pos + block.closing().len()..];
                    if !rest.trim().is_empty() {
                        out.push(convert_line(rest));
                    }
                } else {
                    out.push(line.to_string());
                }
                continue;
            }
            Some((Block::Quote, _)) => {
                if let Some(pos) = line.find(Block::Quote.closing()) {
                    let before = &line[..pos];
                    if !before.trim().is_empty() {
                        out.push(format!("> {}", convert_line(before)));
                    }
                    open = None;
                    out.push(String::new());
                    let rest = &line[pos + Block::Quote.closing().len()..];
                    if !rest.trim().is_empty() {
                        out.push(convert_line(rest));
                    }
                } else {
                    out.push(format!("> {}", convert_line(line)));
                }
                continue;
            }
            None => {}
        }

        let trimmed = line.trim_start();
        if let Some((block, lang, rest)) = parse_block_open(trimmed) {
            match block {
                Block::Code | Block::NoFormat => {
                    out.push(format!("```{}", lang));
                    if let Some(pos) = rest.find(block.closing()) {
                        // Single-line block.
                        if !rest[..pos].is_empty() {
                            out.push(rest[..pos].to_string());
                        }
                        out.push("```".to_string());
                    } else {
                        if !rest.is_empty() {
                            out.push(rest.to_string());
                        }
                        open = Some((block, index + 1));
                    }
                }
                Block::Quote => {
                    if let Some(pos) = rest.find(block.closing()) {
                        out.push(format!("> {}", convert_line(&rest[..pos])));
                        out.push(String::new());
                    } else {
                        if !rest.trim().is_empty() {
                            out.push(format!("> {}", convert_line(rest)));
                        }
                        open = Some((block, index + 1));
                    }
                }
            }
            continue;
        }

        out.push(convert_line(line));
    }

    if let Some((block, line)) = open {
        return Err(RenderError::UnterminatedBlock {
            tag: block.tag(),
            line,
        });
    }

    Ok(out.join("\n"))
}

/// Recognize `{code}`, `{code:lang}`, `{code:title=x|lang}`, `{noformat}` and
/// `{quote}` at the start of a line.
///
/// Returns the block, the fence language and the text after the tag.
fn parse_block_open(line: &str) -> Option<(Block, String, &str)> {
    let (block, after) = if let Some(after) = line.strip_prefix("{code") {
        (Block::Code, after)
    } else if let Some(after) = line.strip_prefix("{noformat") {
        (Block::NoFormat, after)
    } else if let Some(after) = line.strip_prefix("{quote") {
        (Block::Quote, after)
    } else {
        return None;
    };

    let close = after.find('}')?;
    let params = &after[..close];
    if !params.is_empty() && !params.starts_with(':') {
        return None;
    }
    let lang = if block == Block::Code {
        params
            .trim_start_matches(':')
            .split('|')
            .find(|p| !p.is_empty() && !p.contains('='))
            .unwrap_or_default()
            .to_string()
    } else {
        String::new()
    };

    Some((block, lang, &after[close + 1..]))
}

/// Convert one line outside of any block.
fn convert_line(line: &str) -> String {
    let trimmed = line.trim_start();

    if trimmed.len() >= 4 && trimmed.chars().all(|c| c == '-') {
        return "---".to_string();
    }

    if let Some(rest) = heading_body(trimmed) {
        return format!("{} {}", "#".repeat(rest.0), convert_inline(rest.1.trim()));
    }

    if let Some(rest) = trimmed.strip_prefix("bq. ") {
        return format!("> {}", convert_inline(rest));
    }

    if let Some((depth, ordered, rest)) = list_item(trimmed) {
        let (indent, marker) = if ordered {
            ("   ".repeat(depth - 1), "1.")
        } else {
            ("  ".repeat(depth - 1), "-")
        };
        return format!("{}{} {}", indent, marker, convert_inline(rest));
    }

    convert_inline(line)
}

/// `h1. Title` through `h6. Title`.
fn heading_body(line: &str) -> Option<(usize, &str)> {
    let bytes = line.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'h' && bytes[2] == b'.' {
        let level = (bytes[1] as char).to_digit(10)? as usize;
        if (1..=6).contains(&level) {
            return Some((level, &line[3..]));
        }
    }
    None
}

/// `* item`, `** nested`, `# numbered`, `- dash`.
fn list_item(line: &str) -> Option<(usize, bool, &str)> {
    let marker_len = line
        .chars()
        .take_while(|c| matches!(c, '*' | '#' | '-'))
        .count();
    if marker_len == 0 {
        return None;
    }
    let rest = &line[marker_len..];
    if !rest.starts_with(' ') {
        return None;
    }
    let ordered = line[..marker_len].ends_with('#');
    Some((marker_len, ordered, rest.trim_start()))
}

/// Convert inline markup: emphasis, monospace, links, mentions, colors.
fn convert_inline(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '{' && starts_with(&chars, i, "{{") {
            if let Some(end) = find_seq(&chars, i + 2, "}}") {
                let inner: String = chars[i + 2..end].iter().collect();
                out.push('`');
                out.push_str(&inner);
                out.push('`');
                i = end + 2;
                continue;
            }
        }

        if c == '{' && (starts_with(&chars, i, "{color") || starts_with(&chars, i, "{panel")) {
            if let Some(end) = chars[i..].iter().position(|&ch| ch == '}') {
                i += end + 1;
                continue;
            }
        }

        if c == '[' {
            if let Some(end) = chars[i + 1..].iter().position(|&ch| ch == ']') {
                let inner: String = chars[i + 1..i + 1 + end].iter().collect();
                if let Some(link) = convert_link(&inner) {
                    out.push_str(&link);
                    i += end + 2;
                    continue;
                }
            }
        }

        if let Some(replacement) = emphasis_marker(c) {
            if let Some(end) = find_emphasis_close(&chars, i) {
                let inner: String = chars[i + 1..end].iter().collect();
                out.push_str(replacement);
                out.push_str(&convert_inline(&inner));
                out.push_str(replacement);
                i = end + 1;
                continue;
            }
        }

        out.push(c);
        i += 1;
    }

    out
}

fn emphasis_marker(c: char) -> Option<&'static str> {
    match c {
        '*' => Some("**"),
        '_' => Some("*"),
        '-' => Some("~~"),
        _ => None,
    }
}

/// Find the closing delimiter for an emphasis run opened at `start`.
///
/// The opener must not follow an alphanumeric character and must be
/// followed by a non-space; the closer mirrors that.
fn find_emphasis_close(chars: &[char], start: usize) -> Option<usize> {
    let delim = chars[start];
    if start > 0 && chars[start - 1].is_alphanumeric() {
        return None;
    }
    let first = *chars.get(start + 1)?;
    if first.is_whitespace() || first == delim {
        return None;
    }

    (start + 2..chars.len()).find(|&j| {
        chars[j] == delim
            && !chars[j - 1].is_whitespace()
            && chars.get(j + 1).map_or(true, |next| !next.is_alphanumeric())
    })
}

/// `[text|url]`, `[url]`, `[~user]`.
fn convert_link(inner: &str) -> Option<String> {
    if let Some(user) = inner.strip_prefix('~') {
        return Some(format!("@{}", user.trim_start_matches("accountid:")));
    }
    if let Some((label, url)) = inner.split_once('|') {
        return Some(format!("[{}]({})", label, url.trim()));
    }
    if inner.contains("://") || inner.starts_with("mailto:") {
        return Some(format!("<{}>", inner.trim()));
    }
    None
}

fn starts_with(chars: &[char], at: usize, pattern: &str) -> bool {
    let mut idx = at;
    for p in pattern.chars() {
        if chars.get(idx) != Some(&p) {
            return false;
        }
        idx += 1;
    }
    true
}

fn find_seq(chars: &[char], from: usize, pattern: &str) -> Option<usize> {
    (from..chars.len()).find(|&i| starts_with(chars, i, pattern))
}
