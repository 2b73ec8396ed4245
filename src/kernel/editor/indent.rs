//! Indentation rules for C-like modes.

use std::sync::OnceLock;

use regex::Regex;

use crate::kernel::session::EditSession;

struct Patterns {
    opens_block: Regex,
    trailing_comment: Regex,
    doc_comment_line: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        opens_block: Regex::new(r"^.*(?:\bcase\b.*:|[\{\(\[])\s*$").expect("block pattern"),
        trailing_comment: Regex::new(r#"//[^"'`]*$"#).expect("comment pattern"),
        doc_comment_line: Regex::new(r"^\s*(/?)\*").expect("doc comment pattern"),
    })
}

pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .char_indices()
        .find(|(_, c)| !matches!(c, ' ' | '\t'))
        .map_or(line.len(), |(i, _)| i);
    &line[..end]
}

/// Lexical context at the end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    #[default]
    Code,
    /// Inside an unterminated `/* ... */` comment.
    BlockComment,
    /// Inside an unterminated `/** ... */` doc comment.
    DocComment,
}

/// Indentation for the line that follows `line` when the user presses enter.
///
/// `state` is the context at the end of `line`; only an open doc comment
/// continues the ` * ` gutter.
pub fn next_line_indent(state: LineState, line: &str, tab: &str) -> String {
    let mut indent = leading_whitespace(line).to_string();
    let p = patterns();

    match state {
        LineState::DocComment => {
            if let Some(caps) = p.doc_comment_line.captures(line) {
                if caps.get(1).is_some_and(|slash| !slash.as_str().is_empty()) {
                    indent.push(' ');
                }
                indent.push_str("* ");
            }
            indent
        }
        LineState::BlockComment => indent,
        LineState::Code => {
            if !p.trailing_comment.is_match(line) && p.opens_block.is_match(line) {
                indent.push_str(tab);
            }
            indent
        }
    }
}

/// Whether typing `input` on the whitespace-only `line` should trigger [`auto_outdent`].
pub fn check_outdent(line: &str, input: &str) -> bool {
    if line.is_empty() || !line.chars().all(char::is_whitespace) {
        return false;
    }
    input.trim_start().starts_with('}')
}

/// Re-indent a row that starts with `}` to match the line holding its `{`.
///
/// Returns whether the session text changed.
pub fn auto_outdent(session: &mut EditSession, row: usize) -> bool {
    let line = session.line(row);
    let current = leading_whitespace(&line);
    if !line[current.len()..].starts_with('}') {
        return false;
    }

    let brace_column = current.chars().count();
    let Some((open_row, _)) = session.find_opening_bracket('}', row, brace_column) else {
        return false;
    };
    if open_row == row {
        return false;
    }

    let target = leading_whitespace(&session.line(open_row)).to_string();
    if target == current {
        return false;
    }
    let line_start = session.line_to_char(row);
    session.replace(line_start, line_start + brace_column, &target);
    true
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/indent.rs"]
mod tests;
