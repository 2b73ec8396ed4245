//! Line comment toggling.

use ropey::Rope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentTokens {
    pub line: Option<&'static str>,
    pub block: Option<(&'static str, &'static str)>,
}

impl CommentTokens {
    pub const C_STYLE: Self = Self {
        line: Some("//"),
        block: Some(("/*", "*/")),
    };
}

pub(crate) fn line_text(rope: &Rope, row: usize) -> String {
    let mut text = rope.line(row).to_string();
    while text.ends_with('\n') || text.ends_with('\r') {
        text.pop();
    }
    text
}

fn indent_columns(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Comment or uncomment rows `start_row..=end_row`.
///
/// When every non-blank row is already commented the comments are removed, otherwise
/// every non-blank row is commented at the smallest indentation of the range. Returns
/// whether the text changed.
pub fn toggle_line_comments(
    rope: &mut Rope,
    start_row: usize,
    end_row: usize,
    tokens: CommentTokens,
) -> bool {
    let total = rope.len_lines();
    if total == 0 || start_row >= total {
        return false;
    }
    let end_row = end_row.min(total - 1).max(start_row);
    let rows: Vec<(usize, String)> = (start_row..=end_row)
        .map(|row| (row, line_text(rope, row)))
        .filter(|(_, text)| !text.trim().is_empty())
        .collect();
    if rows.is_empty() {
        return false;
    }

    match (tokens.line, tokens.block) {
        (Some(token), _) => toggle_with_line_token(rope, &rows, token),
        (None, Some((open, close))) => toggle_with_block_tokens(rope, &rows, open, close),
        (None, None) => false,
    }
}

fn toggle_with_line_token(rope: &mut Rope, rows: &[(usize, String)], token: &str) -> bool {
    let all_commented = rows
        .iter()
        .all(|(_, text)| text.trim_start().starts_with(token));

    // Later rows first so earlier char offsets stay valid.
    if all_commented {
        for (row, text) in rows.iter().rev() {
            let indent = indent_columns(text);
            let rest: String = text.chars().skip(indent + token.chars().count()).collect();
            let mut remove = token.chars().count();
            if rest.starts_with(' ') {
                remove += 1;
            }
            let at = rope.line_to_char(*row) + indent;
            rope.remove(at..at + remove);
        }
    } else {
        let column = rows
            .iter()
            .map(|(_, text)| indent_columns(text))
            .min()
            .unwrap_or(0);
        let insert = format!("{token} ");
        for (row, _) in rows.iter().rev() {
            let at = rope.line_to_char(*row) + column;
            rope.insert(at, &insert);
        }
    }
    true
}

fn toggle_with_block_tokens(
    rope: &mut Rope,
    rows: &[(usize, String)],
    open: &str,
    close: &str,
) -> bool {
    let all_commented = rows.iter().all(|(_, text)| {
        let trimmed = text.trim();
        trimmed.len() >= open.len() + close.len()
            && trimmed.starts_with(open)
            && trimmed.ends_with(close)
    });

    for (row, text) in rows.iter().rev() {
        let indent = indent_columns(text);
        let body: String = text.chars().skip(indent).collect();
        let body = body.trim_end();
        let replaced = if all_commented {
            let inner = &body[open.len()..body.len() - close.len()];
            inner.trim().to_string()
        } else {
            format!("{open} {body} {close}")
        };
        let start = rope.line_to_char(*row) + indent;
        let end = start + body.chars().count();
        rope.remove(start..end);
        rope.insert(start, &replaced);
    }
    true
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/comment.rs"]
mod tests;
