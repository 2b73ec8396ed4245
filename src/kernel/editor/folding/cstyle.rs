use std::sync::OnceLock;

use regex::Regex;

use super::{byte_to_column, FoldRange, FoldStyle, FoldWidget, FoldingStrategy};
use crate::kernel::session::EditSession;

struct Patterns {
    start: Regex,
    stop: Regex,
    single_line_block_comment: Regex,
    triple_star_block_comment: Regex,
    start_region: Regex,
    region_marker: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        start: Regex::new(r"([\{\[\(])[^\}\]\)]*$|^\s*(/\*)").expect("fold start pattern"),
        stop: Regex::new(r"^[^\[\{\(]*([\}\]\)])|^[\s\*]*(\*/)").expect("fold stop pattern"),
        single_line_block_comment: Regex::new(r"^\s*(/\*).*\*/\s*$")
            .expect("single line comment pattern"),
        triple_star_block_comment: Regex::new(r"^\s*(/\*\*\*).*\*/\s*$")
            .expect("triple star comment pattern"),
        start_region: Regex::new(r"^\s*(/\*|//)#?region\b").expect("region pattern"),
        region_marker: Regex::new(r"^\s*(?:/\*|//|--)#?(end)?region\b")
            .expect("region marker pattern"),
    })
}

/// Brace, bracket and block-comment folding for C-like syntaxes, plus `//#region` blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CStyleFoldMode;

impl CStyleFoldMode {
    pub fn new() -> Self {
        Self
    }

    fn region_block(&self, session: &EditSession, line: &str, row: usize) -> Option<FoldRange> {
        let start_column = line.trim_end().chars().count();
        let max_row = session.len_lines();
        let mut depth = 1usize;
        let mut end_row = row;
        let mut end_line = String::new();

        for next in row + 1..max_row {
            let text = session.line(next);
            let Some(caps) = patterns().region_marker.captures(&text) else {
                continue;
            };
            if caps.get(1).is_some() {
                depth -= 1;
            } else {
                depth += 1;
            }
            if depth == 0 {
                end_row = next;
                end_line = text;
                break;
            }
        }

        // An unterminated region reaches the end of the document.
        if depth > 0 {
            end_row = max_row.saturating_sub(1);
            end_line = session.line(end_row);
        }

        (end_row > row).then(|| {
            FoldRange::new(row, start_column, end_row, end_line.chars().count())
        })
    }

    fn opening_bracket_block(
        &self,
        session: &EditSession,
        bracket: char,
        row: usize,
        column: usize,
    ) -> Option<FoldRange> {
        let start_column = column + 1;
        let (mut end_row, mut end_column) =
            session.find_closing_bracket(bracket, row, start_column)?;

        // The closing line may reopen a fold under the session's own rules.
        if end_row > row
            && session
                .mode()
                .folding_rules()
                .fold_widget(session, FoldStyle::MarkBegin, end_row)
                == Some(FoldWidget::Start)
        {
            end_row -= 1;
            end_column = session.line(end_row).chars().count();
        }
        Some(FoldRange::new(row, start_column, end_row, end_column))
    }

    fn closing_bracket_block(
        &self,
        session: &EditSession,
        bracket: char,
        row: usize,
        column: usize,
    ) -> Option<FoldRange> {
        let (start_row, start_column) = session.find_opening_bracket(bracket, row, column)?;
        Some(FoldRange::new(start_row, start_column + 1, row, column))
    }

    /// Block comment starting right before `(row, column)`, folded between its delimiters.
    fn comment_block_forward(
        &self,
        session: &EditSession,
        row: usize,
        column: usize,
    ) -> Option<FoldRange> {
        for next in row..session.len_lines() {
            let text = session.line(next);
            let from = if next == row {
                text.char_indices().nth(column).map_or(text.len(), |(i, _)| i)
            } else {
                0
            };
            if let Some(pos) = text[from..].find("*/") {
                let end_column = byte_to_column(&text, from + pos);
                let range = FoldRange::new(row, column, next, end_column);
                return range.is_multi_line().then_some(range);
            }
        }
        None
    }

    /// Block comment ending right before `(row, column)`.
    fn comment_block_backward(
        &self,
        session: &EditSession,
        row: usize,
        column: usize,
    ) -> Option<FoldRange> {
        let end_column = column.saturating_sub(2);
        for prev in (0..=row).rev() {
            let text = session.line(prev);
            let until = if prev == row {
                text.char_indices()
                    .nth(end_column)
                    .map_or(text.len(), |(i, _)| i)
            } else {
                text.len()
            };
            if let Some(pos) = text[..until].rfind("/*") {
                let start_column = byte_to_column(&text, pos) + 2;
                let range = FoldRange::new(prev, start_column, row, end_column);
                return range.is_multi_line().then_some(range);
            }
        }
        None
    }
}

impl FoldingStrategy for CStyleFoldMode {
    fn fold_widget(
        &self,
        session: &EditSession,
        style: FoldStyle,
        row: usize,
    ) -> Option<FoldWidget> {
        let line = session.line(row);
        let p = patterns();

        if p.single_line_block_comment.is_match(&line)
            && !p.start_region.is_match(&line)
            && !p.triple_star_block_comment.is_match(&line)
        {
            return None;
        }

        if p.start.is_match(&line) {
            return Some(FoldWidget::Start);
        }
        if style == FoldStyle::MarkBeginEnd && p.stop.is_match(&line) {
            return Some(FoldWidget::End);
        }
        p.start_region
            .is_match(&line)
            .then_some(FoldWidget::Start)
    }

    fn fold_widget_range(
        &self,
        session: &EditSession,
        style: FoldStyle,
        row: usize,
    ) -> Option<FoldRange> {
        let line = session.line(row);
        let p = patterns();

        if p.start_region.is_match(&line) {
            return self.region_block(session, &line, row);
        }

        if let Some(caps) = p.start.captures(&line) {
            let whole = caps.get(0)?;
            if let Some(bracket) = caps.get(1) {
                let ch = bracket.as_str().chars().next()?;
                let column = byte_to_column(&line, bracket.start());
                return self.opening_bracket_block(session, ch, row, column);
            }
            let column = byte_to_column(&line, whole.end());
            return self.comment_block_forward(session, row, column);
        }

        if style == FoldStyle::MarkBegin {
            return None;
        }

        let caps = p.stop.captures(&line)?;
        let whole = caps.get(0)?;
        let column = byte_to_column(&line, whole.end());
        if let Some(bracket) = caps.get(1) {
            let ch = bracket.as_str().chars().next()?;
            let close_column = byte_to_column(&line, bracket.start());
            return self.closing_bracket_block(session, ch, row, close_column);
        }
        self.comment_block_backward(session, row, column)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/editor/folding/cstyle.rs"]
mod tests;
