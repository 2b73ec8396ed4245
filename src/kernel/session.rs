//! Edit session: one document's text plus the mode-derived state that tracks it.

use std::fmt;
use std::sync::Arc;

use ropey::Rope;

use crate::kernel::editor::comment::line_text;
use crate::kernel::editor::folding::{FoldRange, FoldState};
use crate::kernel::editor::indent::LineState;
use crate::kernel::editor::syntax::{HighlightSpan, LiteralKind, SyntaxDocument};
use crate::kernel::mode::LanguageMode;
use crate::kernel::services::ports::EditorConfig;

pub struct EditSession {
    rope: Rope,
    mode: Arc<dyn LanguageMode>,
    syntax: Option<SyntaxDocument>,
    version: u64,
    folds: FoldState,
    /// Document version `folds` was computed for.
    folds_version: u64,
    tab: String,
}

impl EditSession {
    pub fn new(text: &str, mode: Arc<dyn LanguageMode>, config: &EditorConfig) -> Self {
        let rope = Rope::from_str(text);
        let syntax = SyntaxDocument::new(mode.highlight_rules(), &rope);
        if syntax.is_none() {
            tracing::warn!(mode = mode.id(), "no syntax tree; highlighting disabled");
        }

        let mut session = Self {
            rope,
            mode,
            syntax,
            version: 0,
            folds: FoldState::default(),
            folds_version: 0,
            tab: config.tab_string(),
        };
        session.refresh_folds();
        session
    }

    pub fn mode(&self) -> &Arc<dyn LanguageMode> {
        &self.mode
    }

    pub fn mode_id(&self) -> &'static str {
        self.mode.id()
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Bumped on every text change.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn tab(&self) -> &str {
        &self.tab
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line text without its terminator; empty past the end of the document.
    pub fn line(&self, row: usize) -> String {
        if row >= self.rope.len_lines() {
            return String::new();
        }
        line_text(&self.rope, row)
    }

    pub fn line_to_char(&self, row: usize) -> usize {
        self.rope.line_to_char(row.min(self.rope.len_lines()))
    }

    fn position(&self, char_idx: usize) -> (usize, usize) {
        let row = self.rope.char_to_line(char_idx);
        (row, char_idx - self.rope.line_to_char(row))
    }

    pub fn highlight_lines(&self, start_row: usize, end_row: usize) -> Vec<Vec<HighlightSpan>> {
        match &self.syntax {
            Some(syntax) => syntax.highlight_lines(&self.rope, start_row, end_row),
            None => {
                let end_row = end_row.min(self.rope.len_lines());
                vec![Vec::new(); end_row.saturating_sub(start_row)]
            }
        }
    }

    /// `column` is clamped to the end of `row`.
    pub fn is_in_string_or_comment(&self, row: usize, column: usize) -> bool {
        if row >= self.rope.len_lines() {
            return false;
        }
        let column = column.min(self.line(row).chars().count());
        let char_idx = self.line_to_char(row) + column;
        if char_idx >= self.rope.len_chars() {
            return false;
        }
        self.is_char_in_string_or_comment(char_idx)
    }

    fn is_char_in_string_or_comment(&self, char_idx: usize) -> bool {
        self.syntax.as_ref().is_some_and(|syntax| {
            syntax.is_in_string_or_comment(self.rope.char_to_byte(char_idx))
        })
    }

    /// Whether the chars at `byte` open a block comment (`/*`).
    fn opens_block_comment_at(&self, byte: usize) -> bool {
        let start = self.rope.byte_to_char(byte.min(self.rope.len_bytes()));
        let end = (start + 2).min(self.rope.len_chars());
        self.rope.slice(start..end) == "/*"
    }

    /// Lexical context at the end of `row`: inside a block comment, a doc comment or code.
    ///
    /// Scans upward for the nearest `/*` or `*/` that is not part of a string or a
    /// line comment.
    pub fn line_end_state(&self, row: usize) -> LineState {
        if row >= self.rope.len_lines() {
            return LineState::Code;
        }

        for r in (0..=row).rev() {
            let line = self.line(r);
            let line_start = self.rope.line_to_byte(r);
            let mut markers: Vec<(usize, bool)> = line
                .match_indices("/*")
                .map(|(offset, _)| (offset, true))
                .chain(line.match_indices("*/").map(|(offset, _)| (offset, false)))
                .collect();
            markers.sort_unstable_by(|a, b| b.0.cmp(&a.0));

            for (offset, opens) in markers {
                let byte = line_start + offset;
                let literal = self
                    .syntax
                    .as_ref()
                    .and_then(|syntax| syntax.literal_at(byte));

                if opens {
                    let counts = match literal {
                        Some(literal) => {
                            literal.kind == LiteralKind::Comment && literal.start_byte == byte
                        }
                        None => true,
                    };
                    if !counts {
                        continue;
                    }
                    let rest = &line[offset..];
                    return if rest.starts_with("/**") && !rest.starts_with("/**/") {
                        LineState::DocComment
                    } else {
                        LineState::BlockComment
                    };
                }

                // The `*` of `/*/` belongs to the opener.
                if line[..=offset].ends_with("/*") {
                    continue;
                }
                let counts = match literal {
                    Some(literal) => {
                        literal.kind == LiteralKind::Comment
                            && literal.start_byte != byte
                            && self.opens_block_comment_at(literal.start_byte)
                    }
                    None => true,
                };
                if counts {
                    return LineState::Code;
                }
            }
        }
        LineState::Code
    }

    /// Position of the bracket closing `open`, scanning forward from `(row, column)`.
    ///
    /// Brackets inside strings and comments are ignored.
    pub fn find_closing_bracket(
        &self,
        open: char,
        row: usize,
        column: usize,
    ) -> Option<(usize, usize)> {
        let close = matching_bracket(open)?;
        let start = (self.line_to_char(row) + column).min(self.rope.len_chars());
        let mut depth = 1usize;

        for (offset, ch) in self.rope.chars_at(start).enumerate() {
            if ch != open && ch != close {
                continue;
            }
            let idx = start + offset;
            if self.is_char_in_string_or_comment(idx) {
                continue;
            }
            if ch == open {
                depth += 1;
            } else {
                depth -= 1;
                if depth == 0 {
                    return Some(self.position(idx));
                }
            }
        }
        None
    }

    /// Position of the bracket opening `close`, scanning backward from the char before
    /// `(row, column)`.
    pub fn find_opening_bracket(
        &self,
        close: char,
        row: usize,
        column: usize,
    ) -> Option<(usize, usize)> {
        let open = matching_bracket(close)?;
        let mut idx = (self.line_to_char(row) + column).min(self.rope.len_chars());
        let mut chars = self.rope.chars_at(idx);
        let mut depth = 1usize;

        while let Some(ch) = chars.prev() {
            idx -= 1;
            if ch != open && ch != close {
                continue;
            }
            if self.is_char_in_string_or_comment(idx) {
                continue;
            }
            if ch == close {
                depth += 1;
            } else {
                depth -= 1;
                if depth == 0 {
                    return Some(self.position(idx));
                }
            }
        }
        None
    }

    /// Replace chars `start..end` with `text`.
    pub fn replace(&mut self, start: usize, end: usize, text: &str) {
        let len = self.rope.len_chars();
        let start = start.min(len);
        let end = end.clamp(start, len);
        let old_text = self.rope.slice(start..end).to_string();

        self.rope.remove(start..end);
        self.rope.insert(start, text);
        if let Some(syntax) = self.syntax.as_mut() {
            syntax.apply_edit(&self.rope, start, &old_text, text);
        }
        self.changed();
    }

    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        if let Some(syntax) = self.syntax.as_mut() {
            syntax.reparse(&self.rope);
        }
        self.changed();
    }

    fn changed(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Whether `folds` still reflects the current text.
    pub fn folds_are_current(&self) -> bool {
        self.folds_version == self.version
    }

    /// Document version the fold ranges were last computed for.
    pub fn folds_version(&self) -> u64 {
        self.folds_version
    }

    /// Recompute fold ranges now, keeping collapsed rows that still start a fold.
    pub fn refresh_folds(&mut self) -> &[FoldRange] {
        let ranges = self.mode.folding_rules().fold_ranges(self);
        self.folds.set_ranges(ranges);
        self.folds_version = self.version;
        self.folds.ranges()
    }

    fn ensure_folds(&mut self) {
        if !self.folds_are_current() {
            self.refresh_folds();
        }
    }

    /// Fold state for the current text; ranges are recomputed when edits made them stale.
    pub fn folds(&mut self) -> &FoldState {
        self.ensure_folds();
        &self.folds
    }

    pub fn fold_ranges(&mut self) -> &[FoldRange] {
        self.ensure_folds();
        self.folds.ranges()
    }

    /// Toggle the innermost fold that starts at or encloses `row`.
    pub fn toggle_fold(&mut self, row: usize) -> bool {
        self.ensure_folds();
        let Some(start) = self.folds.target_start_row_for(row) else {
            return false;
        };
        self.folds.toggle(start)
    }

    pub fn toggle_comment(&mut self, start_row: usize, end_row: usize) -> bool {
        let mode = Arc::clone(&self.mode);
        if !mode.toggle_comment_lines(&mut self.rope, start_row, end_row) {
            return false;
        }
        if let Some(syntax) = self.syntax.as_mut() {
            syntax.reparse(&self.rope);
        }
        self.changed();
        true
    }

    pub fn next_line_indent(&self, row: usize) -> String {
        let state = self.line_end_state(row);
        self.mode.next_line_indent(state, &self.line(row), &self.tab)
    }

    pub fn auto_outdent(&mut self, row: usize) -> bool {
        let mode = Arc::clone(&self.mode);
        mode.auto_outdent(self, row)
    }
}

impl fmt::Debug for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("mode", &self.mode.id())
            .field("version", &self.version)
            .field("folds_version", &self.folds_version)
            .field("lines", &self.rope.len_lines())
            .field("has_syntax", &self.syntax.is_some())
            .finish()
    }
}

fn matching_bracket(ch: char) -> Option<char> {
    match ch {
        '{' => Some('}'),
        '}' => Some('{'),
        '[' => Some(']'),
        ']' => Some('['),
        '(' => Some(')'),
        ')' => Some('('),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/session.rs"]
mod tests;
