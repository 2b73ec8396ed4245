use std::sync::OnceLock;

use regex::Regex;

use super::{CStyleFoldMode, FoldRange, FoldStyle, FoldWidget, FoldingStrategy};
use crate::kernel::session::EditSession;

fn import_regex() -> &'static Regex {
    static IMPORT: OnceLock<Regex> = OnceLock::new();
    // `use ` covers Rust-syntax sources (Anchor programs) with the same rule.
    IMPORT.get_or_init(|| Regex::new(r"^(?:import|use) ").expect("import pattern"))
}

/// C-style folding plus runs of import declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaFoldMode {
    cstyle: CStyleFoldMode,
}

impl JavaFoldMode {
    pub fn new() -> Self {
        Self {
            cstyle: CStyleFoldMode::new(),
        }
    }

    fn import_block(&self, session: &EditSession, row: usize, start_column: usize) -> Option<FoldRange> {
        let mut end_row = row;
        for next in row + 1..session.len_lines() {
            let line = session.line(next);
            if line.trim().is_empty() {
                continue;
            }
            if !import_regex().is_match(&line) {
                break;
            }
            end_row = next;
        }

        (end_row > row).then(|| {
            let end_column = session.line(end_row).chars().count();
            FoldRange::new(row, start_column, end_row, end_column)
        })
    }
}

impl FoldingStrategy for JavaFoldMode {
    fn fold_widget(
        &self,
        session: &EditSession,
        style: FoldStyle,
        row: usize,
    ) -> Option<FoldWidget> {
        if style == FoldStyle::MarkBegin {
            let line = session.line(row);
            if import_regex().is_match(&line)
                && (row == 0 || !import_regex().is_match(&session.line(row - 1)))
            {
                return Some(FoldWidget::Start);
            }
        }
        self.cstyle.fold_widget(session, style, row)
    }

    fn fold_widget_range(
        &self,
        session: &EditSession,
        style: FoldStyle,
        row: usize,
    ) -> Option<FoldRange> {
        let line = session.line(row);
        match import_regex().find(&line) {
            Some(found) if style == FoldStyle::MarkBegin => {
                let start_column = line[..found.end()].chars().count();
                self.import_block(session, row, start_column)
                    .or_else(|| self.cstyle.fold_widget_range(session, style, row))
            }
            _ => self.cstyle.fold_widget_range(session, style, row),
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/editor/folding/java.rs"]
mod tests;
