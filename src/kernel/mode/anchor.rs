use ropey::Rope;

use super::{JavaScriptMode, LanguageMode, SyntaxWorker};
use crate::kernel::editor::comment::CommentTokens;
use crate::kernel::editor::folding::{FoldingStrategy, JavaFoldMode};
use crate::kernel::editor::indent::LineState;
use crate::kernel::editor::syntax::{HighlightRules, ANCHOR_HIGHLIGHT_RULES};
use crate::kernel::session::EditSession;

pub const ANCHOR_MODE_ID: &str = "ace/mode/anchor";
pub const ANCHOR_SNIPPETS_ID: &str = "ace/snippets/anchor";

/// JavaScript editing behavior with Anchor highlighting, Java-style folding and no
/// background syntax checking.
#[derive(Debug)]
pub struct AnchorMode {
    base: JavaScriptMode,
    highlight_rules: &'static HighlightRules,
    folding_rules: JavaFoldMode,
}

impl AnchorMode {
    pub fn new() -> Self {
        Self {
            base: JavaScriptMode::new(),
            highlight_rules: &ANCHOR_HIGHLIGHT_RULES,
            folding_rules: JavaFoldMode::new(),
        }
    }

    pub fn base(&self) -> &JavaScriptMode {
        &self.base
    }
}

impl Default for AnchorMode {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageMode for AnchorMode {
    fn id(&self) -> &'static str {
        ANCHOR_MODE_ID
    }

    fn snippet_file_id(&self) -> Option<&'static str> {
        Some(ANCHOR_SNIPPETS_ID)
    }

    fn highlight_rules(&self) -> &'static HighlightRules {
        self.highlight_rules
    }

    fn folding_rules(&self) -> &dyn FoldingStrategy {
        &self.folding_rules
    }

    fn comment_tokens(&self) -> CommentTokens {
        self.base.comment_tokens()
    }

    fn toggle_comment_lines(&self, rope: &mut Rope, start_row: usize, end_row: usize) -> bool {
        self.base.toggle_comment_lines(rope, start_row, end_row)
    }

    fn next_line_indent(&self, state: LineState, line: &str, tab: &str) -> String {
        self.base.next_line_indent(state, line, tab)
    }

    fn check_outdent(&self, line: &str, input: &str) -> bool {
        self.base.check_outdent(line, input)
    }

    fn auto_outdent(&self, session: &mut EditSession, row: usize) -> bool {
        self.base.auto_outdent(session, row)
    }

    /// Anchor sources get no live diagnostics.
    fn create_worker(&self, _session: Option<&EditSession>) -> Option<SyntaxWorker> {
        None
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/mode/anchor.rs"]
mod tests;
