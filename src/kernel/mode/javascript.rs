use ropey::Rope;

use super::{LanguageMode, SyntaxWorker};
use crate::kernel::editor::comment::{self, CommentTokens};
use crate::kernel::editor::folding::{CStyleFoldMode, FoldingStrategy};
use crate::kernel::editor::indent::{self, LineState};
use crate::kernel::editor::syntax::{HighlightRules, JAVASCRIPT_HIGHLIGHT_RULES};
use crate::kernel::session::EditSession;

pub const JAVASCRIPT_MODE_ID: &str = "ace/mode/javascript";
pub const JAVASCRIPT_SNIPPETS_ID: &str = "ace/snippets/javascript";

#[derive(Debug)]
pub struct JavaScriptMode {
    highlight_rules: &'static HighlightRules,
    folding_rules: CStyleFoldMode,
}

impl JavaScriptMode {
    pub fn new() -> Self {
        Self {
            highlight_rules: &JAVASCRIPT_HIGHLIGHT_RULES,
            folding_rules: CStyleFoldMode::new(),
        }
    }
}

impl Default for JavaScriptMode {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageMode for JavaScriptMode {
    fn id(&self) -> &'static str {
        JAVASCRIPT_MODE_ID
    }

    fn snippet_file_id(&self) -> Option<&'static str> {
        Some(JAVASCRIPT_SNIPPETS_ID)
    }

    fn highlight_rules(&self) -> &'static HighlightRules {
        self.highlight_rules
    }

    fn folding_rules(&self) -> &dyn FoldingStrategy {
        &self.folding_rules
    }

    fn comment_tokens(&self) -> CommentTokens {
        CommentTokens::C_STYLE
    }

    fn toggle_comment_lines(&self, rope: &mut Rope, start_row: usize, end_row: usize) -> bool {
        comment::toggle_line_comments(rope, start_row, end_row, self.comment_tokens())
    }

    fn next_line_indent(&self, state: LineState, line: &str, tab: &str) -> String {
        indent::next_line_indent(state, line, tab)
    }

    fn check_outdent(&self, line: &str, input: &str) -> bool {
        indent::check_outdent(line, input)
    }

    fn auto_outdent(&self, session: &mut EditSession, row: usize) -> bool {
        indent::auto_outdent(session, row)
    }

    fn create_worker(&self, session: Option<&EditSession>) -> Option<SyntaxWorker> {
        let session = session?;
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(mode = JAVASCRIPT_MODE_ID, "no async runtime; syntax worker disabled");
            return None;
        };
        Some(SyntaxWorker::spawn(
            &handle,
            self.highlight_rules,
            session.version(),
            session.text(),
        ))
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/mode/javascript.rs"]
mod tests;
