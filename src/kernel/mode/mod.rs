//! Language modes: named bundles of highlighting, folding, indentation and comment
//! behavior that a host selects by identifier.

mod anchor;
mod javascript;
mod registry;
mod worker;

pub use anchor::{AnchorMode, ANCHOR_MODE_ID, ANCHOR_SNIPPETS_ID};
pub use javascript::{JavaScriptMode, JAVASCRIPT_MODE_ID, JAVASCRIPT_SNIPPETS_ID};
pub use registry::{ModeError, ModeFactory, ModeRegistry};
pub use worker::{Diagnostic, SyntaxWorker, WorkerReport};

use ropey::Rope;

use crate::kernel::editor::comment::CommentTokens;
use crate::kernel::editor::folding::FoldingStrategy;
use crate::kernel::editor::indent::LineState;
use crate::kernel::editor::syntax::HighlightRules;
use crate::kernel::session::EditSession;

pub trait LanguageMode: Send + Sync {
    /// Stable identifier the host selects this mode by.
    fn id(&self) -> &'static str;

    fn snippet_file_id(&self) -> Option<&'static str>;

    fn highlight_rules(&self) -> &'static HighlightRules;

    fn folding_rules(&self) -> &dyn FoldingStrategy;

    fn comment_tokens(&self) -> CommentTokens;

    fn toggle_comment_lines(&self, rope: &mut Rope, start_row: usize, end_row: usize) -> bool;

    /// `state` is the lexical context at the end of `line`.
    fn next_line_indent(&self, state: LineState, line: &str, tab: &str) -> String;

    fn check_outdent(&self, line: &str, input: &str) -> bool;

    fn auto_outdent(&self, session: &mut EditSession, row: usize) -> bool;

    /// Background syntax checker for `session`, if this mode offers one.
    fn create_worker(&self, session: Option<&EditSession>) -> Option<SyntaxWorker>;
}
