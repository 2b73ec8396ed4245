//! Editor domain: syntax, folding, comment and indent rules.

pub mod comment;
pub mod folding;
pub mod indent;
pub mod syntax;

pub use comment::{toggle_line_comments, CommentTokens};
pub use indent::LineState;
pub use syntax::{
    highlight_snippet, HighlightKind, HighlightRules, HighlightSpan, LiteralKind, LiteralRange,
    SyntaxColorGroup, SyntaxDocument, SyntaxErrorNode,
};
