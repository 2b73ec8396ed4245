//! Headless editing core: language modes and the sessions they drive.

pub mod editor;
pub mod language;
pub mod mode;
pub mod services;
pub mod session;

pub use editor::folding::{FoldRange, FoldState, FoldStyle, FoldWidget, FoldingStrategy};
pub use editor::syntax::{HighlightKind, HighlightRules, HighlightSpan, SyntaxColorGroup};
pub use language::LanguageId;
pub use mode::{AnchorMode, JavaScriptMode, LanguageMode, ModeError, ModeRegistry, SyntaxWorker};
pub use session::EditSession;
