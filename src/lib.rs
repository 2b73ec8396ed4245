//! zcode-mode - language modes for the zcode editor kernel
//!
//! Module layout:
//! - kernel::editor: highlighting, folding, comment and indent rules
//! - kernel::mode: language modes (JavaScript, Anchor), registry, syntax worker
//! - kernel::session: an editable document bound to a mode
//! - kernel::services: settings ports and adapters

pub mod kernel;
