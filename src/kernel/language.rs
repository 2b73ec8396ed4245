use std::path::Path;

use crate::kernel::mode::{ANCHOR_MODE_ID, JAVASCRIPT_MODE_ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LanguageId {
    JavaScript,
    Anchor,
}

impl LanguageId {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str())? {
            "js" | "mjs" | "cjs" | "jsx" => Some(Self::JavaScript),
            "rs" => Some(Self::Anchor),
            _ => None,
        }
    }

    /// Identifier of the registered mode that edits this language.
    pub fn mode_id(self) -> &'static str {
        match self {
            Self::JavaScript => JAVASCRIPT_MODE_ID,
            Self::Anchor => ANCHOR_MODE_ID,
        }
    }

    pub fn markers(self) -> &'static [&'static str] {
        match self {
            Self::JavaScript => &["package.json", "jsconfig.json"],
            Self::Anchor => &["Anchor.toml", "Cargo.toml"],
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::Anchor => "Anchor",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/language.rs"]
mod tests;
