use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    #[serde(alias = "tabSize")]
    pub tab_size: u8,
    #[serde(alias = "useSoftTabs")]
    pub use_soft_tabs: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: 4,
            use_soft_tabs: true,
        }
    }
}

impl EditorConfig {
    /// The text one indentation level inserts.
    pub fn tab_string(&self) -> String {
        if self.use_soft_tabs {
            " ".repeat(usize::from(self.tab_size.max(1)))
        } else {
            "\t".to_string()
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/config.rs"]
mod tests;
