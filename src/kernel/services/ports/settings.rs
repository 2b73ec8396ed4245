use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::config::EditorConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence.
    #[serde(
        default,
        alias = "logFilter",
        skip_serializing_if = "Option::is_none"
    )]
    pub log_filter: Option<String>,
    #[serde(default)]
    pub editor: EditorConfig,
    /// File extension (without the dot) to mode id, e.g. `"rs": "ace/mode/anchor"`.
    #[serde(default)]
    pub associations: BTreeMap<String, String>,
}
