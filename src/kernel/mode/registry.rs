use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{AnchorMode, JavaScriptMode, LanguageMode, ANCHOR_MODE_ID, JAVASCRIPT_MODE_ID};
use crate::kernel::language::LanguageId;
use crate::kernel::services::ports::Settings;

pub type ModeFactory = fn() -> Arc<dyn LanguageMode>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    UnknownMode(String),
    DuplicateMode(String),
    UnsupportedPath(PathBuf),
}

impl std::fmt::Display for ModeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeError::UnknownMode(id) => write!(f, "unknown mode: {}", id),
            ModeError::DuplicateMode(id) => write!(f, "mode already registered: {}", id),
            ModeError::UnsupportedPath(path) => {
                write!(f, "no mode for file: {}", path.display())
            }
        }
    }
}

impl std::error::Error for ModeError {}

fn javascript_mode() -> Arc<dyn LanguageMode> {
    Arc::new(JavaScriptMode::new())
}

fn anchor_mode() -> Arc<dyn LanguageMode> {
    Arc::new(AnchorMode::new())
}

const BUILTIN_MODES: [(&str, ModeFactory); 2] = [
    (JAVASCRIPT_MODE_ID, javascript_mode),
    (ANCHOR_MODE_ID, anchor_mode),
];

/// Mode identifiers mapped to factories. Every `create` returns a fresh instance.
#[derive(Debug, Clone, Default)]
pub struct ModeRegistry {
    factories: BTreeMap<&'static str, ModeFactory>,
}

impl ModeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtin_modes() -> Self {
        let mut registry = Self::new();
        for (id, factory) in BUILTIN_MODES {
            registry.factories.insert(id, factory);
        }
        registry
    }

    pub fn register(&mut self, id: &'static str, factory: ModeFactory) -> Result<(), ModeError> {
        if self.factories.contains_key(id) {
            return Err(ModeError::DuplicateMode(id.to_string()));
        }
        self.factories.insert(id, factory);
        tracing::debug!(mode = id, "mode registered");
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    pub fn create(&self, id: &str) -> Result<Arc<dyn LanguageMode>, ModeError> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| ModeError::UnknownMode(id.to_string()))?;
        Ok(factory())
    }

    /// Pick the mode for `path`: a settings association for its extension wins over the
    /// built-in extension mapping.
    pub fn mode_for_path(
        &self,
        path: &Path,
        settings: &Settings,
    ) -> Result<Arc<dyn LanguageMode>, ModeError> {
        let association = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| settings.associations.get(ext));
        if let Some(id) = association {
            return self.create(id);
        }

        let language = LanguageId::from_path(path)
            .ok_or_else(|| ModeError::UnsupportedPath(path.to_path_buf()))?;
        self.create(language.mode_id())
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/mode/registry.rs"]
mod tests;
