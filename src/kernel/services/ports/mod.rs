//! Service ports: data contracts shared by the kernel and its adapters.

pub mod config;
pub mod settings;

pub use config::EditorConfig;
pub use settings::Settings;
