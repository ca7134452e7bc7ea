//! Models module for the ABC editor
//!
//! Plain data owned by the editor shell: the composition text, the
//! configuration, and the static notation guide.

pub mod config;
pub mod guide;
pub mod notation;

// Re-export commonly used types
pub use config::{EditorConfig, EnginePolicy, LogLevel};
pub use guide::{GuideEntry, NOTATION_GUIDE};
pub use notation::{NotationStore, DEFAULT_ABC, LARGE_TEXT_WARN_BYTES};
