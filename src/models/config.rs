//! Editor configuration
//!
//! Every field has a default so an empty object (or no config at all) yields
//! the stock editor. Config arrives from JavaScript either as an object
//! (`serde-wasm-bindgen`) or as a JSON string (`data-editor-config`).

use serde::{Deserialize, Serialize};

use crate::models::notation::DEFAULT_ABC;
use crate::renderers::midi::MidiOptions;
use crate::renderers::RenderOptions;
use crate::synth::SynthOptions;

/// What happens to a ready synth engine when the composition text changes
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum EnginePolicy {
    /// Drop the engine on every text change; the next Play rebinds to fresh notation
    #[default]
    RebindOnEdit,

    /// Keep the first engine for the whole session (plays the notation it was built from)
    KeepFirst,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    #[default]
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Notation loaded on startup (and restored by "load example")
    pub default_text: String,
    pub render: RenderOptions,
    pub synth: SynthOptions,
    pub midi: MidiOptions,
    pub engine_policy: EnginePolicy,
    pub log_level: LogLevel,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_text: DEFAULT_ABC.to_string(),
            render: RenderOptions::default(),
            synth: SynthOptions::default(),
            midi: MidiOptions::default(),
            engine_policy: EnginePolicy::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json)
    }
}
