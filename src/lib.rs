//! ABC Music Editor WASM Module
//!
//! Type ABC notation, see the score redrawn on every edit, play it through
//! the abcjs synth and download it as a MIDI file.
//!
//! The pipeline lives in `editor::EditorShell` and only talks to the
//! renderer, synth and MIDI encoder through the traits in `renderers` and
//! `synth`; `api` supplies the browser implementations.

pub mod api;
pub mod editor;
pub mod errors;
pub mod html_layout;
pub mod models;
pub mod renderers;
pub mod synth;
pub mod utils;

// Re-export commonly used types
pub use editor::{EditorShell, PlayOutcome, RenderReport};
pub use errors::{AudioError, ExportError, PlayStage, RenderError};
pub use models::{EditorConfig, EnginePolicy, NotationStore, DEFAULT_ABC};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second init (module re-instantiated on the same page) keeps the first logger
    #[cfg(feature = "console_log")]
    {
        if let Err(err) = console_log::init_with_level(log::Level::Trace) {
            web_sys::console::warn_1(&format!("console_log init failed: {}", err).into());
        }
    }
    log::set_max_level(models::LogLevel::default().to_level().to_level_filter());

    log::info!("ABC editor WASM module initialized");
}
