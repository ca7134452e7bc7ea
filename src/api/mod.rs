//! ABC Editor WASM API
//!
//! This module provides the JavaScript-facing API of the editor.
//!
//! # Module Structure
//!
//! - `bindings`: abcjs / Web Audio / download implementations of the core contracts
//! - `helpers`: serialization and error conversion at the JS boundary
//! - `types`: result shapes returned to JavaScript
//!
//! `AbcEditor` is the session object: one per mounted editor, holding the
//! composition text, the render target and the (lazily created) synth.

pub mod bindings;
pub mod helpers;
pub mod types;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::editor::EditorShell;
use crate::models::{EditorConfig, DEFAULT_ABC, NOTATION_GUIDE};
use bindings::{AbcjsMidiEncoder, AbcjsRenderer, AbcjsSynthBackend, BrowserDownloader};
use helpers::{deserialize, serialize, to_js_error};
use types::{ExportReport, RenderMetrics};

/// Editor shell wired to abcjs and the browser
pub type WebEditorShell = EditorShell<AbcjsRenderer, AbcjsSynthBackend, AbcjsMidiEncoder, BrowserDownloader>;

#[wasm_bindgen]
pub struct AbcEditor {
    shell: Rc<WebEditorShell>,
}

impl AbcEditor {
    /// Build an editor drawing into `target`; nothing is rendered yet
    pub fn with_config(target: HtmlElement, config: EditorConfig) -> Self {
        log::set_max_level(config.log_level.to_level().to_level_filter());

        let shell = EditorShell::new(
            config,
            target,
            AbcjsRenderer::new(),
            AbcjsSynthBackend,
            AbcjsMidiEncoder,
            BrowserDownloader,
        );
        Self { shell: Rc::new(shell) }
    }

    pub fn shell(&self) -> Rc<WebEditorShell> {
        Rc::clone(&self.shell)
    }
}

#[wasm_bindgen]
impl AbcEditor {
    /// Create an editor for `target`
    ///
    /// `config` may be `undefined`/`null` or a partial `EditorConfig` object.
    /// The initial text is rendered immediately.
    #[wasm_bindgen(constructor)]
    pub fn new(target: HtmlElement, config: JsValue) -> Result<AbcEditor, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            deserialize(config, "Invalid editor config")?
        };

        let editor = Self::with_config(target, config);
        editor.shell.refresh();
        Ok(editor)
    }

    /// Current composition text
    pub fn text(&self) -> String {
        self.shell.text()
    }

    /// Replace the composition text and re-render
    ///
    /// # Returns
    /// `RenderReport` object (`revision`, `tunes`, `warnings`, `error?`)
    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&self, text: &str) -> Result<JsValue, JsValue> {
        serialize(&self.shell.set_text(text), "RenderReport serialization error")
    }

    pub fn refresh(&self) -> Result<JsValue, JsValue> {
        serialize(&self.shell.refresh(), "RenderReport serialization error")
    }

    /// Load the built-in example tune
    #[wasm_bindgen(js_name = restoreDefault)]
    pub fn restore_default(&self) -> Result<JsValue, JsValue> {
        serialize(&self.shell.restore_default(), "RenderReport serialization error")
    }

    /// Start playback
    ///
    /// # Returns
    /// Promise resolving to a `PlayOutcome` (`{status: "started" | "failed", ...}`);
    /// it never rejects because of a playback failure.
    pub fn play(&self) -> js_sys::Promise {
        let shell = self.shell();
        wasm_bindgen_futures::future_to_promise(async move {
            let outcome = shell.play().await;
            serialize(&outcome, "PlayOutcome serialization error")
        })
    }

    /// Render, encode and download the composition as `music.midi`
    ///
    /// Throws when rendering, encoding or the download itself fails.
    #[wasm_bindgen(js_name = downloadMidi)]
    pub fn download_midi(&self) -> Result<JsValue, JsValue> {
        let file = self
            .shell
            .download_midi()
            .map_err(|e| to_js_error("MIDI download failed", e))?;
        serialize(&ExportReport::from(&file), "ExportReport serialization error")
    }

    /// Drop the synth engine so the next play rebuilds it from current text
    #[wasm_bindgen(js_name = resetAudio)]
    pub fn reset_audio(&self) -> bool {
        self.shell.reset_audio()
    }

    #[wasm_bindgen(js_name = audioState)]
    pub fn audio_state(&self) -> Result<JsValue, JsValue> {
        serialize(&self.shell.audio_state(), "AudioSnapshot serialization error")
    }

    #[wasm_bindgen(js_name = renderMetrics)]
    pub fn render_metrics(&self) -> Result<JsValue, JsValue> {
        let timings = self.shell.renderer().timings();
        serialize(&RenderMetrics::from(&timings), "RenderMetrics serialization error")
    }
}

/// Entries of the ABC syntax help panel
#[wasm_bindgen(js_name = getNotationGuide)]
pub fn get_notation_guide() -> Result<JsValue, JsValue> {
    serialize(&NOTATION_GUIDE, "Guide serialization error")
}

/// The built-in example tune
#[wasm_bindgen(js_name = defaultNotation)]
pub fn default_notation() -> String {
    DEFAULT_ABC.to_string()
}
