//! Browser implementations of the external contracts
//!
//! abcjs is expected as the global `ABCJS` (the UMD build loaded with a
//! script tag). Every abcjs call is imported with `catch` so a throwing
//! renderer or synth surfaces as a Rust error instead of aborting the module.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, Blob, BlobPropertyBag, HtmlAnchorElement, HtmlElement, Url};

use crate::api::helpers::{describe_js_value, now_ms};
use crate::errors::{AudioError, ExportError, RenderError};
use crate::renderers::midi::{DownloadFile, FileSaver, MidiEncoder, MidiOutputType, MidiPayload};
use crate::renderers::{NotationRenderer, RenderOptions};
use crate::synth::{AudioBackend, SynthEngine, SynthOptions};
use crate::utils::RenderTimings;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ABCJS, js_name = renderAbc, catch)]
    fn render_abc(target: &HtmlElement, abc: &str, params: &JsValue) -> Result<js_sys::Array, JsValue>;

    #[wasm_bindgen(js_namespace = ["ABCJS", "synth"], js_name = supportsAudio, catch)]
    fn supports_audio() -> Result<bool, JsValue>;

    #[wasm_bindgen(js_namespace = ["ABCJS", "synth"], js_name = getMidiFile, catch)]
    fn get_midi_file(visual: &JsValue, params: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["ABCJS", "synth"])]
    #[derive(Debug, Clone)]
    pub type CreateSynth;

    #[wasm_bindgen(constructor, js_namespace = ["ABCJS", "synth"], catch)]
    fn new() -> Result<CreateSynth, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn init(this: &CreateSynth, params: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn prime(this: &CreateSynth) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn start(this: &CreateSynth) -> Result<JsValue, JsValue>;
}

/// Await whatever a JS call returned, promise or not
async fn settle(result: Result<JsValue, JsValue>) -> Result<JsValue, String> {
    let value = result.map_err(|e| describe_js_value(&e))?;
    JsFuture::from(js_sys::Promise::resolve(&value))
        .await
        .map_err(|e| describe_js_value(&e))
}

fn set_property(target: &js_sys::Object, key: &str, value: &JsValue) -> Result<(), String> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| describe_js_value(&e))
}

// ============================================================================
// Renderer
// ============================================================================

/// `ABCJS.renderAbc` drawing into an HTML element
#[derive(Default)]
pub struct AbcjsRenderer {
    timings: RefCell<RenderTimings>,
}

impl AbcjsRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timings(&self) -> RenderTimings {
        self.timings.borrow().clone()
    }
}

impl NotationRenderer for AbcjsRenderer {
    type Target = HtmlElement;
    type Visual = JsValue;

    fn render(
        &self,
        target: &HtmlElement,
        text: &str,
        options: &RenderOptions,
    ) -> Result<Vec<JsValue>, RenderError> {
        let params = serde_wasm_bindgen::to_value(options)
            .map_err(|e| RenderError::Backend(format!("bad render options: {}", e)))?;

        let started = now_ms();
        let tunes = render_abc(target, text, &params)
            .map_err(|e| RenderError::Backend(describe_js_value(&e)))?;
        self.timings.borrow_mut().record(now_ms() - started);

        Ok(tunes.iter().collect())
    }

    fn warnings(&self, visual: &JsValue) -> Vec<String> {
        js_sys::Reflect::get(visual, &JsValue::from_str("warnings"))
            .ok()
            .filter(js_sys::Array::is_array)
            .map(|warnings| {
                js_sys::Array::from(&warnings)
                    .iter()
                    .map(|warning| describe_js_value(&warning))
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ============================================================================
// Synth
// ============================================================================

/// Handle to an `ABCJS.synth.CreateSynth` instance
#[derive(Debug, Clone)]
pub struct AbcjsSynth(CreateSynth);

impl SynthEngine for AbcjsSynth {
    type Context = AudioContext;
    type Visual = JsValue;

    async fn init(
        &self,
        context: &AudioContext,
        visual: &JsValue,
        options: &SynthOptions,
    ) -> Result<(), AudioError> {
        let synth_options = serde_wasm_bindgen::to_value(options)
            .map_err(|e| AudioError::Init(format!("bad synth options: {}", e)))?;

        let params = js_sys::Object::new();
        set_property(&params, "audioContext", context).map_err(AudioError::Init)?;
        set_property(&params, "visualObj", visual).map_err(AudioError::Init)?;
        set_property(&params, "options", &synth_options).map_err(AudioError::Init)?;

        settle(self.0.init(&params)).await.map_err(AudioError::Init)?;
        Ok(())
    }

    async fn prime(&self) -> Result<(), AudioError> {
        settle(self.0.prime()).await.map_err(AudioError::Prime)?;
        Ok(())
    }

    async fn start(&self) -> Result<(), AudioError> {
        settle(self.0.start()).await.map_err(AudioError::Start)?;
        Ok(())
    }
}

/// Web Audio context plus abcjs synth construction
#[derive(Default)]
pub struct AbcjsSynthBackend;

impl AudioBackend for AbcjsSynthBackend {
    type Context = AudioContext;
    type Visual = JsValue;
    type Engine = AbcjsSynth;

    fn create_context(&self) -> Result<AudioContext, AudioError> {
        match supports_audio() {
            Ok(true) => {}
            Ok(false) => return Err(AudioError::Context("this browser has no Web Audio support".to_string())),
            Err(e) => return Err(AudioError::Context(describe_js_value(&e))),
        }
        AudioContext::new().map_err(|e| AudioError::Context(describe_js_value(&e)))
    }

    fn create_engine(&self) -> Result<AbcjsSynth, AudioError> {
        CreateSynth::new()
            .map(AbcjsSynth)
            .map_err(|e| AudioError::Engine(describe_js_value(&e)))
    }
}

// ============================================================================
// MIDI export
// ============================================================================

/// `ABCJS.synth.getMidiFile`
#[derive(Default)]
pub struct AbcjsMidiEncoder;

impl AbcjsMidiEncoder {
    fn classify(value: JsValue) -> Result<MidiPayload, ExportError> {
        if let Some(encoded) = value.as_string() {
            return Ok(MidiPayload::Encoded(encoded));
        }
        if let Some(bytes) = value.dyn_ref::<js_sys::Uint8Array>() {
            return Ok(MidiPayload::Binary(bytes.to_vec()));
        }
        if js_sys::Array::is_array(&value) {
            let first = js_sys::Array::from(&value).get(0);
            if !first.is_undefined() && !js_sys::Array::is_array(&first) {
                return Self::classify(first);
            }
        }
        Err(ExportError::Encode(format!(
            "unexpected encoder output: {}",
            describe_js_value(&value)
        )))
    }
}

impl MidiEncoder for AbcjsMidiEncoder {
    type Visual = JsValue;

    fn encode(&self, visual: &JsValue, output: MidiOutputType) -> Result<MidiPayload, ExportError> {
        let params = js_sys::Object::new();
        set_property(&params, "midiOutputType", &JsValue::from_str(output.as_str()))
            .map_err(ExportError::Encode)?;

        let value = get_midi_file(visual, &params).map_err(|e| ExportError::Encode(describe_js_value(&e)))?;
        Self::classify(value)
    }
}

// ============================================================================
// Download
// ============================================================================

/// Saves files through a temporary object URL and a synthetic link click
#[derive(Default)]
pub struct BrowserDownloader;

impl BrowserDownloader {
    fn click_link(url: &str, filename: &str) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document.body().ok_or_else(|| JsValue::from_str("document has no body"))?;

        let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
        anchor.set_href(url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none")?;

        body.append_child(&anchor)?;
        anchor.click();
        body.remove_child(&anchor)?;
        Ok(())
    }
}

impl FileSaver for BrowserDownloader {
    fn save(&self, file: &DownloadFile) -> Result<(), ExportError> {
        let download_error = |e: JsValue| ExportError::Download(describe_js_value(&e));

        let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let props = BlobPropertyBag::new();
        props.set_type(&file.mime_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &props).map_err(download_error)?;

        let url = Url::create_object_url_with_blob(&blob).map_err(download_error)?;
        let clicked = Self::click_link(&url, &file.filename);
        Url::revoke_object_url(&url).map_err(download_error)?;
        clicked.map_err(download_error)?;

        log::info!("Downloaded {} ({} bytes)", file.filename, file.bytes.len());
        Ok(())
    }
}
