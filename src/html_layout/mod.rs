//! HTML Layout
//!
//! Builds the editor page inside a root element: notation textarea, the
//! Play / Download buttons, a status line, the score target and the guide
//! panel. Event listeners forward to the `AbcEditor` session.
//!
//! Config can be supplied as JSON in the root's `data-editor-config`
//! attribute.

pub mod guide_panel;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlTextAreaElement};

use crate::api::helpers::to_js_error;
use crate::api::AbcEditor;
use crate::editor::PlayOutcome;
use crate::models::EditorConfig;

pub const CONFIG_ATTRIBUTE: &str = "data-editor-config";
pub const EDITOR_TITLE: &str = "ABC Music Editor";
pub const TEXTAREA_PLACEHOLDER: &str = "Enter ABC notation here...";
pub const PLAY_LABEL: &str = "Play Music";
pub const DOWNLOAD_LABEL: &str = "Download MIDI";

pub(crate) fn create_element(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    Ok(element)
}

fn create_button(document: &Document, label: &str, class: &str) -> Result<HtmlButtonElement, JsValue> {
    let button: HtmlButtonElement = create_element(document, "button", class)?.dyn_into()?;
    button.set_type("button");
    button.set_text_content(Some(label));
    Ok(button)
}

/// Build the editor UI inside `root` and return its session
///
/// The default text is rendered before this returns.
#[wasm_bindgen(js_name = mountEditor)]
pub fn mount_editor(root: &HtmlElement) -> Result<AbcEditor, JsValue> {
    let config = match root.get_attribute(CONFIG_ATTRIBUTE) {
        Some(json) => EditorConfig::from_json(&json).map_err(|e| to_js_error("Invalid data-editor-config", e))?,
        None => EditorConfig::default(),
    };
    let document = root
        .owner_document()
        .ok_or_else(|| JsValue::from_str("root element is not attached to a document"))?;

    let card = create_element(&document, "div", "abc-editor")?;

    let heading = create_element(&document, "h1", "abc-editor-title")?;
    heading.set_text_content(Some(EDITOR_TITLE));
    card.append_child(&heading)?;

    let textarea: HtmlTextAreaElement = create_element(&document, "textarea", "abc-editor-input")?.dyn_into()?;
    textarea.set_placeholder(TEXTAREA_PLACEHOLDER);
    textarea.set_spellcheck(false);
    textarea.set_value(&config.default_text);
    card.append_child(&textarea)?;

    let actions = create_element(&document, "div", "abc-editor-actions")?;
    let play_button = create_button(&document, PLAY_LABEL, "abc-editor-play")?;
    let download_button = create_button(&document, DOWNLOAD_LABEL, "abc-editor-download")?;
    actions.append_child(&play_button)?;
    actions.append_child(&download_button)?;
    card.append_child(&actions)?;

    let status = create_element(&document, "p", "abc-editor-status")?;
    status.set_attribute("role", "status")?;
    card.append_child(&status)?;

    let target: HtmlElement = create_element(&document, "div", "abc-notation")?.dyn_into()?;
    card.append_child(&target)?;

    root.append_child(&card)?;
    let guide = guide_panel::build_guide_panel(&document)?;
    root.append_child(&guide)?;

    let editor = AbcEditor::with_config(target, config);
    let shell = editor.shell();
    let report = shell.refresh();
    status.set_text_content(report.error.as_deref());

    // Edit → re-render
    {
        let shell = editor.shell();
        let textarea_handle = textarea.clone();
        let status = status.clone();
        let on_input = Closure::<dyn FnMut()>::new(move || {
            let report = shell.set_text(&textarea_handle.value());
            status.set_text_content(report.error.as_deref());
        });
        textarea.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
        on_input.forget();
    }

    // Play → async init/prime/start, outcome shown in the status line
    {
        let shell = editor.shell();
        let status = status.clone();
        let on_play = Closure::<dyn FnMut()>::new(move || {
            let shell = shell.clone();
            let status = status.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match shell.play().await {
                    PlayOutcome::Started { .. } => status.set_text_content(None),
                    PlayOutcome::Failed { reason, .. } => {
                        status.set_text_content(Some(&format!("Could not play music: {}", reason)))
                    }
                }
            });
        });
        play_button.add_event_listener_with_callback("click", on_play.as_ref().unchecked_ref())?;
        on_play.forget();
    }

    // Download → errors are thrown to the browser's error surface
    {
        let shell = editor.shell();
        let on_download = Closure::<dyn FnMut() -> Result<(), JsValue>>::new(move || {
            shell
                .download_midi()
                .map(|_| ())
                .map_err(|e| to_js_error("MIDI download failed", e))
        });
        download_button.add_event_listener_with_callback("click", on_download.as_ref().unchecked_ref())?;
        on_download.forget();
    }

    log::info!("ABC editor mounted");
    Ok(editor)
}
