//! Static "ABC Notation Guide" panel

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use super::create_element;
use crate::models::guide::{GuideEntry, GUIDE_INTRO, GUIDE_TITLE, NOTATION_GUIDE};

/// Build the help panel; it has no behavior
pub fn build_guide_panel(document: &Document) -> Result<Element, JsValue> {
    let panel = create_element(document, "section", "abc-guide")?;

    let title = create_element(document, "h2", "abc-guide-title")?;
    title.set_text_content(Some(GUIDE_TITLE));
    panel.append_child(&title)?;

    let intro = create_element(document, "p", "abc-guide-intro")?;
    intro.set_text_content(Some(GUIDE_INTRO));
    panel.append_child(&intro)?;

    let list = create_element(document, "ul", "abc-guide-list")?;
    for entry in NOTATION_GUIDE {
        let item = document.create_element("li")?;
        item.set_text_content(Some(&GuideEntry::display(entry)));
        list.append_child(&item)?;
    }
    panel.append_child(&list)?;

    Ok(panel)
}
