//! Renderers module for the ABC editor
//!
//! The notation renderer and the MIDI encoder are external collaborators.
//! This module defines the narrow contracts the editor needs from them;
//! the browser implementations live in `api::bindings`.

pub mod midi;

use serde::{Deserialize, Serialize};

use crate::errors::RenderError;

/// Options passed through to the renderer on every call
///
/// Field names follow the renderer's own parameter object.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct RenderOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsive: Option<String>,

    #[serde(rename = "add_classes", alias = "addClasses")]
    pub add_classes: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            responsive: Some("resize".to_string()),
            add_classes: true,
        }
    }
}

/// Turns notation text into a drawn score plus visual objects
pub trait NotationRenderer {
    /// Surface the score is drawn into
    type Target;

    /// Opaque parsed tune, consumed by the synth and MIDI encoder
    type Visual: Clone;

    /// Clear and redraw `target` from `text`
    ///
    /// Malformed notation must not fail the call; the renderer draws
    /// whatever it can parse. Errors are reserved for the renderer itself
    /// throwing or the target being unusable.
    fn render(
        &self,
        target: &Self::Target,
        text: &str,
        options: &RenderOptions,
    ) -> Result<Vec<Self::Visual>, RenderError>;

    /// Parser warnings attached to a visual object, if the renderer keeps any
    fn warnings(&self, _visual: &Self::Visual) -> Vec<String> {
        Vec::new()
    }
}

/// Render and keep only the first tune
pub fn render_first<R: NotationRenderer>(
    renderer: &R,
    target: &R::Target,
    text: &str,
    options: &RenderOptions,
) -> Result<R::Visual, RenderError> {
    renderer
        .render(target, text, options)?
        .into_iter()
        .next()
        .ok_or(RenderError::NoTune)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct CountingRenderer {
        tunes: usize,
    }

    impl NotationRenderer for CountingRenderer {
        type Target = RefCell<Vec<String>>;
        type Visual = usize;

        fn render(
            &self,
            target: &Self::Target,
            text: &str,
            _options: &RenderOptions,
        ) -> Result<Vec<usize>, RenderError> {
            target.borrow_mut().push(text.to_string());
            Ok((0..self.tunes).collect())
        }
    }

    #[test]
    fn test_render_first_takes_index_zero() {
        let target = RefCell::new(Vec::new());
        let renderer = CountingRenderer { tunes: 3 };
        let visual = render_first(&renderer, &target, "X:1", &RenderOptions::default()).unwrap();
        assert_eq!(visual, 0);
        assert_eq!(target.borrow().len(), 1);
    }

    #[test]
    fn test_render_first_without_tunes() {
        let target = RefCell::new(Vec::new());
        let renderer = CountingRenderer { tunes: 0 };
        let result = render_first(&renderer, &target, "", &RenderOptions::default());
        assert_eq!(result, Err(RenderError::NoTune));
    }

    #[test]
    fn test_render_options_wire_format() {
        let json = serde_json::to_value(RenderOptions::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "responsive": "resize", "add_classes": true }));

        let plain = RenderOptions { responsive: None, add_classes: false };
        assert_eq!(serde_json::to_value(plain).unwrap(), serde_json::json!({ "add_classes": false }));
    }
}
