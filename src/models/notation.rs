//! Composition text storage
//!
//! The notation store holds the ABC source the user is editing. It performs
//! no validation: whatever the user types is handed to the renderer as-is.

use serde::{Deserialize, Serialize};

/// Built-in example tune shown when the editor first loads
pub const DEFAULT_ABC: &str = "X:1
T:Example Song
M:4/4
L:1/4
K:C
C D E F|G A B c|c B A G|F E D C|";

/// Text size past which a slow-render warning is logged (no limit is enforced)
pub const LARGE_TEXT_WARN_BYTES: usize = 64 * 1024;

/// Current composition text plus the example it started from
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NotationStore {
    text: String,
    default_text: String,

    /// Bumped on every update that changes the text
    revision: u64,
}

impl NotationStore {
    /// Create a store seeded with `default_text`
    pub fn new(default_text: impl Into<String>) -> Self {
        let default_text = default_text.into();
        Self {
            text: default_text.clone(),
            default_text,
            revision: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn default_text(&self) -> &str {
        &self.default_text
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the text unconditionally
    ///
    /// Returns `true` when the content actually changed (and the revision
    /// moved forward).
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.text = text;
        self.revision += 1;
        true
    }

    /// Put the built-in example back into the editor
    pub fn restore_default(&mut self) -> bool {
        let default_text = self.default_text.clone();
        self.set_text(default_text)
    }

    pub fn is_default(&self) -> bool {
        self.text == self.default_text
    }
}

impl Default for NotationStore {
    fn default() -> Self {
        Self::new(DEFAULT_ABC)
    }
}
