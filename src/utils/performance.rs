//! Render timing statistics
//!
//! Rendering runs synchronously on every keystroke, so the browser renderer
//! records how long each call took. Durations come from the caller's clock.

use serde::Serialize;

/// Running statistics over render durations
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderTimings {
    pub count: u32,
    pub last_ms: f64,
    pub max_ms: f64,
    total_ms: f64,
}

impl RenderTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, duration_ms: f64) {
        let duration_ms = duration_ms.max(0.0);
        self.count += 1;
        self.last_ms = duration_ms;
        self.max_ms = self.max_ms.max(duration_ms);
        self.total_ms += duration_ms;
    }

    pub fn average_ms(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.total_ms / f64::from(self.count))
        }
    }
}
