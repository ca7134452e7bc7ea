//! Shared types for the WASM API
//!
//! Result shapes handed back to JavaScript that have no home in the core.

use serde::Serialize;

use crate::renderers::midi::{inspect, DownloadFile, MidiSummary};
use crate::utils::RenderTimings;

/// What `downloadMidi` saved
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub filename: String,
    pub mime_type: String,
    pub byte_len: usize,

    /// Absent when the payload did not parse as a Standard MIDI File
    pub summary: Option<MidiSummary>,
}

impl From<&DownloadFile> for ExportReport {
    fn from(file: &DownloadFile) -> Self {
        Self {
            filename: file.filename.clone(),
            mime_type: file.mime_type.clone(),
            byte_len: file.bytes.len(),
            summary: inspect(&file.bytes).ok(),
        }
    }
}

/// Render timing figures for the UI
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderMetrics {
    pub renders: u32,
    pub last_ms: f64,
    pub max_ms: f64,
    pub average_ms: Option<f64>,
}

impl From<&RenderTimings> for RenderMetrics {
    fn from(timings: &RenderTimings) -> Self {
        Self {
            renders: timings.count,
            last_ms: timings.last_ms,
            max_ms: timings.max_ms,
            average_ms: timings.average_ms(),
        }
    }
}
