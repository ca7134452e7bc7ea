//! Error types for the edit → render → play/export pipeline
//!
//! Each stage of the pipeline has its own error enum so the shell can decide
//! how a failure surfaces: render errors are reported and absorbed, playback
//! errors become a `PlayOutcome::Failed`, export errors propagate to the caller.

use serde::Serialize;
use thiserror::Error;

/// Failures reported by the notation renderer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The renderer returned an empty tune list
    #[error("renderer produced no tunes")]
    NoTune,

    /// The mounting surface is missing or unusable
    #[error("render target unavailable: {0}")]
    Target(String),

    /// The renderer itself threw
    #[error("renderer failed: {0}")]
    Backend(String),
}

/// Stage of the Play action that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayStage {
    Context,
    Engine,
    Render,
    Init,
    Prime,
    Start,
}

/// Failures while preparing or driving the synth engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    /// The platform audio output could not be opened
    #[error("audio context unavailable: {0}")]
    Context(String),

    /// The synth engine could not be constructed
    #[error("synth engine could not be created: {0}")]
    Engine(String),

    /// Rendering the visual object for the engine failed
    #[error("could not render notation for playback: {0}")]
    Render(#[from] RenderError),

    #[error("synth init failed: {0}")]
    Init(String),

    #[error("synth prime failed: {0}")]
    Prime(String),

    #[error("synth start failed: {0}")]
    Start(String),
}

impl AudioError {
    /// Pipeline stage this error originated from
    pub fn stage(&self) -> PlayStage {
        match self {
            AudioError::Context(_) => PlayStage::Context,
            AudioError::Engine(_) => PlayStage::Engine,
            AudioError::Render(_) => PlayStage::Render,
            AudioError::Init(_) => PlayStage::Init,
            AudioError::Prime(_) => PlayStage::Prime,
            AudioError::Start(_) => PlayStage::Start,
        }
    }
}

/// Failures while producing or saving the MIDI download
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("could not render notation for export: {0}")]
    Render(#[from] RenderError),

    /// The MIDI encoder threw or returned something unusable
    #[error("midi encoding failed: {0}")]
    Encode(String),

    /// The encoded payload was not a valid `data:` URL
    #[error("midi payload could not be decoded: {0}")]
    Decode(String),

    /// The browser refused to create or trigger the download
    #[error("midi download failed: {0}")]
    Download(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_error_stage() {
        assert_eq!(AudioError::Context("x".into()).stage(), PlayStage::Context);
        assert_eq!(AudioError::Render(RenderError::NoTune).stage(), PlayStage::Render);
        assert_eq!(AudioError::Start("x".into()).stage(), PlayStage::Start);
    }

    #[test]
    fn test_render_error_converts_into_pipeline_errors() {
        let audio: AudioError = RenderError::NoTune.into();
        assert_eq!(audio.to_string(), "could not render notation for playback: renderer produced no tunes");

        let export: ExportError = RenderError::Backend("boom".into()).into();
        assert!(export.to_string().contains("boom"));
    }
}
