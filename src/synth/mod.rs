//! Synth playback contracts
//!
//! The audio engine is external. `AudioBackend` builds the two platform
//! objects (audio output context, synth engine) and `SynthEngine` drives
//! one engine through init → prime → start. `AudioSession` keeps the one
//! engine a session is allowed to have.

pub mod session;

use serde::{Deserialize, Serialize};

use crate::errors::AudioError;
use crate::renderers::midi::DEFAULT_PROGRAM;

pub use session::{AudioSession, AudioSnapshot, AudioState};

/// Instrument options passed to `SynthEngine::init`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct SynthOptions {
    /// General MIDI program number
    pub program: u8,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self { program: DEFAULT_PROGRAM }
    }
}

/// A handle to a synth engine
///
/// Handles are cheap to clone and all clones refer to the same engine, so a
/// playback in progress never needs to borrow the session.
#[allow(async_fn_in_trait)]
pub trait SynthEngine: Clone {
    type Context;
    type Visual;

    /// Bind the engine to an audio context and a rendered tune
    async fn init(
        &self,
        context: &Self::Context,
        visual: &Self::Visual,
        options: &SynthOptions,
    ) -> Result<(), AudioError>;

    /// Prepare the audio buffers for the bound tune
    async fn prime(&self) -> Result<(), AudioError>;

    async fn start(&self) -> Result<(), AudioError>;
}

/// Factory for the platform audio objects
pub trait AudioBackend {
    type Context: Clone;
    type Visual;
    type Engine: SynthEngine<Context = Self::Context, Visual = Self::Visual>;

    fn create_context(&self) -> Result<Self::Context, AudioError>;

    fn create_engine(&self) -> Result<Self::Engine, AudioError>;
}
