//! Session-scoped synth engine state
//!
//! Two states: `Uninitialized` and `Ready`. The audio context is created the
//! first time an engine is needed and then lives as long as the session;
//! `reset` only drops the engine.

use serde::Serialize;

use super::AudioBackend;
use crate::errors::AudioError;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AudioState {
    Uninitialized,
    Ready,
}

/// Serializable view of the session for the UI
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AudioSnapshot {
    pub state: AudioState,
    pub has_context: bool,

    /// Text revision the ready engine was initialized from
    pub bound_revision: Option<u64>,

    /// True when the ready engine was built from older text
    pub stale: bool,
    pub contexts_created: usize,
    pub engines_created: usize,
}

struct BoundEngine<E> {
    engine: E,
    revision: u64,
}

pub struct AudioSession<B: AudioBackend> {
    backend: B,
    context: Option<B::Context>,
    engine: Option<BoundEngine<B::Engine>>,
    contexts_created: usize,
    engines_created: usize,
}

impl<B: AudioBackend> AudioSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            context: None,
            engine: None,
            contexts_created: 0,
            engines_created: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> AudioState {
        if self.engine.is_some() {
            AudioState::Ready
        } else {
            AudioState::Uninitialized
        }
    }

    /// Handle to the ready engine, if any
    pub fn ready_engine(&self) -> Option<B::Engine> {
        self.engine.as_ref().map(|bound| bound.engine.clone())
    }

    pub fn bound_revision(&self) -> Option<u64> {
        self.engine.as_ref().map(|bound| bound.revision)
    }

    /// Whether the ready engine plays notation older than `current_revision`
    pub fn is_stale(&self, current_revision: u64) -> bool {
        self.bound_revision()
            .map_or(false, |revision| revision != current_revision)
    }

    /// Context (created on first use) and a brand-new engine to initialize
    ///
    /// The session stays `Uninitialized` until `commit` is called with the
    /// engine once its init has resolved.
    pub fn begin_init(&mut self) -> Result<(B::Engine, B::Context), AudioError> {
        let context = match &self.context {
            Some(context) => context.clone(),
            None => {
                let context = self.backend.create_context()?;
                self.contexts_created += 1;
                log::debug!("Audio context created");
                self.context = Some(context.clone());
                context
            }
        };

        let engine = self.backend.create_engine()?;
        self.engines_created += 1;
        Ok((engine, context))
    }

    /// Mark `engine` as the session's ready engine
    pub fn commit(&mut self, engine: B::Engine, revision: u64) {
        if self.engine.is_some() {
            log::warn!("Replacing a ready synth engine (overlapping initialization)");
        }
        self.engine = Some(BoundEngine { engine, revision });
    }

    /// Drop the ready engine; returns whether there was one
    pub fn reset(&mut self) -> bool {
        self.engine.take().is_some()
    }

    pub fn snapshot(&self, current_revision: u64) -> AudioSnapshot {
        AudioSnapshot {
            state: self.state(),
            has_context: self.context.is_some(),
            bound_revision: self.bound_revision(),
            stale: self.is_stale(current_revision),
            contexts_created: self.contexts_created,
            engines_created: self.engines_created,
        }
    }
}
