//! Editor shell: the edit → render → play/export pipeline
//!
//! The shell owns the composition text and wires it to the three external
//! collaborators. Every edit re-renders synchronously. Play lazily builds
//! the session's synth engine from a fresh render of the current text.
//! Download always renders again and never touches the engine.
//!
//! All methods take `&self`; state lives in `RefCell`s and no borrow is held
//! across an `.await`, so overlapping Play calls are left to the engine.

use std::cell::RefCell;

use serde::Serialize;

use crate::errors::{AudioError, ExportError, PlayStage, RenderError};
use crate::models::{EditorConfig, EnginePolicy, NotationStore, LARGE_TEXT_WARN_BYTES};
use crate::renderers::midi::{inspect, DownloadFile, FileSaver, MidiEncoder};
use crate::renderers::{render_first, NotationRenderer};
use crate::synth::{AudioBackend, AudioSession, AudioSnapshot, SynthEngine};

/// Result of a (re-)render, handed back to the UI
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenderReport {
    pub revision: u64,

    /// Number of tunes the renderer drew
    pub tunes: usize,
    pub warnings: Vec<String>,

    /// Set when the renderer failed outright; the previous drawing may remain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RenderReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of the Play action
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PlayOutcome {
    #[serde(rename_all = "camelCase")]
    Started {
        /// False when this call had to build and initialize the engine
        reused_engine: bool,
        revision: u64,
    },
    Failed {
        stage: PlayStage,
        reason: String,
    },
}

impl PlayOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, PlayOutcome::Started { .. })
    }
}

pub struct EditorShell<R, A, M, S>
where
    R: NotationRenderer,
    A: AudioBackend<Visual = R::Visual>,
    M: MidiEncoder<Visual = R::Visual>,
    S: FileSaver,
{
    config: EditorConfig,
    store: RefCell<NotationStore>,
    target: R::Target,
    renderer: R,
    audio: RefCell<AudioSession<A>>,
    encoder: M,
    saver: S,
}

impl<R, A, M, S> EditorShell<R, A, M, S>
where
    R: NotationRenderer,
    A: AudioBackend<Visual = R::Visual>,
    M: MidiEncoder<Visual = R::Visual>,
    S: FileSaver,
{
    /// Build a shell seeded with `config.default_text`
    ///
    /// Nothing is drawn until `refresh` (or an edit) runs.
    pub fn new(config: EditorConfig, target: R::Target, renderer: R, audio: A, encoder: M, saver: S) -> Self {
        let store = NotationStore::new(config.default_text.clone());
        Self {
            config,
            store: RefCell::new(store),
            target,
            renderer,
            audio: RefCell::new(AudioSession::new(audio)),
            encoder,
            saver,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn target(&self) -> &R::Target {
        &self.target
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn saver(&self) -> &S {
        &self.saver
    }

    pub fn text(&self) -> String {
        self.store.borrow().text().to_string()
    }

    pub fn revision(&self) -> u64 {
        self.store.borrow().revision()
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Replace the composition text and re-render
    pub fn set_text(&self, text: &str) -> RenderReport {
        let (changed, previous_len) = {
            let mut store = self.store.borrow_mut();
            let previous_len = store.text().len();
            (store.set_text(text), previous_len)
        };

        if previous_len <= LARGE_TEXT_WARN_BYTES && text.len() > LARGE_TEXT_WARN_BYTES {
            log::warn!(
                "Notation is {} bytes; rendering runs on every edit and may stall the page",
                text.len()
            );
        }

        if changed {
            self.on_text_changed();
        }
        self.refresh()
    }

    /// Put the built-in example back and re-render
    pub fn restore_default(&self) -> RenderReport {
        let changed = self.store.borrow_mut().restore_default();
        if changed {
            self.on_text_changed();
        }
        self.refresh()
    }

    fn on_text_changed(&self) {
        if self.config.engine_policy == EnginePolicy::RebindOnEdit && self.audio.borrow_mut().reset() {
            log::debug!("Notation changed; synth engine will be rebuilt on next play");
        }
    }

    /// Redraw the current text into the target
    ///
    /// Render failures are logged and reported, never propagated.
    pub fn refresh(&self) -> RenderReport {
        let store = self.store.borrow();
        let revision = store.revision();

        match self.renderer.render(&self.target, store.text(), &self.config.render) {
            Ok(visuals) => {
                let warnings = visuals
                    .first()
                    .map(|visual| self.renderer.warnings(visual))
                    .unwrap_or_default();
                if !warnings.is_empty() {
                    log::debug!("Render of revision {} produced {} warnings", revision, warnings.len());
                }
                RenderReport {
                    revision,
                    tunes: visuals.len(),
                    warnings,
                    error: None,
                }
            }
            Err(err) => {
                log::warn!("Render of revision {} failed: {}", revision, err);
                RenderReport {
                    revision,
                    tunes: 0,
                    warnings: Vec::new(),
                    error: Some(err.to_string()),
                }
            }
        }
    }

    /// Fresh visual object for the current text
    fn render_current(&self) -> Result<R::Visual, RenderError> {
        let store = self.store.borrow();
        render_first(&self.renderer, &self.target, store.text(), &self.config.render)
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    /// Ready engine, building and initializing one if needed
    ///
    /// Returns the engine and whether it was reused.
    pub async fn ensure_ready(&self) -> Result<(A::Engine, bool), AudioError> {
        let (engine, reused, _) = self.prepare_engine().await?;
        Ok((engine, reused))
    }

    /// Engine, reuse flag and the text revision the engine plays
    async fn prepare_engine(&self) -> Result<(A::Engine, bool, u64), AudioError> {
        let rebind = self.config.engine_policy == EnginePolicy::RebindOnEdit;
        {
            let mut audio = self.audio.borrow_mut();
            if rebind && audio.is_stale(self.revision()) {
                log::debug!("Dropping synth engine bound to older notation");
                audio.reset();
            }
            if let (Some(engine), Some(revision)) = (audio.ready_engine(), audio.bound_revision()) {
                return Ok((engine, true, revision));
            }
        }

        let (engine, context) = self.audio.borrow_mut().begin_init()?;
        let revision = self.revision();
        let visual = self.render_current()?;

        log::debug!("Initializing synth engine for revision {}", revision);
        engine.init(&context, &visual, &self.config.synth).await?;

        // Text edited while init was pending: play this once, keep nothing
        if rebind && revision != self.revision() {
            log::debug!(
                "Notation changed during synth init (revision {} -> {}); engine not kept",
                revision,
                self.revision()
            );
        } else {
            self.audio.borrow_mut().commit(engine.clone(), revision);
        }
        Ok((engine, false, revision))
    }

    /// Prepare and start playback of the current composition
    pub async fn play(&self) -> PlayOutcome {
        match self.try_play().await {
            Ok((reused_engine, revision)) => {
                log::info!("Playback started (revision {}, reused engine: {})", revision, reused_engine);
                PlayOutcome::Started { reused_engine, revision }
            }
            Err(err) => {
                log::error!("Error playing music: {}", err);
                PlayOutcome::Failed {
                    stage: err.stage(),
                    reason: err.to_string(),
                }
            }
        }
    }

    async fn try_play(&self) -> Result<(bool, u64), AudioError> {
        let (engine, reused, revision) = self.prepare_engine().await?;
        engine.prime().await?;
        engine.start().await?;
        Ok((reused, revision))
    }

    /// Drop the synth engine so the next Play rebuilds it
    pub fn reset_audio(&self) -> bool {
        self.audio.borrow_mut().reset()
    }

    pub fn audio_state(&self) -> AudioSnapshot {
        let revision = self.revision();
        self.audio.borrow().snapshot(revision)
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Render the current text, encode it as MIDI and hand it to the saver
    pub fn download_midi(&self) -> Result<DownloadFile, ExportError> {
        let visual = self.render_current()?;
        let payload = self.encoder.encode(&visual, self.config.midi.output_type)?;
        let file = DownloadFile::midi(&self.config.midi, payload.into_bytes()?);

        match inspect(&file.bytes) {
            Ok(summary) => log::info!(
                "MIDI export: {} bytes, {} tracks, {} notes",
                summary.byte_len,
                summary.track_count,
                summary.note_count
            ),
            Err(err) => log::warn!("MIDI export is not a well-formed SMF: {}", err),
        }

        self.saver.save(&file)?;
        Ok(file)
    }
}
