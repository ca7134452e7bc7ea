// In-memory stand-ins for the renderer, synth, MIDI encoder and download,
// plus a poll-to-completion executor for the shell's async operations.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::{pin, Pin};
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use abc_editor_wasm::errors::{AudioError, ExportError, RenderError};
use abc_editor_wasm::renderers::midi::{DownloadFile, FileSaver, MidiEncoder, MidiOutputType, MidiPayload};
use abc_editor_wasm::renderers::{NotationRenderer, RenderOptions};
use abc_editor_wasm::synth::{AudioBackend, SynthEngine, SynthOptions};
use abc_editor_wasm::{EditorConfig, EditorShell};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

// ============================================================================
// Executor
// ============================================================================

/// Drive a future whose awaits all resolve without external wakeups
pub fn block_on<F: Future>(future: F) -> F::Output {
    let mut cx = Context::from_waker(Waker::noop());
    let mut future = pin!(future);
    for _ in 0..1000 {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return output;
        }
    }
    panic!("future did not complete");
}

/// Poll once without a real waker
pub fn poll_once<F: Future>(future: Pin<&mut F>) -> Poll<F::Output> {
    future.poll(&mut Context::from_waker(Waker::noop()))
}

/// Pending until `open` is set
pub struct Gate {
    pub open: Rc<Cell<bool>>,
}

impl Future for Gate {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        if self.open.get() {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Notes the fake renderer "understood" in a piece of text
#[derive(Clone, Debug, PartialEq)]
pub struct FakeTune {
    pub source: String,
    pub notes: Vec<char>,
}

#[derive(Default, Debug)]
pub struct Surface {
    pub draws: usize,
    pub content: String,
}

/// Draws note letters from the tune body and warns about everything else
///
/// Text containing `%%crash` makes it throw.
#[derive(Default)]
pub struct FakeRenderer {
    pub calls: Cell<usize>,
}

impl NotationRenderer for FakeRenderer {
    type Target = RefCell<Surface>;
    type Visual = FakeTune;

    fn render(
        &self,
        target: &RefCell<Surface>,
        text: &str,
        _options: &RenderOptions,
    ) -> Result<Vec<FakeTune>, RenderError> {
        self.calls.set(self.calls.get() + 1);
        if text.contains("%%crash") {
            return Err(RenderError::Backend("TypeError: cannot read properties of undefined".into()));
        }

        let notes: Vec<char> = text
            .lines()
            .filter(|line| !is_header(line))
            .flat_map(str::chars)
            .filter(|c| matches!(c.to_ascii_uppercase(), 'A'..='G'))
            .collect();

        let mut surface = target.borrow_mut();
        surface.draws += 1;
        surface.content = if notes.is_empty() {
            "<svg class=\"abcjs-empty\"></svg>".to_string()
        } else {
            format!("<svg>{}</svg>", notes.iter().collect::<String>())
        };

        Ok(vec![FakeTune { source: text.to_string(), notes }])
    }

    fn warnings(&self, visual: &FakeTune) -> Vec<String> {
        visual
            .source
            .lines()
            .filter(|line| !is_header(line))
            .flat_map(str::chars)
            .filter(|c| !(c.is_ascii_alphanumeric() || " |',/\n".contains(*c)))
            .map(|c| format!("Unknown character '{}'", c))
            .collect()
    }
}

fn is_header(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

// ============================================================================
// Synth
// ============================================================================

#[derive(Default, Debug)]
pub struct AudioLog {
    pub contexts_created: usize,
    pub engines_created: usize,
    /// (engine id, notes bound at init)
    pub inits: Vec<(usize, Vec<char>)>,
    pub primes: Vec<usize>,
    /// Notes each start call played
    pub played: Vec<Vec<char>>,
}

#[derive(Default, Clone, Copy)]
pub struct Failures {
    pub no_audio: bool,
    pub init: bool,
    pub prime: bool,
}

#[derive(Clone)]
pub struct FakeSynth {
    id: usize,
    bound: Rc<RefCell<Vec<char>>>,
    log: Rc<RefCell<AudioLog>>,
    failures: Failures,
    init_gate: Option<Rc<Cell<bool>>>,
}

impl SynthEngine for FakeSynth {
    type Context = usize;
    type Visual = FakeTune;

    async fn init(&self, _context: &usize, visual: &FakeTune, _options: &SynthOptions) -> Result<(), AudioError> {
        if self.failures.init {
            return Err(AudioError::Init("decodeAudioData failed".into()));
        }
        if let Some(open) = &self.init_gate {
            Gate { open: Rc::clone(open) }.await;
        }
        *self.bound.borrow_mut() = visual.notes.clone();
        self.log.borrow_mut().inits.push((self.id, visual.notes.clone()));
        Ok(())
    }

    async fn prime(&self) -> Result<(), AudioError> {
        if self.failures.prime {
            return Err(AudioError::Prime("no soundfont".into()));
        }
        self.log.borrow_mut().primes.push(self.id);
        Ok(())
    }

    async fn start(&self) -> Result<(), AudioError> {
        let notes = self.bound.borrow().clone();
        self.log.borrow_mut().played.push(notes);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeAudio {
    pub log: Rc<RefCell<AudioLog>>,
    pub failures: Failures,

    /// When set, every engine's init waits for it to open
    pub init_gate: Option<Rc<Cell<bool>>>,
}

impl AudioBackend for FakeAudio {
    type Context = usize;
    type Visual = FakeTune;
    type Engine = FakeSynth;

    fn create_context(&self) -> Result<usize, AudioError> {
        if self.failures.no_audio {
            return Err(AudioError::Context("AudioContext is not defined".into()));
        }
        let mut log = self.log.borrow_mut();
        log.contexts_created += 1;
        Ok(log.contexts_created)
    }

    fn create_engine(&self) -> Result<FakeSynth, AudioError> {
        let mut log = self.log.borrow_mut();
        log.engines_created += 1;
        Ok(FakeSynth {
            id: log.engines_created,
            bound: Rc::new(RefCell::new(Vec::new())),
            log: Rc::clone(&self.log),
            failures: self.failures,
            init_gate: self.init_gate.clone(),
        })
    }
}

// ============================================================================
// MIDI
// ============================================================================

/// One quarter note per rendered note, returned in the requested form
#[derive(Default)]
pub struct FakeEncoder {
    pub fail: bool,
}

pub fn smf_for(notes: &[char]) -> Vec<u8> {
    let mut events = Vec::new();
    for note in notes {
        let key = 60 + (note.to_ascii_uppercase() as u8 - b'A');
        events.push(TrackEvent {
            delta: 0.into(),
            kind: TrackEventKind::Midi {
                channel: 0.into(),
                message: MidiMessage::NoteOn { key: key.into(), vel: 64.into() },
            },
        });
        events.push(TrackEvent {
            delta: 480.into(),
            kind: TrackEventKind::Midi {
                channel: 0.into(),
                message: MidiMessage::NoteOff { key: key.into(), vel: 0.into() },
            },
        });
    }
    events.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    let smf = Smf {
        header: Header {
            format: Format::SingleTrack,
            timing: Timing::Metrical(480.into()),
        },
        tracks: vec![events],
    };
    let mut out = Vec::new();
    smf.write(&mut out).unwrap();
    out
}

pub fn percent_encode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| {
            if b.is_ascii_alphanumeric() {
                (*b as char).to_string()
            } else {
                format!("%{:02X}", b)
            }
        })
        .collect()
}

impl MidiEncoder for FakeEncoder {
    type Visual = FakeTune;

    fn encode(&self, visual: &FakeTune, output: MidiOutputType) -> Result<MidiPayload, ExportError> {
        if self.fail {
            return Err(ExportError::Encode("getMidiFile threw".into()));
        }
        let bytes = smf_for(&visual.notes);
        Ok(match output {
            MidiOutputType::Encoded => MidiPayload::Encoded(format!("data:audio/midi,{}", percent_encode(&bytes))),
            MidiOutputType::Binary => MidiPayload::Binary(bytes),
        })
    }
}

#[derive(Default)]
pub struct FakeSaver {
    pub saved: RefCell<Vec<DownloadFile>>,
    pub fail: bool,
}

impl FileSaver for FakeSaver {
    fn save(&self, file: &DownloadFile) -> Result<(), ExportError> {
        if self.fail {
            return Err(ExportError::Download("download blocked".into()));
        }
        self.saved.borrow_mut().push(file.clone());
        Ok(())
    }
}

// ============================================================================
// Shell
// ============================================================================

pub type TestShell = EditorShell<FakeRenderer, FakeAudio, FakeEncoder, FakeSaver>;

pub struct Harness {
    pub shell: TestShell,
    pub audio: Rc<RefCell<AudioLog>>,
}

pub fn harness_with(config: EditorConfig, failures: Failures, encoder: FakeEncoder, saver: FakeSaver) -> Harness {
    let audio = FakeAudio { failures, ..Default::default() };
    let log = Rc::clone(&audio.log);
    let shell = EditorShell::new(
        config,
        RefCell::new(Surface::default()),
        FakeRenderer::default(),
        audio,
        encoder,
        saver,
    );
    Harness { shell, audio: log }
}

pub fn harness(config: EditorConfig) -> Harness {
    harness_with(config, Failures::default(), FakeEncoder::default(), FakeSaver::default())
}

/// Harness whose synth init stays pending until the returned flag is set
pub fn gated_harness(config: EditorConfig) -> (Harness, Rc<Cell<bool>>) {
    let open = Rc::new(Cell::new(false));
    let audio = FakeAudio {
        init_gate: Some(Rc::clone(&open)),
        ..Default::default()
    };
    let log = Rc::clone(&audio.log);
    let shell = EditorShell::new(
        config,
        RefCell::new(Surface::default()),
        FakeRenderer::default(),
        audio,
        FakeEncoder::default(),
        FakeSaver::default(),
    );
    (Harness { shell, audio: log }, open)
}
