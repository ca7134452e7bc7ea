//! Default values for MIDI export and playback
//!
//! Shared by the export path and the synth options.

/// File name given to the downloaded MIDI file
pub const MIDI_FILENAME: &str = "music.midi";

/// MIME type of the downloaded blob
pub const MIDI_MIME_TYPE: &str = "audio/midi";

/// Prefix of the `encoded` payload returned by the MIDI encoder
pub const MIDI_DATA_URL_PREFIX: &str = "data:audio/midi,";

/// Default MIDI program (0 = Acoustic Grand Piano in General MIDI)
pub const DEFAULT_PROGRAM: u8 = 0;

/// Highest valid General MIDI program number
pub const MAX_PROGRAM: u8 = 127;
