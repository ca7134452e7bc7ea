//! MIDI export contracts
//!
//! The encoder turning a visual object into a MIDI file is external; so is
//! the mechanism that hands the file to the user. This module holds the two
//! traits for them plus the payload decoding and the download description.
//!
//! # Usage
//! ```rust,ignore
//! let payload = encoder.encode(&visual, MidiOutputType::Encoded)?;
//! let file = DownloadFile::midi(&options, payload.into_bytes()?);
//! saver.save(&file)?;
//! ```

pub mod defaults;
pub mod inspect;
pub mod payload;

use serde::{Deserialize, Serialize};

use crate::errors::ExportError;

pub use defaults::{DEFAULT_PROGRAM, MIDI_FILENAME, MIDI_MIME_TYPE};
pub use inspect::{inspect, MidiSummary};
pub use payload::MidiPayload;

/// Output form requested from the MIDI encoder
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MidiOutputType {
    /// Percent-escaped `data:audio/midi,` string
    #[default]
    Encoded,
    /// Raw byte array
    Binary,
}

impl MidiOutputType {
    pub fn as_str(self) -> &'static str {
        match self {
            MidiOutputType::Encoded => "encoded",
            MidiOutputType::Binary => "binary",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct MidiOptions {
    pub filename: String,
    pub output_type: MidiOutputType,
}

impl Default for MidiOptions {
    fn default() -> Self {
        Self {
            filename: MIDI_FILENAME.to_string(),
            output_type: MidiOutputType::default(),
        }
    }
}

/// Converts a rendered tune into a MIDI file
pub trait MidiEncoder {
    type Visual;

    fn encode(&self, visual: &Self::Visual, output: MidiOutputType) -> Result<MidiPayload, ExportError>;
}

/// A file ready to be handed to the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadFile {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DownloadFile {
    /// MIDI download named per `options`
    pub fn midi(options: &MidiOptions, bytes: Vec<u8>) -> Self {
        Self {
            filename: options.filename.clone(),
            mime_type: MIDI_MIME_TYPE.to_string(),
            bytes,
        }
    }
}

/// Delivers a file to the user (a browser download in production)
pub trait FileSaver {
    fn save(&self, file: &DownloadFile) -> Result<(), ExportError>;
}
