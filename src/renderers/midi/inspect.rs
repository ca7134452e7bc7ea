//! Lightweight summary of an encoded MIDI file, used for export logging

use midly::{Format, MidiMessage, Smf, Timing, TrackEventKind};
use serde::Serialize;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MidiSummary {
    /// 0, 1 or 2 as in the SMF header
    pub format: u8,
    pub track_count: usize,

    /// `None` for SMPTE timecode timing
    pub ticks_per_beat: Option<u16>,

    /// Note-on events with non-zero velocity across all tracks
    pub note_count: usize,
    pub byte_len: usize,
}

/// Parse `bytes` as a Standard MIDI File and summarize it
pub fn inspect(bytes: &[u8]) -> Result<MidiSummary, midly::Error> {
    let smf = Smf::parse(bytes)?;

    let format = match smf.header.format {
        Format::SingleTrack => 0,
        Format::Parallel => 1,
        Format::Sequential => 2,
    };
    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(tpb) => Some(tpb.as_int()),
        Timing::Timecode(..) => None,
    };
    let note_count = smf
        .tracks
        .iter()
        .flatten()
        .filter(|event| {
            matches!(
                event.kind,
                TrackEventKind::Midi { message: MidiMessage::NoteOn { vel, .. }, .. } if vel.as_int() > 0
            )
        })
        .count();

    Ok(MidiSummary {
        format,
        track_count: smf.tracks.len(),
        ticks_per_beat,
        note_count,
        byte_len: bytes.len(),
    })
}
