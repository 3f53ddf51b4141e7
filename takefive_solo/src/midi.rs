// MIDI adapter: the boundary between solos and the outside world.
//
// Reading: extracts the ordered sounded pitches from a Standard MIDI File
// (every NoteOn with non-zero velocity, in track order) as scale labels —
// the training input for the transition model. Note lengths and rests in
// the source are irrelevant to fitting and are dropped here.
//
// Writing: serializes a Solo to a single-track SMF. Beats map to ticks at
// 480 per quarter; rests become delta-time gaps between NoteOff and the
// following NoteOn.
//
// Uses the `midly` crate for both directions.

use crate::compose::{MusicEvent, Solo};
use crate::error::SoloError;
use crate::scale::{label_to_midi, midi_to_label};
use midly::{
    Format, Header, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

/// General MIDI program 65: alto saxophone. It is a jazz solo, after all.
const PROGRAM_ALTO_SAX: u8 = 65;

fn beats_to_ticks(beats: f64) -> u32 {
    (beats * TICKS_PER_QUARTER as f64).round() as u32
}

/// Read the ordered sounded pitches of a melody file as scale labels.
///
/// Labels outside the configured scale are not filtered here; fitting
/// rejects them with `InvalidPitch` so the mismatch is never silent.
pub fn read_melody(path: &Path) -> Result<Vec<String>, SoloError> {
    let bytes = std::fs::read(path)?;
    let smf = Smf::parse(&bytes)?;
    Ok(sounded_pitches(&smf))
}

/// Every NoteOn with non-zero velocity, flattened across tracks in order.
fn sounded_pitches(smf: &Smf) -> Vec<String> {
    let mut pitches = Vec::new();
    for track in &smf.tracks {
        for event in track {
            if let TrackEventKind::Midi {
                message: MidiMessage::NoteOn { key, vel },
                ..
            } = event.kind
            {
                if vel.as_int() > 0 {
                    pitches.push(midi_to_label(key.as_int()));
                }
            }
        }
    }
    pitches
}

/// Serialize a solo to a MIDI file.
pub fn write_solo(solo: &Solo, tempo_bpm: u16, path: &Path) -> Result<(), SoloError> {
    let smf = solo_to_smf(solo, tempo_bpm)?;
    let mut buf = Vec::new();
    smf.write_std(&mut buf)?;
    std::fs::write(path, &buf)?;
    Ok(())
}

/// Convert a solo to an in-memory single-track SMF.
///
/// Fails with `InvalidPitch` if an event carries a label that does not
/// parse as a note name.
fn solo_to_smf(solo: &Solo, tempo_bpm: u16) -> Result<Smf<'static>, SoloError> {
    if tempo_bpm == 0 {
        return Err(SoloError::Configuration("tempo must be positive".into()));
    }
    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    let channel = u4::new(0);
    let mut track: Track<'static> = Vec::new();

    let tempo_microseconds = 60_000_000 / tempo_bpm as u32;
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::Tempo(u24::new(tempo_microseconds))),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::ProgramChange {
                program: u7::new(PROGRAM_ALTO_SAX),
            },
        },
    });

    // Rests accumulate into the delta of the next NoteOn.
    let mut pending_ticks: u32 = 0;
    for event in &solo.events {
        match event {
            MusicEvent::Note { pitch, beats } => {
                let key = label_to_midi(pitch)
                    .ok_or_else(|| SoloError::InvalidPitch(pitch.clone()))?;
                track.push(TrackEvent {
                    delta: u28::new(pending_ticks),
                    kind: TrackEventKind::Midi {
                        channel,
                        message: MidiMessage::NoteOn {
                            key: u7::new(key),
                            vel: u7::new(80),
                        },
                    },
                });
                track.push(TrackEvent {
                    delta: u28::new(beats_to_ticks(*beats)),
                    kind: TrackEventKind::Midi {
                        channel,
                        message: MidiMessage::NoteOff {
                            key: u7::new(key),
                            vel: u7::new(0),
                        },
                    },
                });
                pending_ticks = 0;
            }
            MusicEvent::Rest { beats } => {
                pending_ticks += beats_to_ticks(*beats);
            }
        }
    }

    track.push(TrackEvent {
        delta: u28::new(pending_ticks),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);

    Ok(smf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_solo() -> Solo {
        Solo {
            events: vec![
                MusicEvent::Note {
                    pitch: "C4".to_string(),
                    beats: 1.0,
                },
                MusicEvent::Rest { beats: 0.5 },
                MusicEvent::Note {
                    pitch: "E-4".to_string(),
                    beats: 2.0,
                },
                MusicEvent::Note {
                    pitch: "B-3".to_string(),
                    beats: 0.5,
                },
            ],
        }
    }

    #[test]
    fn smf_has_single_track() {
        let smf = solo_to_smf(&sample_solo(), 120).unwrap();
        assert_eq!(smf.tracks.len(), 1);
    }

    #[test]
    fn rest_becomes_delta_gap() {
        let smf = solo_to_smf(&sample_solo(), 120).unwrap();
        let track = &smf.tracks[0];

        // Find the second NoteOn: its delta must carry the half-beat rest.
        let note_ons: Vec<&TrackEvent> = track
            .iter()
            .filter(|e| {
                matches!(
                    e.kind,
                    TrackEventKind::Midi {
                        message: MidiMessage::NoteOn { .. },
                        ..
                    }
                )
            })
            .collect();
        assert_eq!(note_ons.len(), 3);
        assert_eq!(note_ons[1].delta.as_int(), 240); // 0.5 beats at 480 tpq
        assert_eq!(note_ons[2].delta.as_int(), 0); // back-to-back notes
    }

    #[test]
    fn write_then_read_preserves_pitch_order() {
        let solo = sample_solo();
        let smf = solo_to_smf(&solo, 120).unwrap();
        let mut buf = Vec::new();
        smf.write_std(&mut buf).unwrap();

        let parsed = Smf::parse(&buf).unwrap();
        let pitches = sounded_pitches(&parsed);
        assert_eq!(pitches, vec!["C4", "E-4", "B-3"]);
    }

    #[test]
    fn bad_label_is_invalid_pitch() {
        let solo = Solo {
            events: vec![MusicEvent::Note {
                pitch: "nope".to_string(),
                beats: 1.0,
            }],
        };
        let err = solo_to_smf(&solo, 120).unwrap_err();
        assert!(matches!(err, SoloError::InvalidPitch(p) if p == "nope"));
    }
}
