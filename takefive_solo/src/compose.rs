// The generation loop: assembling timed events into a solo.
//
// Each step draws a duration, gates note-vs-rest, and — for a note — asks
// the transition model for the next pitch conditioned on the previous
// *sounded* pitch. A rest never advances the Markov cursor, matching how
// rests are excluded from the fitted statistics: the note after a rest is
// still conditioned on the last note that actually sounded.
//
// The loop condition is checked before each iteration, so the final event
// may push the total strictly past the budget. That overshoot is accepted,
// never truncated mid-event; it is bounded by the longest duration the
// rhythm table can produce.

use crate::config::SoloConfig;
use crate::error::SoloError;
use crate::markov::TransitionModel;
use crate::rhythm::{EventSelector, RhythmSampler};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use takefive_prng::SoloRng;

/// One timed event in a solo: a sounded pitch or a silence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MusicEvent {
    Note { pitch: String, beats: f64 },
    Rest { beats: f64 },
}

impl MusicEvent {
    pub fn beats(&self) -> f64 {
        match self {
            MusicEvent::Note { beats, .. } | MusicEvent::Rest { beats } => *beats,
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, MusicEvent::Rest { .. })
    }
}

/// A finished solo: the ordered event list produced by one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solo {
    pub events: Vec<MusicEvent>,
}

impl Solo {
    /// Sum of all event durations, in beats.
    pub fn total_beats(&self) -> f64 {
        self.events.iter().map(MusicEvent::beats).sum()
    }

    /// Note/rest counts for the solo.
    pub fn stats(&self) -> SoloStats {
        let rests = self.events.iter().filter(|e| e.is_rest()).count();
        SoloStats {
            notes: self.events.len() - rests,
            rests,
            total_beats: self.total_beats(),
        }
    }

    /// Compact one-line rendering for logs: pitch with beats in parens,
    /// rests as dots.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for (i, event) in self.events.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            match event {
                MusicEvent::Note { pitch, beats } => {
                    let _ = write!(out, "{pitch}({beats})");
                }
                MusicEvent::Rest { beats } => {
                    let _ = write!(out, ".({beats})");
                }
            }
        }
        out
    }
}

/// Statistics about a solo's contents.
#[derive(Debug)]
pub struct SoloStats {
    pub notes: usize,
    pub rests: usize,
    pub total_beats: f64,
}

/// Generate a solo, priming the Markov cursor with the configured seed
/// predecessor pitch.
pub fn compose(
    model: &TransitionModel,
    config: &SoloConfig,
    rng: &mut SoloRng,
) -> Result<Solo, SoloError> {
    config.validate()?;
    let start = model.scale().index_of(&config.seed_predecessor)?;
    compose_from(model, config, start, rng)
}

/// Generate a solo starting the Markov cursor at an explicit pitch index.
///
/// Loop state is just the cursor and the elapsed-beats total; both are
/// private to this call, so one fitted model can serve many runs at once.
/// Any sampling error aborts the run — no partial solo is returned.
pub fn compose_from(
    model: &TransitionModel,
    config: &SoloConfig,
    start: usize,
    rng: &mut SoloRng,
) -> Result<Solo, SoloError> {
    config.validate()?;
    let rhythm = RhythmSampler::new(config.length_p)?;
    let gate = EventSelector::new(config.note_p)?;

    let mut events = Vec::new();
    let mut elapsed = 0.0;
    let mut cursor = start;

    while elapsed < config.total_beats {
        let beats = rhythm.next_duration(rng);
        if gate.is_note(rng) {
            let next = model.sample(cursor, rng)?;
            events.push(MusicEvent::Note {
                pitch: model.scale().label(next).to_string(),
                beats,
            });
            cursor = next;
        } else {
            // Silence: the cursor stays on the last sounded pitch.
            events.push(MusicEvent::Rest { beats });
        }
        elapsed += beats;
    }

    Ok(Solo { events })
}
