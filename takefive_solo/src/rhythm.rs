// Note-length and note-vs-rest sampling, independent of pitch.
//
// Length comes from a geometric draw (number of Bernoulli trials up to and
// including the first success, support starting at 1) mapped through a
// fixed duration table. The tail of the distribution saturates: draws of 5
// and beyond collapse to the eighth-note default, which bounds note length
// no matter how far the geometric draw runs.
//
// The note-vs-rest gate is one Bernoulli trial per step. In the original
// program its parameter was called REST_P even though a high value means
// *more* notes; the behavior is kept, the name is not — here it is plainly
// the note probability.

use crate::error::SoloError;
use takefive_prng::SoloRng;

/// Longest duration the mapping can produce, in beats (a whole note).
pub const MAX_DURATION_BEATS: f64 = 4.0;

/// Map a geometric draw to a duration in beats.
///
/// 1 → eighth (0.5), 2 → quarter (1), 3 → half (2), 4 → whole (4); the
/// tail (≥ 5) saturates back to the eighth note.
pub fn duration_for_draw(draw: u32) -> f64 {
    match draw {
        2 => 1.0,
        3 => 2.0,
        4 => 4.0,
        _ => 0.5,
    }
}

/// Draws a note/rest duration from a geometric distribution.
#[derive(Debug, Clone, Copy)]
pub struct RhythmSampler {
    length_p: f64,
}

impl RhythmSampler {
    /// `length_p` is the geometric success probability. Must lie in
    /// (0, 1] — at zero the trial sequence would never succeed.
    pub fn new(length_p: f64) -> Result<Self, SoloError> {
        if !(length_p > 0.0 && length_p <= 1.0) {
            return Err(SoloError::Configuration(format!(
                "length_p must be in (0, 1], got {length_p}"
            )));
        }
        Ok(RhythmSampler { length_p })
    }

    /// One geometric trial sequence: count draws until the first success.
    fn draw(&self, rng: &mut SoloRng) -> u32 {
        let mut k = 1;
        while !rng.random_bool(self.length_p) {
            k += 1;
        }
        k
    }

    /// The next duration, in beats.
    pub fn next_duration(&self, rng: &mut SoloRng) -> f64 {
        duration_for_draw(self.draw(rng))
    }
}

/// Decides, per step, whether the next event is a note or a rest.
#[derive(Debug, Clone, Copy)]
pub struct EventSelector {
    note_p: f64,
}

impl EventSelector {
    /// `note_p` is the probability that a step sounds a note rather than
    /// resting. Must lie in [0, 1].
    pub fn new(note_p: f64) -> Result<Self, SoloError> {
        if !(0.0..=1.0).contains(&note_p) {
            return Err(SoloError::Configuration(format!(
                "note_p must be in [0, 1], got {note_p}"
            )));
        }
        Ok(EventSelector { note_p })
    }

    /// One Bernoulli trial: true means play a note, false means rest.
    pub fn is_note(&self, rng: &mut SoloRng) -> bool {
        rng.random_bool(self.note_p)
    }
}
