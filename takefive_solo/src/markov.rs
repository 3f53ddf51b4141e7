// First-order Markov transition model over the scale.
//
// Fitting walks the reference melody's sounded pitches (rests carry no
// pitch and never enter the statistics), counting how often pitch i is
// followed by pitch j, then normalizes each row into a probability
// distribution. The result is a row-stochastic matrix: row i answers "what
// pitch follows the i-th pitch of the scale?".
//
// A pitch that never appears as a predecessor leaves its row with zero
// mass. Sampling such a row is a hard `DegenerateDistribution` error —
// never a silent 0/0. Callers who want a fallback use `uniform` (or blend
// the two models themselves); `sample` does not invent probability mass.
//
// Models serialize to JSON so a fitted matrix can be inspected or reused
// without re-reading the reference melody.

use crate::error::SoloError;
use crate::scale::Scale;
use serde::{Deserialize, Serialize};
use std::path::Path;
use takefive_prng::SoloRng;

/// A fitted pitch-to-pitch transition model.
///
/// Read-only after fitting: one model may serve any number of concurrent
/// generation runs, each with its own `SoloRng`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionModel {
    scale: Scale,
    /// `rows[i][j]` = probability that pitch j follows pitch i.
    /// Each row sums to 1, or to 0 if pitch i was never a predecessor.
    rows: Vec<Vec<f64>>,
}

impl TransitionModel {
    /// Fit a model from an ordered sequence of sounded pitch labels.
    ///
    /// The predecessor cursor starts at `seed_predecessor` so the first
    /// melody note also contributes a transition. Any label outside the
    /// scale (including the seed) is an `InvalidPitch` error.
    pub fn fit<S: AsRef<str>>(
        scale: Scale,
        melody: &[S],
        seed_predecessor: &str,
    ) -> Result<Self, SoloError> {
        let n = scale.len();
        let mut counts = vec![vec![0u64; n]; n];

        let mut prev = scale.index_of(seed_predecessor)?;
        for label in melody {
            let curr = scale.index_of(label.as_ref())?;
            counts[prev][curr] += 1;
            prev = curr;
        }

        let rows = counts
            .into_iter()
            .map(|row| {
                let total: u64 = row.iter().sum();
                if total == 0 {
                    // Unseen predecessor: leave the row empty rather than
                    // divide by zero. Sampling it reports the degenerate row.
                    vec![0.0; n]
                } else {
                    row.into_iter().map(|c| c as f64 / total as f64).collect()
                }
            })
            .collect();

        Ok(TransitionModel { scale, rows })
    }

    /// A model with every row uniform over the scale.
    ///
    /// The no-data fallback: lets the composer improvise before any
    /// reference melody has been analyzed.
    pub fn uniform(scale: Scale) -> Self {
        let n = scale.len();
        let p = 1.0 / n as f64;
        TransitionModel {
            scale,
            rows: vec![vec![p; n]; n],
        }
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    /// The probability row for a predecessor pitch index.
    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }

    /// Draw the next pitch index from the categorical distribution in row
    /// `prev` — a weighted choice, ties broken only by probability mass.
    ///
    /// Fails with `DegenerateDistribution` if the row has no mass (the
    /// predecessor pitch was never observed during fitting).
    pub fn sample(&self, prev: usize, rng: &mut SoloRng) -> Result<usize, SoloError> {
        let row = &self.rows[prev];
        let total: f64 = row.iter().sum();
        if total <= 0.0 {
            return Err(SoloError::DegenerateDistribution(
                self.scale.label(prev).to_string(),
            ));
        }

        let target = rng.next_f64() * total;
        let mut cumulative = 0.0;
        let mut last_nonzero = None;
        for (i, &p) in row.iter().enumerate() {
            if p <= 0.0 {
                continue;
            }
            cumulative += p;
            last_nonzero = Some(i);
            if cumulative > target {
                return Ok(i);
            }
        }
        // Floating-point tail: the cumulative sum fell a hair short of the
        // target. Fall back to the last pitch with mass.
        last_nonzero.ok_or_else(|| {
            SoloError::DegenerateDistribution(self.scale.label(prev).to_string())
        })
    }

    /// Save the model as JSON.
    pub fn save(&self, path: &Path) -> Result<(), SoloError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a model previously written by `save`.
    pub fn load(path: &Path) -> Result<Self, SoloError> {
        let data = std::fs::read_to_string(path)?;
        let model: TransitionModel = serde_json::from_str(&data)?;
        Ok(model)
    }
}
