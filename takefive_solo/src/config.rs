// Generation parameters.
//
// The original program kept these as module-level globals; here they are an
// explicit value passed into fitting and composition, so tests stay
// isolated and several generation runs can share one process. `validate`
// runs before any sampling and is the single place out-of-range parameters
// are caught.

use crate::error::SoloError;
use crate::scale::Scale;
use serde::{Deserialize, Serialize};

/// Everything a generation run needs besides the fitted model and the RNG.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoloConfig {
    /// Total length budget for the solo, notes and rests included, in beats.
    pub total_beats: f64,
    /// Geometric success probability for note lengths.
    pub length_p: f64,
    /// Probability that a step plays a note rather than a rest. High means
    /// busy; low leaves room. (The original called this REST_P despite the
    /// meaning being inverted.)
    pub note_p: f64,
    /// The pitch alphabet.
    pub scale: Scale,
    /// Pitch that primes the Markov cursor, for both fitting and the first
    /// sampled note.
    pub seed_predecessor: String,
}

impl Default for SoloConfig {
    fn default() -> Self {
        SoloConfig {
            total_beats: 240.0,
            length_p: 0.5,
            note_p: 0.9,
            scale: Scale::take_five(),
            seed_predecessor: "B-3".to_string(),
        }
    }
}

impl SoloConfig {
    /// Check every parameter before any sampling occurs.
    pub fn validate(&self) -> Result<(), SoloError> {
        if !(self.total_beats > 0.0 && self.total_beats.is_finite()) {
            return Err(SoloError::Configuration(format!(
                "total_beats must be positive and finite, got {}",
                self.total_beats
            )));
        }
        if !(self.length_p > 0.0 && self.length_p <= 1.0) {
            return Err(SoloError::Configuration(format!(
                "length_p must be in (0, 1], got {}",
                self.length_p
            )));
        }
        if !(0.0..=1.0).contains(&self.note_p) {
            return Err(SoloError::Configuration(format!(
                "note_p must be in [0, 1], got {}",
                self.note_p
            )));
        }
        if self.scale.is_empty() {
            return Err(SoloError::Configuration("scale must not be empty".into()));
        }
        if !self.scale.contains(&self.seed_predecessor) {
            return Err(SoloError::InvalidPitch(self.seed_predecessor.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        SoloConfig::default().validate().unwrap();
    }

    #[test]
    fn default_matches_original_constants() {
        let config = SoloConfig::default();
        assert_eq!(config.total_beats, 240.0);
        assert_eq!(config.length_p, 0.5);
        assert_eq!(config.note_p, 0.9);
        assert_eq!(config.scale.len(), 19);
        assert_eq!(config.seed_predecessor, "B-3");
    }

    #[test]
    fn rejects_bad_total_beats() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = SoloConfig {
                total_beats: bad,
                ..SoloConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(SoloError::Configuration(_))
            ));
        }
    }

    #[test]
    fn rejects_out_of_range_probabilities() {
        let config = SoloConfig {
            length_p: 0.0,
            ..SoloConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SoloConfig {
            note_p: 1.5,
            ..SoloConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_seed_outside_scale() {
        let config = SoloConfig {
            seed_predecessor: "G3".to_string(),
            ..SoloConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SoloError::InvalidPitch(p)) if p == "G3"
        ));
    }
}
