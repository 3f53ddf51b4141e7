// The pitch alphabet: the fixed ordered set of pitches a solo may use.
//
// The scale is the canonical index space for the transition matrix — row i
// and column i both mean "the i-th pitch of the scale". Order is fixed at
// construction and the labels are distinct; the scale is immutable after
// that.
//
// Labels use music21-style spelling: letter, optional accidental ('#' sharp,
// '-' flat), octave digit. "B-3" is B-flat below middle C (MIDI 58). The
// default scale is the 19-pitch E-flat-dorian-derived set used by the
// original "Take Five" solo.

use crate::error::SoloError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pitch-class names indexed 0-11 from C, using the spellings the default
/// scale expects (sharps for C/F/G, flats for E/B).
const PC_NAMES: [&str; 12] = [
    "C", "C#", "D", "E-", "E", "F", "F#", "G", "G#", "A", "B-", "B",
];

/// An ordered set of distinct pitch labels.
///
/// Serialized as the bare label list; the lookup table is rebuilt on
/// deserialization so saved models stay human-readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Scale {
    labels: Vec<String>,
    index: BTreeMap<String, usize>,
}

impl Scale {
    /// Build a scale from an ordered label list.
    ///
    /// Rejects an empty list and duplicate labels — both would corrupt the
    /// matrix index space.
    pub fn new<I, S>(labels: I) -> Result<Self, SoloError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(SoloError::Configuration("scale must not be empty".into()));
        }
        let mut index = BTreeMap::new();
        for (i, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return Err(SoloError::Configuration(format!(
                    "duplicate pitch '{label}' in scale"
                )));
            }
        }
        Ok(Scale { labels, index })
    }

    /// The scale of the original "Take Five" solo: mainly E-flat dorian,
    /// 19 pitches from F#3 to F#5.
    pub fn take_five() -> Self {
        Scale::new([
            "F#3", "G#3", "B-3", "C4", "C#4", "D4", "E-4", "F4", "F#4", "G#4",
            "A4", "B-4", "B4", "C5", "C#5", "D5", "E-5", "F5", "F#5",
        ])
        .expect("built-in scale is valid")
    }

    /// Number of pitches in the scale.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The label at a canonical index. Panics if out of range.
    pub fn label(&self, index: usize) -> &str {
        &self.labels[index]
    }

    /// The ordered label list.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Canonical index of a pitch label.
    ///
    /// An unknown label is a hard error: it means a melody used a pitch
    /// outside the configured scale.
    pub fn index_of(&self, label: &str) -> Result<usize, SoloError> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| SoloError::InvalidPitch(label.to_string()))
    }

    /// Membership test without the error path.
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }
}

impl TryFrom<Vec<String>> for Scale {
    type Error = SoloError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Scale::new(labels)
    }
}

impl From<Scale> for Vec<String> {
    fn from(scale: Scale) -> Self {
        scale.labels
    }
}

/// Convert a pitch label to its MIDI note number (C4 = 60).
///
/// Accepts letter + optional '#'/'-' accidental + octave, e.g. "C4", "F#3",
/// "E-5". Returns None for malformed labels or pitches outside 0-127.
pub fn label_to_midi(label: &str) -> Option<u8> {
    let mut chars = label.chars();
    let letter = chars.next()?;
    let base: i32 = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let rest: String = chars.collect();
    let (accidental, octave_str) = match rest.chars().next() {
        Some('#') => (1, &rest[1..]),
        Some('-') | Some('b') => (-1, &rest[1..]),
        _ => (0, rest.as_str()),
    };
    let octave: i32 = octave_str.parse().ok()?;
    let midi = (octave + 1) * 12 + base + accidental;
    u8::try_from(midi).ok().filter(|&m| m <= 127)
}

/// Convert a MIDI note number to a label, using the default spellings
/// (sharps for C/F/G, flats for E/B — matching the built-in scale).
pub fn midi_to_label(pitch: u8) -> String {
    let pc = (pitch % 12) as usize;
    let octave = pitch as i32 / 12 - 1;
    format!("{}{}", PC_NAMES[pc], octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_five_scale_shape() {
        let scale = Scale::take_five();
        assert_eq!(scale.len(), 19);
        assert_eq!(scale.label(0), "F#3");
        assert_eq!(scale.label(18), "F#5");
        // B-3 is the seed predecessor pitch; it sits at index 2.
        assert_eq!(scale.index_of("B-3").unwrap(), 2);
    }

    #[test]
    fn unknown_pitch_is_an_error() {
        let scale = Scale::take_five();
        let err = scale.index_of("G3").unwrap_err();
        assert!(matches!(err, SoloError::InvalidPitch(p) if p == "G3"));
    }

    #[test]
    fn duplicate_labels_rejected() {
        let err = Scale::new(["C4", "D4", "C4"]).unwrap_err();
        assert!(matches!(err, SoloError::Configuration(_)));
    }

    #[test]
    fn empty_scale_rejected() {
        let err = Scale::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, SoloError::Configuration(_)));
    }

    #[test]
    fn label_midi_conversion() {
        assert_eq!(label_to_midi("C4"), Some(60));
        assert_eq!(label_to_midi("B-3"), Some(58));
        assert_eq!(label_to_midi("F#3"), Some(54));
        assert_eq!(label_to_midi("E-5"), Some(75));
        assert_eq!(label_to_midi("H4"), None);
        assert_eq!(label_to_midi("C"), None);

        assert_eq!(midi_to_label(60), "C4");
        assert_eq!(midi_to_label(58), "B-3");
        assert_eq!(midi_to_label(75), "E-5");
    }

    #[test]
    fn whole_scale_roundtrips_through_midi() {
        let scale = Scale::take_five();
        for label in scale.labels() {
            let midi = label_to_midi(label).expect("scale label parses");
            assert_eq!(&midi_to_label(midi), label);
        }
    }

    #[test]
    fn serde_roundtrip_rebuilds_index() {
        let scale = Scale::take_five();
        let json = serde_json::to_string(&scale).unwrap();
        let restored: Scale = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, scale);
        assert_eq!(restored.index_of("A4").unwrap(), 10);
    }
}
