// Error taxonomy for training and generation.
//
// Every failure here stems from invalid input or invalid model state, never
// from a transient condition, so no retry paths exist: errors halt the
// current training or generation call and surface to the caller.

use thiserror::Error;

/// All errors the solo generator can produce.
#[derive(Debug, Error)]
pub enum SoloError {
    /// A pitch label was encountered that is not part of the configured
    /// scale. Raised during training or lookup, never silently ignored —
    /// it means the reference melody stepped outside the alphabet.
    #[error("pitch '{0}' is not in the configured scale")]
    InvalidPitch(String),

    /// A transition-matrix row has no probability mass to sample from
    /// (the pitch was never observed as a predecessor during training).
    #[error("no transition probability mass for pitch '{0}'")]
    DegenerateDistribution(String),

    /// An out-of-range parameter was detected at setup time, before any
    /// sampling occurred.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A MIDI file could not be parsed or written.
    #[error("MIDI file: {0}")]
    Midi(#[from] midly::Error),

    /// A saved model could not be encoded or decoded.
    #[error("model file: {0}")]
    Model(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
