// Take Another Five — Markov jazz solo generator.
//
// Learns a first-order pitch-transition model from a reference melody and
// improvises a new solo over a fixed scale: pitch follows the fitted Markov
// chain, note length follows a geometric draw mapped to standard durations,
// and a Bernoulli gate decides note versus rest at every step. Jazz is about
// the notes you *don't* play, so the gate matters.
//
// Architecture:
// - scale.rs: The pitch alphabet (ordered scale labels) + label/MIDI mapping
// - markov.rs: Row-stochastic transition matrix — fitting, sampling, JSON I/O
// - rhythm.rs: Geometric note-length sampler and the note-vs-rest gate
// - compose.rs: MusicEvent/Solo types and the generation loop
// - config.rs: Generation parameters with setup-time validation
// - error.rs: The crate-wide error taxonomy
// - midi.rs: MIDI adapter — reads training melodies, writes finished solos
//
// The generator is deterministic given a seed, supporting reproducible output.

pub mod compose;
pub mod config;
pub mod error;
pub mod markov;
pub mod midi;
pub mod rhythm;
pub mod scale;
