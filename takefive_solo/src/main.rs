// Take Another Five — CLI entry point.
//
// Fits a transition model from a reference melody (or falls back to the
// uniform model) and improvises a solo to a MIDI file.
// The pipeline: fit model → compose solo → optional model dump → MIDI output.
//
// Usage:
//   cargo run -p takefive_solo -- [output.mid] [--train MELODY.mid]
//     [--beats N] [--length-p P] [--note-p P] [--seed N] [--tempo BPM]
//     [--model MODEL.json]

use std::path::Path;
use takefive_prng::SoloRng;
use takefive_solo::compose::compose;
use takefive_solo::config::SoloConfig;
use takefive_solo::markov::TransitionModel;
use takefive_solo::midi::{read_melody, write_solo};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse arguments
    let output_path = args
        .get(1)
        .filter(|s| !s.starts_with("--"))
        .map(|s| s.as_str())
        .unwrap_or("solo.mid");
    let train_path: Option<String> = parse_flag(&args, "--train");
    let model_path: Option<String> = parse_flag(&args, "--model");
    let seed: Option<u64> = parse_flag(&args, "--seed");
    let tempo: u16 = parse_flag(&args, "--tempo").unwrap_or(120);

    let mut config = SoloConfig::default();
    if let Some(beats) = parse_flag(&args, "--beats") {
        config.total_beats = beats;
    }
    if let Some(p) = parse_flag(&args, "--length-p") {
        config.length_p = p;
    }
    if let Some(p) = parse_flag(&args, "--note-p") {
        config.note_p = p;
    }

    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    println!("=== Take Another Five ===");
    println!("Output: {output_path}");
    println!("Beats: {}", config.total_beats);
    println!("Length p: {}  Note p: {}", config.length_p, config.note_p);
    println!("Tempo: {tempo} BPM");
    if let Some(s) = seed {
        println!("Seed: {s}");
    }
    println!();

    // Initialize RNG
    let seed = seed.unwrap_or_else(os_seed);
    let mut rng = SoloRng::new(seed);

    // Fit or fall back
    println!("[1/3] Fitting transition model...");
    let model = match &train_path {
        Some(path) => {
            let melody = match read_melody(Path::new(path)) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("  Error reading {path}: {e}");
                    std::process::exit(1);
                }
            };
            println!("  {} sounded notes in {path}.", melody.len());
            match TransitionModel::fit(
                config.scale.clone(),
                &melody,
                &config.seed_predecessor,
            ) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("  Error fitting model: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("  No reference melody, using the uniform model.");
            TransitionModel::uniform(config.scale.clone())
        }
    };
    if let Some(path) = &model_path {
        match model.save(Path::new(path)) {
            Ok(()) => println!("  Model written to {path}."),
            Err(e) => {
                eprintln!("  Error writing model: {e}");
                std::process::exit(1);
            }
        }
    }

    // Compose
    println!("[2/3] Composing...");
    let solo = match compose(&model, &config, &mut rng) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("  Error: {e}");
            std::process::exit(1);
        }
    };
    let stats = solo.stats();
    println!(
        "  {} notes, {} rests, {:.1} beats total.",
        stats.notes, stats.rests, stats.total_beats
    );

    // Write MIDI
    println!("[3/3] Writing MIDI to {output_path}...");
    match write_solo(&solo, tempo, Path::new(output_path)) {
        Ok(()) => {
            let duration_seconds = stats.total_beats / (tempo as f64 / 60.0);
            println!("  Done! Duration: {duration_seconds:.0}s");
        }
        Err(e) => {
            eprintln!("  Error writing MIDI: {e}");
            std::process::exit(1);
        }
    }

    println!();
    println!("Play with: timidity {output_path} (or any MIDI player)");
}

/// A seed from the wall clock, for runs where reproducibility doesn't matter.
fn os_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
