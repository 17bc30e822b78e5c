//! Merges a recording session's per-port cassettes into one replayable file.
//!
//! Usage: `cassette_merge <session_dir> <output.yaml>`

use std::path::{Path, PathBuf};
use std::{env, fs, process};

use chrono::Utc;
use surfboard::cassette::format::{Cassette, Interaction};

/// Per-port files written by a recording session, in merge order.
const PORTS: [&str; 4] = ["shell", "fs", "issues", "clock"];

fn merge_session(session_dir: &Path) -> Result<Cassette, String> {
    let mut interactions: Vec<Interaction> = Vec::new();
    let mut found = 0;

    for port in PORTS {
        let path = session_dir.join(format!("{port}.cassette.yaml"));
        if !path.exists() {
            continue;
        }
        found += 1;
        interactions.extend(Cassette::load(&path)?.interactions);
    }
    if found == 0 {
        return Err(format!("no port cassettes found in {}", session_dir.display()));
    }

    // Replay keeps one queue per (port, method), so cross-port order is
    // irrelevant; only the numbering needs to be contiguous.
    for (seq, interaction) in (0u64..).zip(interactions.iter_mut()) {
        interaction.seq = seq;
    }

    let name = session_dir
        .file_name()
        .map_or_else(|| "session".to_string(), |n| n.to_string_lossy().into_owned());
    Ok(Cassette { name, recorded_at: Utc::now(), interactions })
}

fn run(session_dir: &str, output: &str) -> Result<(), String> {
    let cassette = merge_session(Path::new(session_dir))?;
    let output = PathBuf::from(output);
    let yaml = serde_yaml::to_string(&cassette)
        .map_err(|e| format!("Failed to serialize merged cassette: {e}"))?;
    fs::write(&output, yaml).map_err(|e| format!("Failed to write {}: {e}", output.display()))?;
    println!("Wrote {} ({} interactions)", output.display(), cassette.interactions.len());
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: cassette_merge <session_dir> <output.yaml>");
        process::exit(1);
    }

    if let Err(e) = run(&args[1], &args[2]) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
