use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod commands;
pub mod logging;

/// Absolute form of a user-supplied path.
///
/// Existing paths are canonicalized; `.` and paths that do not exist yet are
/// taken relative to the current working directory.
pub fn canonicalize_or_current(path: &str) -> Result<PathBuf> {
    let cwd = || env::current_dir().context("Failed to get current directory");
    let path = Path::new(path);
    if path == Path::new(".") {
        return cwd();
    }
    path.canonicalize().or_else(|_| Ok(cwd()?.join(path)))
}

/// Resolve the input table path.
///
/// A missing `.csv` extension is appended, so `--input klassen` reads
/// `klassen.csv`. The resolved file must exist.
pub fn resolve_input_path(input: &str) -> Result<PathBuf> {
    let with_ext = if input.to_ascii_lowercase().ends_with(".csv") {
        input.to_string()
    } else {
        format!("{input}.csv")
    };
    let path = canonicalize_or_current(&with_ext)?;
    if !path.is_file() {
        return Err(anyhow!("Input file does not exist: {}", path.display()));
    }
    Ok(path)
}

/// Random source for a run: seeded when `seed` is given, OS entropy otherwise.
pub fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
