use std::path::Path;

use anyhow::{anyhow, Context, Result};
use buddyweek_core::config::{load_run_config, DegeneratePolicy, RunConfig};
use buddyweek_core::grouping::{group_records, Groups};
use buddyweek_core::loader::load_records;

use crate::resolve_input_path;

/// Parse the `--on-degenerate` value.
pub fn validate_degenerate_policy(policy: &str) -> Result<DegeneratePolicy> {
    match policy {
        "skip" => Ok(DegeneratePolicy::Skip),
        "abort" => Ok(DegeneratePolicy::Abort),
        other => Err(anyhow!("Invalid policy '{}'. Allowed: skip, abort", other)),
    }
}

/// Load the run config from `path`, or fall back to defaults.
pub fn load_config(path: Option<&str>) -> Result<RunConfig> {
    match path {
        Some(p) => load_run_config(Path::new(p))
            .with_context(|| format!("Failed to load run config from {p}")),
        None => Ok(RunConfig::default()),
    }
}

/// Resolve, read and group the input table.
///
/// Returns the resolved path alongside the groups so callers can report it.
pub fn load_groups(input: &str) -> Result<(std::path::PathBuf, Groups)> {
    let input_path = resolve_input_path(input)?;
    let records = load_records(&input_path)
        .with_context(|| format!("Failed to load input table {}", input_path.display()))?;
    if records.is_empty() {
        return Err(anyhow!("Input table has no rows: {}", input_path.display()));
    }
    Ok((input_path, group_records(records)))
}
