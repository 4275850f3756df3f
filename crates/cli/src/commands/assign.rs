use anyhow::{anyhow, Context, Result};
use buddyweek_core::assign::assign_groups;
use buddyweek_core::config::DegeneratePolicy;
use buddyweek_core::output::{
    prepare_output_root, sha256_file, write_assignment, write_manifest, GroupEntry, GroupStatus,
    OutputLayout, RunManifest,
};
use tracing::info;

use crate::commands::{load_config, load_groups};
use crate::{build_rng, canonicalize_or_current};

/// Flags of `assign` beyond the two required paths.
#[derive(Debug, Clone, Default)]
pub struct AssignOptions {
    /// Optional YAML/JSON run config.
    pub config: Option<String>,
    /// Overrides the config seed.
    pub seed: Option<u64>,
    /// Overrides the config degenerate-group policy.
    pub on_degenerate: Option<DegeneratePolicy>,
    /// Emit the run manifest as JSON instead of a human summary.
    pub json: bool,
}

/// Draw assignments for every group of `input` and write them under `output`.
///
/// This will:
/// - Load and group the input table.
/// - Draw one random cycle per group from a single random stream.
/// - Recreate `<output>/<root_name>` and write the name/address pair files.
/// - Write `run.json` describing the run.
///
/// Nothing under `output` is touched if the table cannot be loaded, two group
/// keys map to the same file name, or the `abort` policy rejects a
/// single-member group.
pub fn assign_command(input: &str, output: &str, options: &AssignOptions) -> Result<RunManifest> {
    let mut config = load_config(options.config.as_deref())?;
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    if let Some(policy) = options.on_degenerate {
        config.on_degenerate = policy;
    }
    config.validate().context("Invalid run config")?;

    let (input_path, groups) = load_groups(input)?;
    let input_hash = sha256_file(&input_path)
        .with_context(|| format!("Failed to hash input table {}", input_path.display()))?;

    let mut rng = build_rng(config.seed);
    let report = assign_groups(&groups, &mut rng).context("Failed to assign groups")?;

    if config.on_degenerate == DegeneratePolicy::Abort && report.has_failures() {
        let names: Vec<&str> = report.failures.iter().map(|f| f.group.as_str()).collect();
        return Err(anyhow!(
            "Aborting: {} group(s) have a single member and cannot be assigned: {}",
            names.len(),
            names.join(", ")
        ));
    }

    let output_dir = canonicalize_or_current(output)?;
    let layout = OutputLayout::new(&output_dir, &config);
    let collisions =
        layout.file_name_collisions(report.assigned.iter().map(|a| a.group.as_str()));
    if !collisions.is_empty() {
        let described: Vec<String> =
            collisions.iter().map(|(a, b)| format!("'{a}' and '{b}'")).collect();
        return Err(anyhow!(
            "Groups would share output files: {}. Rename one of each pair in the input table",
            described.join(", ")
        ));
    }
    prepare_output_root(&layout).with_context(|| {
        format!("Failed to prepare output directory {}", layout.root.display())
    })?;

    let mut manifest = RunManifest::new(&input_path, input_hash, &config);
    for assignment in &report.assigned {
        let files = write_assignment(&layout, assignment).with_context(|| {
            format!("Failed to write assignment files for group '{}'", assignment.group)
        })?;
        manifest.groups.push(GroupEntry {
            group: assignment.group.clone(),
            members: assignment.len(),
            status: GroupStatus::Assigned,
            names_file: Some(files.names.display().to_string()),
            addresses_file: Some(files.addresses.display().to_string()),
            error: None,
        });
    }
    for failure in &report.failures {
        manifest.groups.push(GroupEntry {
            group: failure.group.clone(),
            members: failure.members.len(),
            status: GroupStatus::Degenerate,
            names_file: None,
            addresses_file: None,
            error: Some(failure.error.to_string()),
        });
    }
    manifest.groups.sort_by(|a, b| a.group.cmp(&b.group));

    write_manifest(&layout, &manifest).with_context(|| {
        format!("Failed to write run manifest at {}", layout.manifest_path.display())
    })?;
    info!(
        groups = report.assigned.len(),
        members = report.assigned_members(),
        skipped = report.failures.len(),
        "run complete"
    );

    if options.json {
        let serialized =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize run manifest")?;
        println!("{}", serialized);
        return Ok(manifest);
    }

    println!("Assigned {} group(s), {} member(s):", report.assigned.len(), report.assigned_members());
    for entry in manifest.assigned_groups() {
        println!("  - {} ({} members)", entry.group, entry.members);
    }
    let skipped: Vec<&GroupEntry> = manifest.degenerate_groups().collect();
    if !skipped.is_empty() {
        println!("Skipped {} group(s):", skipped.len());
        for entry in skipped {
            println!("  - {}: {}", entry.group, entry.error.as_deref().unwrap_or("-"));
        }
    }
    println!("Names: {}", layout.names_dir.display());
    println!("Addresses: {}", layout.addresses_dir.display());
    println!("Manifest: {}", layout.manifest_path.display());

    Ok(manifest)
}
