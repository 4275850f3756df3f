use anyhow::{anyhow, Context, Result};
use buddyweek_core::assign::check_single_cycle;
use buddyweek_core::output::{read_name_files, read_pair_file, OutputLayout};
use serde::Serialize;

use crate::canonicalize_or_current;
use crate::commands::load_config;

#[derive(Debug, Serialize)]
pub struct GroupVerification {
    pub group: String,
    pub members: usize,
    pub problems: Vec<String>,
    /// Observations that do not make the group invalid.
    pub notes: Vec<String>,
}

impl GroupVerification {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Check previously written output: every group's address file must describe
/// one cycle through all members, and its names file must have one line per
/// member.
///
/// Addresses are the member identity here; display names are allowed to repeat
/// within a group.
///
/// Fails if no output exists or any group has a problem.
pub fn verify_command(
    output: &str,
    config: Option<&str>,
    json: bool,
) -> Result<Vec<GroupVerification>> {
    let config = load_config(config)?;
    config.validate().context("Invalid run config")?;
    let output_dir = canonicalize_or_current(output)?;
    let layout = OutputLayout::new(&output_dir, &config);

    if !layout.names_dir.is_dir() {
        return Err(anyhow!("No assignment output found at {}", layout.root.display()));
    }

    let written = read_name_files(&layout)
        .with_context(|| format!("Failed to read name files in {}", layout.names_dir.display()))?;

    let mut results = Vec::with_capacity(written.len());
    for group in written {
        let mut problems = Vec::new();
        let mut notes = Vec::new();

        // Display names may repeat inside a group; addresses identify members.
        let mut names: Vec<&str> = group.pairs.iter().map(|(giver, _)| giver.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        if names.len() != group.pairs.len() {
            notes.push("names: some members share a display name".to_string());
        }

        let addresses_path = layout.addresses_file(&group.group);
        if addresses_path.is_file() {
            let addresses = read_pair_file(&addresses_path).with_context(|| {
                format!("Failed to read address file {}", addresses_path.display())
            })?;
            if addresses.len() != group.pairs.len() {
                problems.push(format!(
                    "addresses: {} line(s) but names has {}",
                    addresses.len(),
                    group.pairs.len()
                ));
            }
            if let Err(violation) = check_single_cycle(&addresses) {
                problems.push(format!("addresses: {violation}"));
            }
        } else {
            problems.push(format!("addresses: missing file {}", addresses_path.display()));
        }

        results.push(GroupVerification {
            group: group.group,
            members: group.pairs.len(),
            problems,
            notes,
        });
    }

    let failed = results.iter().filter(|r| !r.is_ok()).count();

    if json {
        let serialized = serde_json::to_string_pretty(&results)
            .context("Failed to serialize verification results")?;
        println!("{}", serialized);
    } else {
        println!("Verified {} group(s) in {}:", results.len(), layout.root.display());
        for result in &results {
            if result.is_ok() {
                println!("  - {} ({} members): OK", result.group, result.members);
                for note in &result.notes {
                    println!("      note: {note}");
                }
            } else {
                println!("  - {} ({} members): INVALID", result.group, result.members);
                for problem in &result.problems {
                    println!("      {problem}");
                }
            }
        }
    }

    if failed > 0 {
        return Err(anyhow!("{} group(s) failed verification", failed));
    }
    Ok(results)
}
