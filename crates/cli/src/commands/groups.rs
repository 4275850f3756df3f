use anyhow::{Context, Result};
use buddyweek_core::grouping::member_count;
use buddyweek_core::model::Record;
use serde::Serialize;

use crate::commands::load_groups;

#[derive(Debug, Serialize)]
pub struct GroupPreview {
    pub group: String,
    pub members: Vec<Record>,
    /// A single member cannot be assigned to anyone.
    pub assignable: bool,
}

/// Show how the input table partitions into groups, without drawing anything.
pub fn groups_command(input: &str, json: bool) -> Result<Vec<GroupPreview>> {
    let (input_path, groups) = load_groups(input)?;
    let total = member_count(&groups);

    let previews: Vec<GroupPreview> = groups
        .into_iter()
        .map(|(group, members)| GroupPreview { assignable: members.len() > 1, group, members })
        .collect();

    if json {
        let serialized =
            serde_json::to_string_pretty(&previews).context("Failed to serialize groups to JSON")?;
        println!("{}", serialized);
        return Ok(previews);
    }

    println!("Input: {}", input_path.display());
    println!("Groups ({}), members: {}", previews.len(), total);
    for preview in &previews {
        let note = if preview.assignable { "" } else { " [single member: cannot be assigned]" };
        println!("\n{} ({}){}:", preview.group, preview.members.len(), note);
        for member in &preview.members {
            println!("  - {} <{}>", member.name, member.address);
        }
    }

    Ok(previews)
}
