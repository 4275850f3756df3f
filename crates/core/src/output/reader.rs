use std::fs;
use std::path::{Path, PathBuf};

use super::{io_error, OutputError, OutputLayout, OutputResult};
use crate::model::parse_pair_line;

/// Giver/receiver names read back from one group's names file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenGroup {
    pub group: String,
    pub path: PathBuf,
    pub pairs: Vec<(String, String)>,
}

/// Read every names file under `layout.names_dir`, sorted by group.
pub fn read_name_files(layout: &OutputLayout) -> OutputResult<Vec<WrittenGroup>> {
    let mut groups = Vec::new();
    let entries = fs::read_dir(&layout.names_dir).map_err(io_error(&layout.names_dir))?;
    for entry in entries {
        let entry = entry.map_err(io_error(&layout.names_dir))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().to_string();
        let Some(group) = layout.group_from_names_file(&file_name) else {
            continue;
        };
        let pairs = read_pair_file(&path)?;
        groups.push(WrittenGroup { group, path, pairs });
    }
    groups.sort_by(|a, b| a.group.cmp(&b.group));
    Ok(groups)
}

/// Parse a pair file; blank lines are ignored.
pub fn read_pair_file(path: &Path) -> OutputResult<Vec<(String, String)>> {
    let body = fs::read_to_string(path).map_err(io_error(path))?;
    let mut pairs = Vec::new();
    for (idx, line) in body.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (giver, receiver) = parse_pair_line(line).ok_or_else(|| OutputError::MalformedLine {
            path: path.to_path_buf(),
            line: idx + 1,
            content: line.to_string(),
        })?;
        pairs.push((giver.to_string(), receiver.to_string()));
    }
    Ok(pairs)
}
