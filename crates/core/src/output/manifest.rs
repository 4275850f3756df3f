use std::fs;
use std::io;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{io_error, OutputResult};
use crate::config::{DegeneratePolicy, RunConfig};

/// Outcome recorded for one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    Assigned,
    Degenerate,
}

impl GroupStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GroupStatus::Assigned => "assigned",
            GroupStatus::Degenerate => "degenerate",
        }
    }
}

/// Manifest entry for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEntry {
    pub group: String,
    pub members: usize,
    pub status: GroupStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `run.json`: what one run read and what it wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunManifest {
    pub tool_version: String,
    pub created_at: String,
    pub input_path: String,
    pub input_sha256: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub on_degenerate: DegeneratePolicy,
    pub groups: Vec<GroupEntry>,
}

impl RunManifest {
    /// Start a manifest for a run over `input_path`, stamped with the current time.
    pub fn new(input_path: &Path, input_sha256: impl Into<String>, config: &RunConfig) -> Self {
        Self {
            tool_version: crate::version().to_string(),
            created_at: Utc::now().to_rfc3339(),
            input_path: input_path.display().to_string(),
            input_sha256: input_sha256.into(),
            seed: config.seed,
            on_degenerate: config.on_degenerate,
            groups: Vec::new(),
        }
    }

    pub fn assigned_groups(&self) -> impl Iterator<Item = &GroupEntry> {
        self.groups.iter().filter(|g| g.status == GroupStatus::Assigned)
    }

    pub fn degenerate_groups(&self) -> impl Iterator<Item = &GroupEntry> {
        self.groups.iter().filter(|g| g.status == GroupStatus::Degenerate)
    }
}

/// Hex-encoded SHA-256 digest of the file at `path`.
pub fn sha256_file(path: &Path) -> OutputResult<String> {
    let mut file = fs::File::open(path).map_err(io_error(path))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(io_error(path))?;
    Ok(format!("{:x}", hasher.finalize()))
}
