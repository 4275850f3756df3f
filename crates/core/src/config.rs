//! Run configuration: output naming, seeding and degenerate-group policy.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do with a group that has only one member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Report the group and keep going; no files are written for it.
    #[default]
    Skip,
    /// Fail the run before any output is written.
    Abort,
}

impl DegeneratePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            DegeneratePolicy::Skip => "skip",
            DegeneratePolicy::Abort => "abort",
        }
    }
}

/// Serializable configuration for one assignment run.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Folder created (fresh) inside the output directory.
    pub root_name: String,
    /// Subfolder holding the name pairs.
    pub names_dir: String,
    /// Subfolder holding the address pairs.
    pub addresses_dir: String,
    /// File name suffix for name pairs: `<group> <suffix>.txt`.
    pub names_suffix: String,
    /// File name suffix for address pairs: `<group> <suffix>.txt`.
    pub addresses_suffix: String,
    /// Optional RNG seed; when absent the generator is seeded from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub on_degenerate: DegeneratePolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            root_name: "buddyweek_output".to_string(),
            names_dir: "names".to_string(),
            addresses_dir: "addresses".to_string(),
            names_suffix: "assigned_names".to_string(),
            addresses_suffix: "assigned_addresses".to_string(),
            seed: None,
            on_degenerate: DegeneratePolicy::Skip,
        }
    }
}

impl RunConfig {
    /// Reject folder names and suffixes that would place output outside a
    /// single dedicated folder.
    ///
    /// `root_name`, `names_dir` and `addresses_dir` must each be exactly one
    /// normal path component (no `""`, `.`, `..`, separators or absolute
    /// paths); the file suffixes must be non-empty and free of separators.
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("root_name", &self.root_name),
            ("names_dir", &self.names_dir),
            ("addresses_dir", &self.addresses_dir),
        ] {
            if !is_single_folder_name(value) {
                return Err(ConfigError::InvalidName { field, value: value.clone() });
            }
        }
        if self.names_dir == self.addresses_dir {
            return Err(ConfigError::InvalidName {
                field: "addresses_dir",
                value: self.addresses_dir.clone(),
            });
        }
        for (field, value) in
            [("names_suffix", &self.names_suffix), ("addresses_suffix", &self.addresses_suffix)]
        {
            if value.trim().is_empty() || value.contains(['/', '\\']) {
                return Err(ConfigError::InvalidName { field, value: value.clone() });
            }
        }
        Ok(())
    }
}

fn is_single_folder_name(value: &str) -> bool {
    if value.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(value).components();
    matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}

/// Error type for loading a run configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A folder name or suffix would escape the output folder or is empty.
    #[error("Invalid {field} '{value}': must be a single, non-empty folder or file name part")]
    InvalidName { field: &'static str, value: String },

    #[error("Unsupported config format '{extension}' (expected yaml, yml or json)")]
    UnsupportedFormat { extension: String },
}

/// Convenience result type for config loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load a [`RunConfig`] from a `.yaml`/`.yml` or `.json` file.
pub fn load_run_config(path: &Path) -> ConfigResult<RunConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
    if !matches!(ext.as_str(), "yaml" | "yml" | "json") {
        return Err(ConfigError::UnsupportedFormat { extension: ext });
    }

    let body = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

    let config: RunConfig =
        if ext == "json" { serde_json::from_str(&body)? } else { serde_yaml::from_str(&body)? };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: RunConfig = serde_yaml::from_str("seed: 7\non_degenerate: abort\n").unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.on_degenerate, DegeneratePolicy::Abort);
        assert_eq!(config.names_dir, "names");
        assert_eq!(config.root_name, "buddyweek_output");
    }

    #[test]
    fn default_config_is_valid() {
        RunConfig::default().validate().unwrap();
    }

    #[test]
    fn folder_names_must_stay_inside_output_dir() {
        for bad in ["", ".", "..", "a/b", "../up", "/abs", "a\\b"] {
            let config = RunConfig { root_name: bad.to_string(), ..RunConfig::default() };
            let err = config.validate().unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidName { field: "root_name", .. }),
                "'{bad}' accepted: {err}"
            );
        }
        let shared =
            RunConfig { addresses_dir: "names".to_string(), ..RunConfig::default() };
        assert!(shared.validate().is_err());
        let suffix = RunConfig { names_suffix: "x/y".to_string(), ..RunConfig::default() };
        assert!(suffix.validate().is_err());
    }
}
