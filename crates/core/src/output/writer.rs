use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{io_error, OutputError, OutputLayout, OutputResult, RunManifest};
use crate::model::Assignment;

/// Files written for one assigned group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFiles {
    pub names: PathBuf,
    pub addresses: PathBuf,
}

/// Remove any previous output root and recreate it with both subfolders.
///
/// Only `layout.root` is removed; the enclosing output directory is left alone.
/// A root that is not a direct child of `layout.output_dir` is refused.
pub fn prepare_output_root(layout: &OutputLayout) -> OutputResult<()> {
    if !layout.root_is_contained() {
        return Err(OutputError::UnsafeRoot { root: layout.root.clone() });
    }
    if layout.root.exists() {
        info!(root = %layout.root.display(), "removing previous output");
        fs::remove_dir_all(&layout.root).map_err(io_error(&layout.root))?;
    }
    fs::create_dir_all(&layout.root).map_err(io_error(&layout.root))?;
    fs::create_dir_all(&layout.names_dir).map_err(io_error(&layout.names_dir))?;
    fs::create_dir_all(&layout.addresses_dir).map_err(io_error(&layout.addresses_dir))?;
    Ok(())
}

/// Write the name and address pair files for one group, in cycle order.
pub fn write_assignment(layout: &OutputLayout, assignment: &Assignment) -> OutputResult<GroupFiles> {
    let files = GroupFiles {
        names: layout.names_file(&assignment.group),
        addresses: layout.addresses_file(&assignment.group),
    };
    write_lines(&files.names, &assignment.name_lines())?;
    write_lines(&files.addresses, &assignment.address_lines())?;
    Ok(files)
}

/// Write `lines` to `path`, each terminated by `\n`.
pub fn write_lines(path: &Path, lines: &[String]) -> OutputResult<()> {
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line);
        contents.push('\n');
    }
    fs::write(path, contents).map_err(io_error(path))
}

/// Serialize the manifest to `layout.manifest_path` as pretty JSON.
pub fn write_manifest(layout: &OutputLayout, manifest: &RunManifest) -> OutputResult<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(&layout.manifest_path, json).map_err(io_error(&layout.manifest_path))
}
