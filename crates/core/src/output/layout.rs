use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::RunConfig;

/// Logical layout of a run's output on disk.
///
/// This is derived from the chosen output directory and run configuration. It
/// does *not* perform any IO itself.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    /// Directory the run was pointed at; never removed.
    pub output_dir: PathBuf,
    /// Folder recreated on every run (`<output_dir>/<root_name>`).
    pub root: PathBuf,
    /// Folder for `<group> <names_suffix>.txt` files.
    pub names_dir: PathBuf,
    /// Folder for `<group> <addresses_suffix>.txt` files.
    pub addresses_dir: PathBuf,
    /// Path to the run manifest (JSON).
    pub manifest_path: PathBuf,
    names_suffix: String,
    addresses_suffix: String,
}

impl OutputLayout {
    /// Compute the layout for a run writing into `output_dir`.
    pub fn new(output_dir: impl AsRef<Path>, config: &RunConfig) -> Self {
        let output_dir = output_dir.as_ref().to_path_buf();
        let root = output_dir.join(&config.root_name);
        let names_dir = root.join(&config.names_dir);
        let addresses_dir = root.join(&config.addresses_dir);
        let manifest_path = root.join("run.json");

        Self {
            output_dir,
            root,
            names_dir,
            addresses_dir,
            manifest_path,
            names_suffix: config.names_suffix.clone(),
            addresses_suffix: config.addresses_suffix.clone(),
        }
    }

    /// Name-pairs file for `group`.
    pub fn names_file(&self, group: &str) -> PathBuf {
        self.names_dir.join(file_name(group, &self.names_suffix))
    }

    /// Address-pairs file for `group`.
    pub fn addresses_file(&self, group: &str) -> PathBuf {
        self.addresses_dir.join(file_name(group, &self.addresses_suffix))
    }

    /// Whether `root` is a direct child folder of `output_dir`, i.e. removing
    /// it cannot touch anything outside the run's own folder.
    pub fn root_is_contained(&self) -> bool {
        self.root.file_name().is_some() && self.root.parent() == Some(self.output_dir.as_path())
    }

    /// Groups whose keys map to the same file name once sanitized.
    ///
    /// Names are compared case-insensitively, since `1a` and `1A` share a file
    /// on case-insensitive filesystems. Each entry is `(earlier, later)` in
    /// iteration order.
    pub fn file_name_collisions<'a, I>(&self, groups: I) -> Vec<(String, String)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen: HashMap<String, &'a str> = HashMap::new();
        let mut collisions = Vec::new();
        for group in groups {
            let key = sanitize_file_component(group).to_lowercase();
            match seen.get(&key) {
                Some(first) => collisions.push((first.to_string(), group.to_string())),
                None => {
                    seen.insert(key, group);
                }
            }
        }
        collisions
    }

    /// Recover the (sanitized) group key from a names file name, if it is one.
    pub fn group_from_names_file(&self, file_name: &str) -> Option<String> {
        file_name
            .strip_suffix(".txt")?
            .strip_suffix(self.names_suffix.as_str())?
            .strip_suffix(' ')
            .filter(|g| !g.is_empty())
            .map(str::to_string)
    }
}

fn file_name(group: &str, suffix: &str) -> String {
    format!("{} {suffix}.txt", sanitize_file_component(group))
}

/// Make a group key safe to use as part of a file name.
///
/// Path separators, characters rejected by common filesystems and control
/// characters become `_`; a key that would be `.` or `..` is prefixed.
pub fn sanitize_file_component(key: &str) -> String {
    let cleaned: String = key
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    match cleaned.as_str() {
        "." | ".." => format!("_{cleaned}"),
        _ => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_paths_follow_config() {
        let layout = OutputLayout::new("/tmp/out", &RunConfig::default());
        assert_eq!(layout.root, Path::new("/tmp/out/buddyweek_output"));
        assert_eq!(
            layout.names_file("1A"),
            Path::new("/tmp/out/buddyweek_output/names/1A assigned_names.txt")
        );
        assert_eq!(
            layout.addresses_file("1A"),
            Path::new("/tmp/out/buddyweek_output/addresses/1A assigned_addresses.txt")
        );
        assert_eq!(layout.group_from_names_file("1A assigned_names.txt").as_deref(), Some("1A"));
        assert_eq!(layout.group_from_names_file("notes.txt"), None);
    }

    #[test]
    fn distinct_groups_with_same_file_name_are_detected() {
        let layout = OutputLayout::new("/tmp/out", &RunConfig::default());
        let collisions = layout.file_name_collisions(["3/4", "3_4", "4A", "4a", "5B"]);
        assert_eq!(
            collisions,
            vec![("3/4".to_string(), "3_4".to_string()), ("4A".to_string(), "4a".to_string())]
        );
        assert!(layout.file_name_collisions(["1A", "1B"]).is_empty());
    }

    #[test]
    fn root_must_be_a_child_of_output_dir() {
        assert!(OutputLayout::new("/tmp/out", &RunConfig::default()).root_is_contained());
        for bad in ["", ".", "..", "/abs", "a/b"] {
            let config = RunConfig { root_name: bad.to_string(), ..RunConfig::default() };
            assert!(!OutputLayout::new("/tmp/out", &config).root_is_contained(), "'{bad}'");
        }
    }

    #[test]
    fn sanitize_replaces_separators() {
        assert_eq!(sanitize_file_component("3/4 B"), "3_4 B");
        assert_eq!(sanitize_file_component(".."), "_..");
        assert_eq!(sanitize_file_component("Groep 5"), "Groep 5");
    }
}
