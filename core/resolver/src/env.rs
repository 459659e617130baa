//! Environment serialization.
//!
//! A [`PathSet`] is turned into an [`EnvironmentBlock`] with one of two
//! strategies:
//!
//! - [`PathStrategy::Cleanup`]: `PATH` is exactly the discovered entries.
//! - [`PathStrategy::Merge`]: `PATH` is the discovered entries followed by the
//!   inherited `PATH`, with its empty segments dropped.
//!
//! In both cases `INCLUDE`, `LIB` and `LIBPATH` are set only when their
//! collection is non-empty. The inherited `PATH` is an explicit argument, never
//! read from the process environment here.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Command;

use serde::{Serialize, Serializer};

use crate::paths::PathSet;

/// Separator between entries of a path list variable.
pub const PATH_LIST_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

const SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

/// How the produced `PATH` relates to the inherited one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStrategy {
    /// Replace the inherited `PATH`.
    Cleanup,
    /// Prepend to the inherited `PATH`.
    Merge,
}

/// Variables produced by a resolution.
///
/// Values are kept as [`OsString`] so that entries which are not valid
/// Unicode reach a child process unchanged. Only the JSON form is lossy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentBlock {
    strategy: PathStrategy,
    #[serde(serialize_with = "serialize_lossy")]
    vars: BTreeMap<String, OsString>,
}

fn serialize_lossy<S: Serializer>(
    vars: &BTreeMap<String, OsString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(vars.iter().map(|(k, v)| (k, v.to_string_lossy())))
}

/// Joins entries with [`PATH_LIST_SEPARATOR`].
#[must_use]
pub fn join_path_list<I, P>(entries: I) -> OsString
where
    I: IntoIterator<Item = P>,
    P: AsRef<OsStr>,
{
    let mut joined = OsString::new();
    for (i, entry) in entries.into_iter().enumerate() {
        if i > 0 {
            joined.push(SEPARATOR);
        }
        joined.push(entry);
    }
    joined
}

fn compiler_vars(set: &PathSet) -> BTreeMap<String, OsString> {
    let mut vars = BTreeMap::new();
    for (name, entries) in [
        ("INCLUDE", &set.includes),
        ("LIB", &set.libs),
        ("LIBPATH", &set.libpaths),
    ] {
        if !entries.is_empty() {
            vars.insert(name.to_string(), join_path_list(entries));
        }
    }
    vars
}

impl EnvironmentBlock {
    /// Serializes `set` with `PATH` replaced by the discovered entries.
    #[must_use]
    pub fn cleanup(set: &PathSet) -> Self {
        let mut vars = compiler_vars(set);
        vars.insert("PATH".to_string(), join_path_list(&set.paths));
        Self {
            strategy: PathStrategy::Cleanup,
            vars,
        }
    }

    /// Serializes `set` with the discovered entries prepended to `inherited_path`.
    #[must_use]
    pub fn merge(set: &PathSet, inherited_path: &OsStr) -> Self {
        let inherited: Vec<PathBuf> = std::env::split_paths(inherited_path)
            .filter(|segment| !segment.as_os_str().is_empty())
            .collect();

        let mut vars = compiler_vars(set);
        vars.insert(
            "PATH".to_string(),
            join_path_list(set.paths.iter().chain(&inherited)),
        );
        Self {
            strategy: PathStrategy::Merge,
            vars,
        }
    }

    /// Strategy used to build `PATH`.
    #[must_use]
    pub fn strategy(&self) -> PathStrategy {
        self.strategy
    }

    /// Value of a produced variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OsStr> {
        self.vars.get(name).map(OsString::as_os_str)
    }

    /// Produced variables, ordered by name.
    pub fn vars(&self) -> impl Iterator<Item = (&str, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_os_str()))
    }

    /// Applies the produced variables to a child process.
    pub fn apply(&self, command: &mut Command) {
        command.envs(&self.vars);
    }

    /// Renders the complete NUL-delimited block a process-creation call expects.
    ///
    /// Produced variables override inherited ones of the same name (compared
    /// case-insensitively on Windows). Entries are sorted case-insensitively
    /// and the block ends with an extra NUL.
    #[must_use]
    pub fn render_block<I>(&self, inherited: I) -> OsString
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut entries: Vec<(OsString, OsString)> = inherited
            .into_iter()
            .filter(|(name, _)| !self.vars.keys().any(|ours| same_name(ours, name)))
            .chain(self.vars.iter().map(|(k, v)| (k.into(), v.clone())))
            .collect();
        entries.sort_by(|(a, _), (b, _)| compare_names(a, b));

        let mut block = OsString::new();
        for (name, value) in entries {
            block.push(name);
            block.push("=");
            block.push(value);
            block.push("\0");
        }
        block.push("\0");
        block
    }
}

fn same_name(ours: &str, theirs: &OsStr) -> bool {
    if cfg!(windows) {
        theirs.eq_ignore_ascii_case(ours)
    } else {
        theirs == ours
    }
}

fn compare_names(a: &OsStr, b: &OsStr) -> Ordering {
    a.to_ascii_uppercase()
        .cmp(&b.to_ascii_uppercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sep() -> String {
        PATH_LIST_SEPARATOR.to_string()
    }

    fn os(value: &str) -> Option<&OsStr> {
        Some(OsStr::new(value))
    }

    fn set_with_paths(paths: &[&str]) -> PathSet {
        PathSet {
            paths: paths.iter().map(PathBuf::from).collect(),
            ..PathSet::default()
        }
    }

    #[test]
    fn cleanup_path_is_exactly_discovered_entries() {
        let set = set_with_paths(&["tool", "tool/linkbin"]);
        let block = EnvironmentBlock::cleanup(&set);

        assert_eq!(block.strategy(), PathStrategy::Cleanup);
        assert_eq!(block.get("PATH"), os(&format!("tool{}tool/linkbin", sep())));
    }

    #[test]
    fn cleanup_with_nothing_discovered_sets_empty_path() {
        let block = EnvironmentBlock::cleanup(&PathSet::default());
        assert_eq!(block.get("PATH"), os(""));
        assert_eq!(block.vars().count(), 1);
    }

    #[test]
    fn merge_appends_inherited_without_empty_segments() {
        let set = set_with_paths(&["tool", "vc"]);
        let s = sep();
        let inherited = format!("{s}sys{s}{s}usr{s}");
        let block = EnvironmentBlock::merge(&set, inherited.as_ref());

        assert_eq!(block.strategy(), PathStrategy::Merge);
        assert_eq!(block.get("PATH"), os(&format!("tool{s}vc{s}sys{s}usr")));
    }

    #[test]
    fn merge_never_deduplicates_against_inherited() {
        let set = set_with_paths(&["tool"]);
        let s = sep();
        let inherited = format!("tool{s}sys");
        let block = EnvironmentBlock::merge(&set, inherited.as_ref());
        assert_eq!(block.get("PATH"), os(&format!("tool{s}tool{s}sys")));
    }

    #[test]
    fn merge_with_empty_inherited_has_no_trailing_separator() {
        let set = set_with_paths(&["tool"]);
        let block = EnvironmentBlock::merge(&set, OsStr::new(""));
        assert_eq!(block.get("PATH"), os("tool"));
    }

    #[test]
    fn merge_with_nothing_discovered_is_inherited_path() {
        let s = sep();
        let inherited = format!("sys{s}usr");
        let block = EnvironmentBlock::merge(&PathSet::default(), inherited.as_ref());
        assert_eq!(block.get("PATH"), os(&inherited));
    }

    #[cfg(unix)]
    #[test]
    fn merge_keeps_non_unicode_inherited_segments() {
        use std::os::unix::ffi::OsStrExt;

        let set = set_with_paths(&["tool"]);
        let inherited = OsStr::from_bytes(b"/usr/bin:/opt/caf\xE9:/bin");
        let block = EnvironmentBlock::merge(&set, inherited);

        assert_eq!(
            block.get("PATH").map(OsStr::as_bytes),
            Some(&b"tool:/usr/bin:/opt/caf\xE9:/bin"[..])
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_discovered_entry_reaches_child_unchanged() {
        use std::os::unix::ffi::OsStrExt;

        let dir = PathBuf::from(OsStr::from_bytes(b"/opt/caf\xE9/bin"));
        let block = EnvironmentBlock::cleanup(&PathSet {
            paths: vec![dir.clone()],
            ..PathSet::default()
        });
        let mut command = Command::new("child");
        block.apply(&mut command);

        let envs: Vec<_> = command.get_envs().collect();
        assert_eq!(envs, vec![(OsStr::new("PATH"), Some(dir.as_os_str()))]);
    }

    #[test]
    fn compiler_vars_set_only_when_non_empty() {
        let set = PathSet {
            paths: vec![PathBuf::from("bin")],
            includes: vec![PathBuf::from("inc1"), PathBuf::from("inc2")],
            ..PathSet::default()
        };
        let block = EnvironmentBlock::cleanup(&set);

        assert_eq!(block.get("INCLUDE"), os(&format!("inc1{}inc2", sep())));
        assert_eq!(block.get("LIB"), None);
        assert_eq!(block.get("LIBPATH"), None);
    }

    #[test]
    fn merge_sets_compiler_vars_like_cleanup() {
        let set = PathSet {
            libs: vec![PathBuf::from("lib")],
            libpaths: vec![PathBuf::from("meta")],
            ..PathSet::default()
        };
        let merged = EnvironmentBlock::merge(&set, OsStr::new("sys"));
        let cleaned = EnvironmentBlock::cleanup(&set);

        for name in ["INCLUDE", "LIB", "LIBPATH"] {
            assert_eq!(merged.get(name), cleaned.get(name));
        }
    }

    fn vars(pairs: &[(&str, &str)]) -> Vec<(OsString, OsString)> {
        pairs
            .iter()
            .map(|(k, v)| (OsString::from(k), OsString::from(v)))
            .collect()
    }

    #[test]
    fn render_block_overrides_and_terminates() {
        let block = EnvironmentBlock::cleanup(&set_with_paths(&["tool"]));
        let rendered = block.render_block(vars(&[("PATH", "old"), ("HOME", "/home/dev")]));

        assert_eq!(rendered, "HOME=/home/dev\0PATH=tool\0\0");
    }

    #[test]
    fn render_block_sorts_case_insensitively() {
        let block = EnvironmentBlock::cleanup(&set_with_paths(&["tool"]));
        let rendered = block.render_block(vars(&[("zeta", "1"), ("Alpha", "2")]));
        assert_eq!(rendered, "Alpha=2\0PATH=tool\0zeta=1\0\0");
    }

    #[cfg(windows)]
    #[test]
    fn render_block_replaces_differently_cased_path() {
        let block = EnvironmentBlock::cleanup(&set_with_paths(&["tool"]));
        let rendered = block.render_block(vars(&[("Path", "old")]));
        assert_eq!(rendered, "PATH=tool\0\0");
    }

    #[test]
    fn apply_sets_variables_on_command() {
        let block = EnvironmentBlock::cleanup(&set_with_paths(&["tool"]));
        let mut command = Command::new("child");
        block.apply(&mut command);

        let envs: Vec<_> = command.get_envs().collect();
        assert_eq!(envs, vec![(OsStr::new("PATH"), os("tool"))]);
    }

    #[test]
    fn serializes_strategy_and_vars() {
        let block = EnvironmentBlock::cleanup(&set_with_paths(&["tool"]));
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["strategy"], "cleanup");
        assert_eq!(json["vars"]["PATH"], "tool");
    }

    #[test]
    fn join_path_list_separates_entries() {
        assert_eq!(join_path_list(["a", "b"]), OsString::from(format!("a{}b", sep())));
        assert_eq!(join_path_list(Vec::<PathBuf>::new()), OsString::new());
    }
}
