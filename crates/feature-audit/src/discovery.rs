//! Feature file discovery.
//!
//! The validation engine only depends on the [`FeatureDiscovery`] trait. The
//! default [`WalkDirDiscovery`] walks a directory tree recursively, pruning
//! build-output, version-control and dependency directories.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::AuditConfig;

/// Supplies candidate feature files beneath a root directory.
///
/// Implementations may return paths in any order; the engine sorts them. An
/// empty result means there is nothing to validate.
pub trait FeatureDiscovery {
    /// Return the feature files found beneath `root`.
    fn discover(&self, root: &Path) -> Vec<PathBuf>;
}

impl<F> FeatureDiscovery for F
where
    F: Fn(&Path) -> Vec<PathBuf>,
{
    fn discover(&self, root: &Path) -> Vec<PathBuf> {
        self(root)
    }
}

/// Recursive directory walk filtered by extension and excluded directory names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkDirDiscovery {
    extension: String,
    excluded_dirs: Vec<String>,
}

impl WalkDirDiscovery {
    /// Create a walker for files ending in `.{extension}`.
    #[must_use]
    pub fn new(extension: impl Into<String>, excluded_dirs: Vec<String>) -> Self {
        Self {
            extension: extension.into(),
            excluded_dirs,
        }
    }

    /// Create a walker from the discovery settings of `config`.
    #[must_use]
    pub fn from_config(config: &AuditConfig) -> Self {
        Self::new(config.extension.clone(), config.excluded_dirs.clone())
    }

    fn is_feature_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        // The root itself is never pruned, even when its name is excluded.
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.excluded_dirs.iter().any(|dir| dir == name))
    }
}

impl FeatureDiscovery for WalkDirDiscovery {
    fn discover(&self, root: &Path) -> Vec<PathBuf> {
        if !root.exists() {
            warn!(root = %root.display(), "feature root does not exist; nothing to validate");
            return Vec::new();
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_dir(entry));

        for next in walker {
            let entry = match next {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && self.is_feature_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        debug!(root = %root.display(), count = files.len(), "discovered feature files");
        files
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, "Feature: x\n").expect("write file");
    }

    fn default_walker() -> WalkDirDiscovery {
        WalkDirDiscovery::from_config(&AuditConfig::default())
    }

    #[test]
    fn finds_nested_feature_files_sorted() {
        let dir = TempDir::new().expect("temp dir");
        write(dir.path(), "tests/features/b.feature");
        write(dir.path(), "a.feature");
        write(dir.path(), "tests/features/nested/c.FEATURE");
        write(dir.path(), "notes.md");

        let files = default_walker().discover(dir.path());
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).expect("under root").to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.feature"),
                PathBuf::from("tests/features/b.feature"),
                PathBuf::from("tests/features/nested/c.FEATURE"),
            ]
        );
    }

    #[rstest]
    #[case("target/debug/x.feature")]
    #[case(".git/hooks/x.feature")]
    #[case("node_modules/pkg/x.feature")]
    #[case("build/x.feature")]
    fn prunes_excluded_directories(#[case] relative: &str) {
        let dir = TempDir::new().expect("temp dir");
        write(dir.path(), relative);

        assert!(default_walker().discover(dir.path()).is_empty());
    }

    #[test]
    fn excluded_name_as_root_is_still_walked() {
        let dir = TempDir::new().expect("temp dir");
        write(dir.path(), "build/x.feature");

        let files = default_walker().discover(&dir.path().join("build"));
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn custom_extension_is_honoured() {
        let dir = TempDir::new().expect("temp dir");
        write(dir.path(), "a.story");
        write(dir.path(), "b.feature");

        let files = WalkDirDiscovery::new("story", Vec::new()).discover(dir.path());
        assert_eq!(files, vec![dir.path().join("a.story")]);
    }

    #[test]
    fn missing_root_yields_nothing() {
        let dir = TempDir::new().expect("temp dir");
        let files = default_walker().discover(&dir.path().join("absent"));
        assert!(files.is_empty());
    }

    #[test]
    fn closures_act_as_discovery() {
        let fixed = |_: &Path| vec![PathBuf::from("z.feature")];
        assert_eq!(fixed.discover(Path::new(".")), vec![PathBuf::from("z.feature")]);
    }
}
