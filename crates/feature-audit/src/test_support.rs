//! Shared helpers for building feature trees in tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory populated with feature files.
///
/// The directory is removed when the value is dropped.
#[derive(Debug)]
pub struct FeatureTree {
    dir: TempDir,
}

impl FeatureTree {
    /// Create an empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Root of the tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parents cannot be written.
    pub fn write(&self, relative: &str, content: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Write bytes that are not valid UTF-8, producing an unreadable feature.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_unreadable(&self, relative: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, [0xc3_u8, 0x28, 0xff, 0xfe])?;
        Ok(path)
    }
}

/// Render a feature with one plain scenario per name.
#[must_use]
pub fn feature_with_scenarios(description: &str, names: &[&str]) -> String {
    let mut text = format!("Feature: {description}\n");
    for name in names {
        text.push('\n');
        text.push_str("  Scenario: ");
        text.push_str(name);
        text.push_str("\n    Given a step\n");
    }
    text
}

/// Render a feature with one outline whose Examples table has `rows` data rows.
#[must_use]
pub fn feature_with_outline(description: &str, outline: &str, rows: usize) -> String {
    let mut text = format!(
        "Feature: {description}\n\n  Scenario Outline: {outline}\n    Given <value>\n\n    Examples:\n      | value |\n"
    );
    for row in 0..rows {
        text.push_str("      | v");
        text.push_str(&row.to_string());
        text.push_str(" |\n");
    }
    text
}
