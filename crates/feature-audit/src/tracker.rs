//! Cross-file duplicate detection for feature descriptions and scenario names.
//!
//! A [`DuplicateTracker`] is created for one validation run, fed every parsed
//! file, and then queried for keys that occur in more than one file (or more
//! than once within a file, when configured). It owns all accumulated state;
//! nothing is shared between runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::KeyMatching;
use crate::parser::FeatureFileStats;

/// A key that occurs more than once across the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateEntry {
    /// The key as first spelled in the corpus.
    pub key: String,
    /// Implicated files, sorted and de-duplicated.
    pub files: Vec<PathBuf>,
    /// Total number of occurrences across all files.
    pub occurrences: usize,
}

#[derive(Debug, Clone)]
struct IndexEntry {
    display: String,
    files: BTreeMap<PathBuf, usize>,
}

/// Mapping from normalised key to the files that declare it.
#[derive(Debug, Clone, Default)]
pub struct DuplicateIndex {
    matching: KeyMatching,
    entries: BTreeMap<String, IndexEntry>,
}

impl DuplicateIndex {
    /// Create an empty index using the given key comparison mode.
    #[must_use]
    pub fn new(matching: KeyMatching) -> Self {
        Self {
            matching,
            entries: BTreeMap::new(),
        }
    }

    /// Record one occurrence of `key` in `file`.
    ///
    /// Keys are trimmed before indexing. An empty key is indexed like any
    /// other; callers decide whether blank text takes part in detection.
    pub fn record(&mut self, key: &str, file: &Path) {
        let key = key.trim();
        let entry = self
            .entries
            .entry(self.matching.normalise(key))
            .or_insert_with(|| IndexEntry {
                display: key.to_owned(),
                files: BTreeMap::new(),
            });
        *entry.files.entry(file.to_path_buf()).or_default() += 1;
    }

    /// Number of distinct keys recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys seen in more than one file, in sorted key order.
    ///
    /// With `same_file_repeats` set, a key repeated within a single file is
    /// reported as well.
    #[must_use]
    pub fn duplicates(&self, same_file_repeats: bool) -> Vec<DuplicateEntry> {
        self.entries
            .values()
            .filter(|entry| {
                entry.files.len() > 1
                    || (same_file_repeats && entry.files.values().any(|count| *count > 1))
            })
            .map(|entry| DuplicateEntry {
                key: entry.display.clone(),
                files: entry.files.keys().cloned().collect(),
                occurrences: entry.files.values().sum(),
            })
            .collect()
    }
}

/// Accumulator for both duplicate indices of a validation run.
#[derive(Debug, Clone, Default)]
pub struct DuplicateTracker {
    features: DuplicateIndex,
    scenarios: DuplicateIndex,
    same_file_repeats: bool,
}

impl DuplicateTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new(matching: KeyMatching, same_file_repeats: bool) -> Self {
        Self {
            features: DuplicateIndex::new(matching),
            scenarios: DuplicateIndex::new(matching),
            same_file_repeats,
        }
    }

    /// Record the feature description and scenario names of one file.
    ///
    /// A present but empty feature description is indexed, so two bare
    /// `Feature:` lines collide. Blank scenario names are skipped.
    pub fn record_file(&mut self, file: &Path, stats: &FeatureFileStats) {
        if let Some(description) = &stats.feature_description {
            self.features.record(description, file);
        }
        for name in stats
            .scenario_names
            .iter()
            .filter(|name| !name.trim().is_empty())
        {
            self.scenarios.record(name, file);
        }
    }

    /// Duplicate feature descriptions.
    #[must_use]
    pub fn duplicate_features(&self) -> Vec<DuplicateEntry> {
        self.features.duplicates(self.same_file_repeats)
    }

    /// Duplicate scenario and outline names.
    #[must_use]
    pub fn duplicate_scenarios(&self) -> Vec<DuplicateEntry> {
        self.scenarios.duplicates(self.same_file_repeats)
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn stats(feature: Option<&str>, scenarios: &[&str]) -> FeatureFileStats {
        FeatureFileStats {
            feature_description: feature.map(str::to_owned),
            scenario_names: scenarios.iter().map(|s| (*s).to_owned()).collect(),
            ..FeatureFileStats::default()
        }
    }

    #[test]
    fn reports_feature_shared_by_two_files() {
        let mut tracker = DuplicateTracker::new(KeyMatching::Exact, true);
        tracker.record_file(Path::new("a.feature"), &stats(Some("Login flow"), &[]));
        tracker.record_file(Path::new("b.feature"), &stats(Some("Login flow"), &[]));
        tracker.record_file(Path::new("c.feature"), &stats(Some("Logout"), &[]));

        let duplicates = tracker.duplicate_features();
        assert_eq!(
            duplicates,
            vec![DuplicateEntry {
                key: "Login flow".to_owned(),
                files: vec![PathBuf::from("a.feature"), PathBuf::from("b.feature")],
                occurrences: 2,
            }]
        );
        assert!(tracker.duplicate_scenarios().is_empty());
    }

    #[test]
    fn third_file_extends_existing_entry() {
        let mut tracker = DuplicateTracker::new(KeyMatching::Exact, true);
        for file in ["c.feature", "a.feature", "b.feature"] {
            tracker.record_file(Path::new(file), &stats(None, &["Submit empty form"]));
        }

        let duplicates = tracker.duplicate_scenarios();
        assert_eq!(duplicates.len(), 1);
        let entry = duplicates.first().expect("one duplicate scenario");
        assert_eq!(entry.files.len(), 3);
        assert_eq!(entry.files.first(), Some(&PathBuf::from("a.feature")));
    }

    #[rstest]
    #[case(true, 1)]
    #[case(false, 0)]
    fn same_file_repeat_policy(#[case] same_file_repeats: bool, #[case] expected: usize) {
        let mut tracker = DuplicateTracker::new(KeyMatching::Exact, same_file_repeats);
        tracker.record_file(Path::new("a.feature"), &stats(None, &["twice", "twice"]));

        let duplicates = tracker.duplicate_scenarios();
        assert_eq!(duplicates.len(), expected);
        if let Some(entry) = duplicates.first() {
            assert_eq!(entry.files, vec![PathBuf::from("a.feature")]);
            assert_eq!(entry.occurrences, 2);
        }
    }

    #[rstest]
    #[case(KeyMatching::Exact, 0)]
    #[case(KeyMatching::CaseInsensitive, 1)]
    fn key_matching_mode(#[case] matching: KeyMatching, #[case] expected: usize) {
        let mut tracker = DuplicateTracker::new(matching, true);
        tracker.record_file(Path::new("a.feature"), &stats(Some("Login Flow"), &[]));
        tracker.record_file(Path::new("b.feature"), &stats(Some("login flow"), &[]));

        let duplicates = tracker.duplicate_features();
        assert_eq!(duplicates.len(), expected);
        if let Some(entry) = duplicates.first() {
            assert_eq!(entry.key, "Login Flow");
        }
    }

    #[test]
    fn blank_scenario_names_are_not_indexed() {
        let mut tracker = DuplicateTracker::new(KeyMatching::Exact, true);
        tracker.record_file(Path::new("a.feature"), &stats(None, &["", "  "]));
        tracker.record_file(Path::new("b.feature"), &stats(None, &[""]));
        assert!(tracker.duplicate_scenarios().is_empty());
    }

    #[test]
    fn empty_feature_descriptions_collide() {
        let mut tracker = DuplicateTracker::new(KeyMatching::Exact, true);
        tracker.record_file(Path::new("a.feature"), &stats(Some(""), &["one"]));
        tracker.record_file(Path::new("b.feature"), &stats(Some("  "), &["two"]));

        let duplicates = tracker.duplicate_features();
        assert_eq!(duplicates.len(), 1);
        let entry = duplicates.first().expect("one duplicate feature");
        assert_eq!(entry.key, "");
        assert_eq!(
            entry.files,
            vec![PathBuf::from("a.feature"), PathBuf::from("b.feature")]
        );
    }

    #[test]
    fn keys_are_trimmed_before_indexing() {
        let mut index = DuplicateIndex::new(KeyMatching::Exact);
        index.record("name ", Path::new("a.feature"));
        index.record("name", Path::new("b.feature"));
        assert_eq!(index.len(), 1);
        assert_eq!(index.duplicates(false).len(), 1);
    }
}
