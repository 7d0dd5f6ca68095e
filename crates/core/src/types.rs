//! Shared data model: runs, tags, the run→tag index and summary records.

use crate::tensor::TensorPayload;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Identifier of one experiment execution. Opaque.
pub type Run = String;

/// Identifier of one named stream of records within a run. Opaque.
pub type Tag = String;

/// Plugin-specific metadata the store keeps per tag.
pub type TagContent = Vec<u8>;

/// Current-format listing: run → (tag → plugin content).
///
/// Tags within a run keep the order the store discovered them in.
pub type RunTagContent = BTreeMap<Run, IndexMap<Tag, TagContent>>;

/// Legacy asset listing: run → asset file names.
pub type RunAssets = BTreeMap<Run, BTreeSet<String>>;

/// Mapping from run to the tags it holds for this plugin.
///
/// Tags keep the order in which the backing store reported them.
/// A published index is never mutated; it is replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagIndex(BTreeMap<Run, Vec<Tag>>);

impl TagIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Derive an index from a current-format listing (the tag keys of each run)
    pub fn from_tag_content(content: &RunTagContent) -> Self {
        Self(
            content
                .iter()
                .map(|(run, tags)| (run.clone(), tags.keys().cloned().collect()))
                .collect(),
        )
    }

    /// Set the tag list for a run, replacing any previous one
    pub fn insert(&mut self, run: impl Into<Run>, tags: Vec<Tag>) {
        self.0.insert(run.into(), tags);
    }

    /// Tags for a run, if the run is known
    pub fn tags(&self, run: &str) -> Option<&[Tag]> {
        self.0.get(run).map(Vec::as_slice)
    }

    /// Whether the run appears as a key (possibly with no tags)
    pub fn contains_run(&self, run: &str) -> bool {
        self.0.contains_key(run)
    }

    /// Iterate over runs in key order
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.0.keys()
    }

    /// Iterate over (run, tags) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&Run, &Vec<Tag>)> {
        self.0.iter()
    }

    /// Number of runs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the index has no runs
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwrap into the underlying map
    pub fn into_inner(self) -> BTreeMap<Run, Vec<Tag>> {
        self.0
    }
}

impl From<BTreeMap<Run, Vec<Tag>>> for TagIndex {
    fn from(map: BTreeMap<Run, Vec<Tag>>) -> Self {
        Self(map)
    }
}

impl FromIterator<(Run, Vec<Tag>)> for TagIndex {
    fn from_iter<I: IntoIterator<Item = (Run, Vec<Tag>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One stored data point as read from the backing store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Seconds since the Unix epoch
    pub wall_time: f64,
    /// Training step
    pub step: i64,
    /// Raw encoded value
    pub value: TensorPayload,
}

impl SummaryRecord {
    /// Record holding a single string
    pub fn scalar(wall_time: f64, step: i64, text: impl AsRef<[u8]>) -> Self {
        Self {
            wall_time,
            step,
            value: TensorPayload::scalar(text),
        }
    }
}

/// Record as returned by the text route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRecord {
    /// Seconds since the Unix epoch
    pub wall_time: f64,
    /// Training step
    pub step: i64,
    /// Sanitized HTML
    pub text: String,
}
