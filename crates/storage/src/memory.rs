//! InMemoryMultiplexer: reference backing store
//!
//! Holds runs in a `BTreeMap` behind a `parking_lot::RwLock`; each run's tags
//! sit in an `IndexMap` so listings keep the order tags were first written.
//! Legacy assets live either in memory as well or in a `PluginAssetDir` on disk.
//!
//! # Design Notes
//!
//! - Every run ever written appears in the current-format listing, with an
//!   empty tag map if none of its tags belong to the queried plugin.
//! - Every run known to the store (and every run owning an asset) appears in
//!   the asset listing.
//! - Records are returned in append order.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use parking_lot::RwLock;
use textboard_core::{
    Error, Multiplexer, Result, Run, RunAssets, RunTagContent, SummaryRecord, Tag, TagContent,
};

use crate::assets::PluginAssetDir;

#[derive(Debug, Default)]
struct TagData {
    /// plugin name → plugin content
    plugin_content: BTreeMap<String, TagContent>,
    records: Vec<SummaryRecord>,
}

/// (run, plugin_dir) → asset name → bytes
type MemoryAssets = BTreeMap<(Run, String), BTreeMap<String, Vec<u8>>>;

#[derive(Debug)]
enum AssetSource {
    Memory(RwLock<MemoryAssets>),
    Directory(PluginAssetDir),
}

/// Thread-safe in-memory multiplexer
#[derive(Debug)]
pub struct InMemoryMultiplexer {
    runs: RwLock<BTreeMap<Run, IndexMap<Tag, TagData>>>,
    assets: AssetSource,
}

impl Default for InMemoryMultiplexer {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMultiplexer {
    /// Create an empty store with in-memory assets
    pub fn new() -> Self {
        Self {
            runs: RwLock::new(BTreeMap::new()),
            assets: AssetSource::Memory(RwLock::new(BTreeMap::new())),
        }
    }

    /// Create an empty store reading legacy assets from disk
    pub fn with_asset_dir(dir: PluginAssetDir) -> Self {
        Self {
            runs: RwLock::new(BTreeMap::new()),
            assets: AssetSource::Directory(dir),
        }
    }

    /// Make a run known without adding any tags
    pub fn add_run(&self, run: impl Into<Run>) {
        self.runs.write().entry(run.into()).or_default();
    }

    /// Mark `tag` in `run` as belonging to `plugin_name`
    pub fn register_tag(
        &self,
        run: impl Into<Run>,
        tag: impl Into<Tag>,
        plugin_name: impl Into<String>,
        content: TagContent,
    ) {
        self.runs
            .write()
            .entry(run.into())
            .or_default()
            .entry(tag.into())
            .or_default()
            .plugin_content
            .insert(plugin_name.into(), content);
    }

    /// Append a record under (run, tag), creating both if needed
    pub fn append_record(&self, run: impl Into<Run>, tag: impl Into<Tag>, record: SummaryRecord) {
        self.runs
            .write()
            .entry(run.into())
            .or_default()
            .entry(tag.into())
            .or_default()
            .records
            .push(record);
    }

    /// Store an in-memory legacy asset
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` when the store reads assets from disk.
    pub fn put_asset(
        &self,
        run: impl Into<Run>,
        plugin_dir: impl Into<String>,
        asset: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<()> {
        match &self.assets {
            AssetSource::Memory(assets) => {
                assets
                    .write()
                    .entry((run.into(), plugin_dir.into()))
                    .or_default()
                    .insert(asset.into(), bytes);
                Ok(())
            }
            AssetSource::Directory(dir) => Err(Error::storage(format!(
                "assets are read from {}",
                dir.root().display()
            ))),
        }
    }

    /// Number of known runs
    pub fn run_count(&self) -> usize {
        self.runs.read().len()
    }
}

impl Multiplexer for InMemoryMultiplexer {
    fn plugin_run_to_tag_to_content(&self, plugin_name: &str) -> Result<RunTagContent> {
        let runs = self.runs.read();
        Ok(runs
            .iter()
            .map(|(run, tags)| {
                let tag_content = tags
                    .iter()
                    .filter_map(|(tag, data)| {
                        data.plugin_content
                            .get(plugin_name)
                            .map(|content| (tag.clone(), content.clone()))
                    })
                    .collect();
                (run.clone(), tag_content)
            })
            .collect())
    }

    fn summary_records(&self, run: &str, tag: &str) -> Result<Vec<SummaryRecord>> {
        self.runs
            .read()
            .get(run)
            .and_then(|tags| tags.get(tag))
            .map(|data| data.records.clone())
            .ok_or_else(|| Error::NotFound {
                run: run.to_string(),
                tag: tag.to_string(),
            })
    }

    fn plugin_assets(&self, plugin_dir: &str) -> Result<RunAssets> {
        let mut listing = match &self.assets {
            AssetSource::Directory(dir) => dir.list_assets(plugin_dir)?,
            AssetSource::Memory(assets) => assets
                .read()
                .iter()
                .filter(|((_, dir), _)| dir == plugin_dir)
                .map(|((run, _), files)| (run.clone(), files.keys().cloned().collect()))
                .collect(),
        };
        for run in self.runs.read().keys() {
            listing.entry(run.clone()).or_insert_with(BTreeSet::new);
        }
        Ok(listing)
    }

    fn retrieve_plugin_asset(&self, run: &str, plugin_dir: &str, asset: &str) -> Result<Vec<u8>> {
        match &self.assets {
            AssetSource::Directory(dir) => dir.read_asset(run, plugin_dir, asset),
            AssetSource::Memory(assets) => assets
                .read()
                .get(&(run.to_string(), plugin_dir.to_string()))
                .and_then(|files| files.get(asset))
                .cloned()
                .ok_or_else(|| Error::AssetNotFound {
                    run: run.to_string(),
                    asset: asset.to_string(),
                }),
        }
    }
}
