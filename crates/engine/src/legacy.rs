//! Legacy asset-based tag discovery
//!
//! Before tags were registered in the store, each run kept its text tags in a
//! JSON asset (`tensors.json`, an array of strings) in its plugin folder.
//! Such runs still need to show up in the tag listing.
//!
//! Conflict rule: a run with any current-format entry ignores its legacy
//! asset entirely. Tag lists are never unioned across the two sources.

use textboard_core::{Error, Multiplexer, Result, Run, RunAssets, Tag, TagIndex};
use tracing::warn;

use crate::config::TextPluginConfig;

/// Parse a legacy index file: a JSON array of tag names.
pub fn parse_legacy_index(run: &str, bytes: &[u8]) -> Result<Vec<Tag>> {
    serde_json::from_slice::<Vec<Tag>>(bytes).map_err(|e| Error::MalformedLegacyIndex {
        run: run.to_string(),
        reason: e.to_string(),
    })
}

/// Add legacy runs to a current-format index.
///
/// Runs already present in `current` keep their current-format tags; the
/// legacy entry for them is dropped. Every other legacy run is added as is.
pub fn merge_legacy_runs<I>(mut current: TagIndex, legacy: I) -> TagIndex
where
    I: IntoIterator<Item = (Run, Vec<Tag>)>,
{
    for (run, tags) in legacy {
        if !current.contains_run(&run) {
            current.insert(run, tags);
        }
    }
    current
}

/// Tag lists for the legacy runs that `current` does not already cover.
///
/// A run whose assets lack the index file gets an empty list. An index file
/// that cannot be read or parsed also yields an empty list, with a warning,
/// so one damaged run does not take down the whole listing.
pub fn legacy_runs_missing_from<M: Multiplexer + ?Sized>(
    store: &M,
    config: &TextPluginConfig,
    current: &TagIndex,
    assets: RunAssets,
) -> Vec<(Run, Vec<Tag>)> {
    assets
        .into_iter()
        .filter(|(run, _)| !current.contains_run(run))
        .map(|(run, files)| {
            let tags = if files.contains(&config.legacy_index_file) {
                read_legacy_tags(store, config, &run).unwrap_or_else(|e| {
                    warn!(
                        target: "textboard::service",
                        run = %run,
                        error = %e,
                        "Ignoring unreadable legacy tag index"
                    );
                    Vec::new()
                })
            } else {
                Vec::new()
            };
            (run, tags)
        })
        .collect()
}

fn read_legacy_tags<M: Multiplexer + ?Sized>(
    store: &M,
    config: &TextPluginConfig,
    run: &str,
) -> Result<Vec<Tag>> {
    let bytes =
        store.retrieve_plugin_asset(run, &config.legacy_plugin_dir, &config.legacy_index_file)?;
    parse_legacy_index(run, &bytes)
}
