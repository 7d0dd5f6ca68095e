//! QueryService: answers the tag listing and record listing requests.
//!
//! Tag listings go through the `IndexCache`: every call nudges a background
//! refresh and answers with whatever is available right now. Before the first
//! refresh lands, that is the current-format listing alone, which costs one
//! store scan and no asset reads. Record listings go straight to the store.

use std::sync::Arc;

use textboard_core::{
    Multiplexer, PayloadDecoder, Renderer, Result, StringTensorDecoder, SummaryRecord, TagIndex,
    TextRecord,
};
use tracing::{debug, warn};

use crate::cache::{CacheStats, IndexCache};
use crate::config::TextPluginConfig;
use crate::legacy::{legacy_runs_missing_from, merge_legacy_runs};
use crate::render::{text_array_to_html, EscapingRenderer};

/// Current-format index only: the tags registered for the plugin, per run.
pub fn current_index(store: &dyn Multiplexer, config: &TextPluginConfig) -> Result<TagIndex> {
    let content = store.plugin_run_to_tag_to_content(&config.plugin_name)?;
    Ok(TagIndex::from_tag_content(&content))
}

/// Full index: current-format runs plus legacy asset runs.
///
/// This is the expensive path. It reads a legacy index file for every run
/// that has one and no current-format entry.
pub fn compute_index(store: &dyn Multiplexer, config: &TextPluginConfig) -> Result<TagIndex> {
    let current = current_index(store, config)?;
    let assets = store.plugin_assets(&config.legacy_plugin_dir)?;
    let legacy = legacy_runs_missing_from(store, config, &current, assets);
    Ok(merge_legacy_runs(current, legacy))
}

/// Serves tag and record listings for one plugin instance.
pub struct QueryService {
    store: Arc<dyn Multiplexer>,
    config: Arc<TextPluginConfig>,
    cache: IndexCache,
    renderer: Arc<dyn Renderer>,
    decoder: Arc<dyn PayloadDecoder>,
}

impl QueryService {
    /// Create a service over `store` with the default renderer and decoder.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the config does not validate.
    pub fn new(store: Arc<dyn Multiplexer>, config: TextPluginConfig) -> Result<Self> {
        config.validate()?;
        let cache = IndexCache::new(config.refresh_thread_name.clone());
        Ok(Self {
            store,
            config: Arc::new(config),
            cache,
            renderer: Arc::new(EscapingRenderer),
            decoder: Arc::new(StringTensorDecoder),
        })
    }

    /// Replace the markup renderer.
    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replace the payload decoder.
    pub fn with_decoder(mut self, decoder: Arc<dyn PayloadDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &TextPluginConfig {
        &self.config
    }

    /// The tag index cache
    pub fn cache(&self) -> &IndexCache {
        &self.cache
    }

    /// Cache metrics snapshot
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Run → tags for every run the plugin knows about.
    ///
    /// Never waits for the background refresh it may have started.
    pub fn list_tags(&self) -> Result<Arc<TagIndex>> {
        let store = Arc::clone(&self.store);
        let config = Arc::clone(&self.config);
        self.cache
            .try_start_refresh(move || compute_index(store.as_ref(), &config));

        if let Some(index) = self.cache.get_cached() {
            return Ok(index);
        }
        debug!(
            target: "textboard::service",
            "No cached tag index yet, serving current-format listing"
        );
        Ok(Arc::new(current_index(self.store.as_ref(), &self.config)?))
    }

    /// Rendered records under (run, tag), in store order.
    ///
    /// An unknown run or tag gives an empty list. Records whose payload does
    /// not decode are skipped.
    pub fn list_records(&self, run: &str, tag: &str) -> Result<Vec<TextRecord>> {
        let records = match self.store.summary_records(run, tag) {
            Ok(records) => records,
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        Ok(records
            .iter()
            .filter_map(|record| self.render_record(run, tag, record))
            .collect())
    }

    /// Whether at least one run has a tag registered for the plugin.
    pub fn is_active(&self) -> Result<bool> {
        let content = self
            .store
            .plugin_run_to_tag_to_content(&self.config.plugin_name)?;
        Ok(content.values().any(|tags| !tags.is_empty()))
    }

    fn render_record(&self, run: &str, tag: &str, record: &SummaryRecord) -> Option<TextRecord> {
        match self.decoder.decode(&record.value) {
            Ok(array) => Some(TextRecord {
                wall_time: record.wall_time,
                step: record.step,
                text: text_array_to_html(&array, self.renderer.as_ref()),
            }),
            Err(e) => {
                warn!(
                    target: "textboard::service",
                    run,
                    tag,
                    step = record.step,
                    error = %e,
                    "Skipping undecodable text record"
                );
                None
            }
        }
    }
}

impl std::fmt::Debug for QueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryService")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish()
    }
}
