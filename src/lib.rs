//! textboard - text summary plugin for an experiment dashboard
//!
//! Serves text summaries stored in a host's backing store: a listing of which
//! runs hold which text tags, and the rendered records of one run/tag.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use textboard::{InMemoryMultiplexer, Plugin, Request, SummaryRecord, TextPlugin, TextPluginConfig};
//!
//! let store = Arc::new(InMemoryMultiplexer::new());
//! store.register_tag("demo", "greetings", "text", Vec::new());
//! store.append_record("demo", "greetings", SummaryRecord::scalar(100.0, 0, "hi"));
//!
//! let plugin = TextPlugin::new(store, TextPluginConfig::default())?;
//! let tags = plugin.handle(&Request::get("/tags"));
//! ```
//!
//! # Architecture
//!
//! - `textboard-core`: data model, errors, collaborator traits
//! - `textboard-storage`: in-memory reference store and on-disk legacy assets
//! - `textboard-engine`: the single-flight tag index cache and query service
//! - `textboard-api`: request routing and JSON responses

pub use textboard_api::{Plugin, Request, Response, TextPlugin, JSON_CONTENT_TYPE};
pub use textboard_core::{
    Error, Multiplexer, PayloadDecoder, Renderer, Result, Run, RunAssets, RunTagContent,
    StringTensorDecoder, SummaryRecord, Tag, TagIndex, TensorPayload, TextArray, TextRecord,
    MAX_TEXT_ELEMENTS,
};
pub use textboard_engine::{
    compute_index, current_index, CacheStats, EscapingRenderer, IndexCache, QueryService,
    TextPluginConfig, CONFIG_FILE_NAME,
};
pub use textboard_storage::{InMemoryMultiplexer, PluginAssetDir};
