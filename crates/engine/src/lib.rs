//! Query engine for the text plugin
//!
//! This crate holds the plugin's behavior on top of the collaborator traits:
//! - IndexCache: last computed run → tag index, single-flight background refresh
//! - QueryService: tag listing (cached) and record listing (direct)
//! - Legacy merge: runs known only through per-run asset files
//! - Rendering: text arrays to sanitized HTML fragments and tables
//! - Config: `textboard.toml`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod config;
pub mod legacy;
pub mod render;
pub mod service;

pub use cache::{CacheStats, IndexCache};
pub use config::{TextPluginConfig, CONFIG_FILE_NAME};
pub use legacy::{legacy_runs_missing_from, merge_legacy_runs, parse_legacy_index};
pub use render::{escape_html, make_table, text_array_to_html, EscapingRenderer};
pub use service::{compute_index, current_index, QueryService};
