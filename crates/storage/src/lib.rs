//! Storage layer for textboard
//!
//! Reference implementations of the backing store the plugin reads from:
//! - InMemoryMultiplexer: runs, tags and records behind a `RwLock`
//! - PluginAssetDir: legacy per-run plugin assets on disk
//!
//! A host embeds its own `Multiplexer`; these exist so the engine can be run
//! and tested without one.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assets;
pub mod memory;

pub use assets::{PluginAssetDir, PLUGINS_DIR};
pub use memory::InMemoryMultiplexer;
