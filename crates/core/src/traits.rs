//! Collaborator traits the plugin is wired against
//!
//! The host framework owns data ingestion, storage and markup sanitization.
//! These traits are the seams: the engine is written against them, and the
//! host (or a test) supplies the implementations.

use crate::error::Result;
use crate::tensor::{decode_text_array, TensorPayload, TextArray};
use crate::types::{RunAssets, RunTagContent, SummaryRecord};

/// Backing data store ("multiplexer")
///
/// Thread safety: all methods may be called concurrently from request
/// threads and from the background index refresh (requires Send + Sync).
/// Calls may block on I/O.
pub trait Multiplexer: Send + Sync {
    /// Current-format listing for a plugin: run → (tag → plugin content)
    ///
    /// Runs with no tags for the plugin may appear with an empty map.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn plugin_run_to_tag_to_content(&self, plugin_name: &str) -> Result<RunTagContent>;

    /// All records stored under (run, tag), in store order
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the run/tag combination is unknown.
    fn summary_records(&self, run: &str, tag: &str) -> Result<Vec<SummaryRecord>>;

    /// Legacy per-run asset listing for a plugin directory
    ///
    /// # Errors
    ///
    /// Returns an error if the asset storage cannot be listed.
    fn plugin_assets(&self, plugin_dir: &str) -> Result<RunAssets>;

    /// Contents of one legacy asset
    ///
    /// # Errors
    ///
    /// Returns `Error::AssetNotFound` if the asset does not exist, or an I/O
    /// error if it cannot be read.
    fn retrieve_plugin_asset(&self, run: &str, plugin_dir: &str, asset: &str) -> Result<Vec<u8>>;
}

/// Turns untrusted text into safe HTML
pub trait Renderer: Send + Sync {
    /// Render one string; the output must be safe to embed in a page
    fn render(&self, text: &str) -> String;
}

/// Decodes a stored payload into text
pub trait PayloadDecoder: Send + Sync {
    /// Decode a raw payload
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` if the payload is inconsistent.
    fn decode(&self, payload: &TensorPayload) -> Result<TextArray>;
}

/// Decoder for string tensors as laid out by `TensorPayload`
#[derive(Debug, Clone, Copy, Default)]
pub struct StringTensorDecoder;

impl PayloadDecoder for StringTensorDecoder {
    fn decode(&self, payload: &TensorPayload) -> Result<TextArray> {
        decode_text_array(payload)
    }
}

impl<M: Multiplexer + ?Sized> Multiplexer for std::sync::Arc<M> {
    fn plugin_run_to_tag_to_content(&self, plugin_name: &str) -> Result<RunTagContent> {
        (**self).plugin_run_to_tag_to_content(plugin_name)
    }

    fn summary_records(&self, run: &str, tag: &str) -> Result<Vec<SummaryRecord>> {
        (**self).summary_records(run, tag)
    }

    fn plugin_assets(&self, plugin_dir: &str) -> Result<RunAssets> {
        (**self).plugin_assets(plugin_dir)
    }

    fn retrieve_plugin_asset(&self, run: &str, plugin_dir: &str, asset: &str) -> Result<Vec<u8>> {
        (**self).retrieve_plugin_asset(run, plugin_dir, asset)
    }
}
