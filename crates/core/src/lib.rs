//! Core types and traits for textboard
//!
//! This crate defines the foundational types used throughout the workspace:
//! - Run / Tag: opaque identifiers
//! - TagIndex: the run → tags mapping served by the tags route
//! - SummaryRecord / TextRecord: stored and served data points
//! - TensorPayload / TextArray: string tensors and their decoding
//! - Error: Error type hierarchy
//! - Traits: Multiplexer, Renderer, PayloadDecoder

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod tensor;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use tensor::{decode_text_array, TensorPayload, TextArray, MAX_TEXT_ELEMENTS};
pub use traits::{Multiplexer, PayloadDecoder, Renderer, StringTensorDecoder};
pub use types::{
    Run, RunAssets, RunTagContent, SummaryRecord, Tag, TagContent, TagIndex, TextRecord,
};
