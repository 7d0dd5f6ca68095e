//! Integration tests for the text plugin
//!
//! Exercises the tag index cache, query service and HTTP surface together
//! over the in-memory store.
//!
//! ```bash
//! cargo test --test text_plugin
//! ```

#[path = "../common/mod.rs"]
mod common;

mod end_to_end;
mod listing;
