//! HTTP-facing layer of the text plugin
//!
//! The host framework owns sockets, routing and query-string parsing. This
//! crate turns a routed `Request` into a JSON `Response`:
//! - **Plugin**: the trait a host mounts plugins through
//! - **TextPlugin**: tag listing and record listing routes
//!
//! ## Quick Start
//!
//! ```ignore
//! use textboard_api::{Plugin, Request, TextPlugin};
//!
//! let plugin = TextPlugin::new(store, TextPluginConfig::default())?;
//! let resp = plugin.handle(&Request::get("/text").arg("run", "demo").arg("tag", "greetings"));
//! assert_eq!(resp.status, 200);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod http;
pub mod plugin;

pub use http::{Request, Response, JSON_CONTENT_TYPE};
pub use plugin::{Plugin, TextPlugin};
