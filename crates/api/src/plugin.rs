//! The text plugin as the host sees it: a name, an activity check and two
//! JSON routes.
//!
//! - `GET /tags` → `{run: [tag, ...]}`
//! - `GET /text?run=R&tag=T` → `[{wall_time, step, text}, ...]`
//!
//! Missing or unknown run/tag arguments give an empty array with status 200.

use std::sync::Arc;

use textboard_core::{Multiplexer, Result, TextRecord};
use textboard_engine::{QueryService, TextPluginConfig};
use tracing::{error, warn};

use crate::http::{Request, Response};

/// Interface a host uses to mount a plugin
pub trait Plugin: Send + Sync {
    /// Name the plugin is registered under
    fn plugin_name(&self) -> &str;

    /// Whether the plugin has any data worth showing
    fn is_active(&self) -> bool;

    /// Route paths this plugin answers
    fn routes(&self) -> Vec<String>;

    /// Answer one routed request
    fn handle(&self, request: &Request) -> Response;
}

/// Text summaries plugin
#[derive(Debug)]
pub struct TextPlugin {
    service: QueryService,
}

impl TextPlugin {
    /// Create the plugin over a backing store.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the config does not validate.
    pub fn new(store: Arc<dyn Multiplexer>, config: TextPluginConfig) -> Result<Self> {
        Ok(Self::from_service(QueryService::new(store, config)?))
    }

    /// Wrap an already configured service.
    pub fn from_service(service: QueryService) -> Self {
        Self { service }
    }

    /// Underlying query service
    pub fn service(&self) -> &QueryService {
        &self.service
    }

    fn tags_route(&self) -> Response {
        match self.service.list_tags() {
            Ok(index) => Response::json(200, index.as_ref()),
            Err(e) => {
                error!(target: "textboard::api", error = %e, "Tag listing failed");
                Response::error(500, "tag listing failed")
            }
        }
    }

    fn text_route(&self, request: &Request) -> Response {
        let (run, tag) = match (request.query("run"), request.query("tag")) {
            (Some(run), Some(tag)) => (run, tag),
            _ => return Response::json::<[TextRecord]>(200, &[]),
        };
        match self.service.list_records(run, tag) {
            Ok(records) => Response::json(200, &records),
            Err(e) => {
                error!(
                    target: "textboard::api",
                    run,
                    tag,
                    error = %e,
                    "Record listing failed"
                );
                Response::error(500, "record listing failed")
            }
        }
    }
}

impl Plugin for TextPlugin {
    fn plugin_name(&self) -> &str {
        &self.service.config().plugin_name
    }

    fn is_active(&self) -> bool {
        self.service.is_active().unwrap_or_else(|e| {
            warn!(target: "textboard::api", error = %e, "Activity check failed");
            false
        })
    }

    fn routes(&self) -> Vec<String> {
        let config = self.service.config();
        vec![config.tags_route.clone(), config.text_route.clone()]
    }

    fn handle(&self, request: &Request) -> Response {
        let config = self.service.config();
        if request.path == config.tags_route {
            self.tags_route()
        } else if request.path == config.text_route {
            self.text_route(request)
        } else {
            Response::error(404, &format!("no route {}", request.path))
        }
    }
}
