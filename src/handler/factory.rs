//! Handler factory
//!
//! Creating a handler only captures its configuration; nothing is read
//! from the store or the network until a request is handled.

use crate::handler::controller::PrecacheController;
use crate::handler::request_handler::RequestHandler;
use std::sync::Arc;

/// Handler configuration, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Fetch from the network when the store has no response
    pub fallback_to_network: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            fallback_to_network: true,
        }
    }
}

/// Create a request handler bound to `controller`
pub fn create_handler(controller: Arc<PrecacheController>, config: HandlerConfig) -> RequestHandler {
    RequestHandler::new(controller, config)
}
