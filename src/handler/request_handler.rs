//! Cache-first request handler
//!
//! Per request, one linear pass:
//!
//! ```text
//! normalize → resolve entry ─┬─ none ─────────────── pass through (or error without fallback)
//!                            └─ entry → key → store ─┬─ hit ─── cached response
//!                                                    └─ miss ─┬─ fallback ── network response
//!                                                             └─ no fallback ─ MissingPrecacheEntry
//! ```

use crate::error::{PrecacheError, PrecacheResult};
use crate::exchange::{FetchEvent, Request, Response};
use crate::handler::controller::PrecacheController;
use crate::handler::factory::HandlerConfig;
use std::sync::Arc;
use tracing::{debug, info};

/// Arguments the interception layer passes for each request
#[derive(Debug, Clone, Copy)]
pub struct HandlerArgs<'a> {
    pub event: &'a FetchEvent,
    pub request: &'a Request,
}

/// What the handler produced for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// Stored response, returned unchanged
    Cached(Response),
    /// Network response after a cache miss, returned unchanged
    Network(Response),
    /// Not a precache candidate; routing outside the handler decides
    PassThrough,
}

impl HandlerOutcome {
    /// The response, unless the request passed through
    pub fn into_response(self) -> Option<Response> {
        match self {
            Self::Cached(response) | Self::Network(response) => Some(response),
            Self::PassThrough => None,
        }
    }

    /// Short label for where the response came from
    pub fn source(&self) -> &'static str {
        match self {
            Self::Cached(_) => "cache",
            Self::Network(_) => "network",
            Self::PassThrough => "pass-through",
        }
    }
}

/// Stateless handler; cheap to clone and safe to call concurrently
#[derive(Clone)]
pub struct RequestHandler {
    controller: Arc<PrecacheController>,
    config: HandlerConfig,
}

impl RequestHandler {
    pub fn new(controller: Arc<PrecacheController>, config: HandlerConfig) -> Self {
        Self { controller, config }
    }

    pub fn fallback_to_network(&self) -> bool {
        self.config.fallback_to_network
    }

    /// Handle one intercepted request
    pub async fn handle(&self, args: HandlerArgs<'_>) -> PrecacheResult<HandlerOutcome> {
        let HandlerArgs { event, request } = args;
        let controller = &self.controller;

        if !request.is_get() {
            debug!("{} {} is not a precache candidate", request.method, request.url);
            return Ok(HandlerOutcome::PassThrough);
        }

        let Some(entry) = controller.resolve(&request.url) else {
            if self.config.fallback_to_network {
                debug!("{} is not precached, passing through", request.url);
                return Ok(HandlerOutcome::PassThrough);
            }
            return Err(PrecacheError::missing_entry(
                request.url.as_str(),
                controller.cache_name(),
            ));
        };

        let key = entry.cache_key();
        debug!(
            "Resolved {} to {} (intercepted at {})",
            request.url,
            key,
            event.received_at.to_rfc3339()
        );

        if let Some(response) = controller.store().get(&key).await? {
            debug!("Serving {} from {}", key, controller.cache_name());
            return Ok(HandlerOutcome::Cached(response));
        }

        if !self.config.fallback_to_network {
            return Err(PrecacheError::missing_entry(
                request.url.as_str(),
                controller.cache_name(),
            ));
        }

        info!("Cache miss for {}, fetching {}", key, request.url);
        let response = controller.fetcher().fetch(&request.url).await?;
        Ok(HandlerOutcome::Network(response))
    }
}
