//! Request handling: cache first, network optional
//!
//! [`PrecacheController`] binds the collaborators; [`create_handler`]
//! produces a [`RequestHandler`] with a fixed fallback policy.
//!
//! | Store | Fallback | Result |
//! |-------|----------|--------|
//! | hit | any | cached response, no fetch |
//! | miss | on | network response for the original URL |
//! | miss | off | `MissingPrecacheEntry` |

mod controller;
mod factory;
mod request_handler;

pub use controller::PrecacheController;
pub use factory::{create_handler, HandlerConfig};
pub use request_handler::{HandlerArgs, HandlerOutcome, RequestHandler};
