//! precache - cache-first handler for revisioned static assets
//!
//! Resolves request URLs to registered precache entries, serves the stored
//! response for the entry's revisioned cache key, and optionally falls back
//! to the network on a miss.

pub mod cli;
pub mod config;
pub mod error;
pub mod exchange;
pub mod fetch;
pub mod handler;
pub mod precache;
pub mod store;
pub mod ui;

pub use error::{PrecacheError, PrecacheResult};
