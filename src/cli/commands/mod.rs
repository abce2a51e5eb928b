//! CLI command implementations

pub mod config;
pub mod fetch;
pub mod key;
pub mod manifest;
pub mod resolve;

pub use config::execute as config;
pub use fetch::execute as fetch;
pub use key::execute as key;
pub use manifest::execute as manifest;
pub use resolve::execute as resolve;

use crate::config::Config;
use crate::error::PrecacheResult;
use crate::fetch::HttpFetcher;
use crate::handler::PrecacheController;
use crate::precache::PrecacheManifest;
use crate::store::DiskStore;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Load the manifest named on the command line, falling back to config.
///
/// Entries are keyed with the configured normalizer, the same one the
/// controller applies to requests.
///
/// With neither set, an empty manifest is used and every request misses.
async fn load_manifest(
    config: &Config,
    override_path: Option<&Path>,
) -> PrecacheResult<PrecacheManifest> {
    let scope = config.precache.scope()?;

    match override_path.or(config.precache.manifest.as_deref()) {
        Some(path) => {
            PrecacheManifest::load_with(path, scope, config.precache.normalizer()).await
        }
        None => {
            warn!("No manifest configured, nothing is precached");
            PrecacheManifest::new(scope).with_normalizer(config.precache.normalizer())
        }
    }
}

/// Controller over the on-disk store and the HTTP fetcher
fn build_controller(
    config: &Config,
    manifest: PrecacheManifest,
) -> PrecacheResult<Arc<PrecacheController>> {
    let namespace = config.precache.namespace()?;
    let store = DiskStore::open(&config.precache.cache_dir(), &namespace);
    let fetcher = HttpFetcher::new(&config.network);

    let controller = PrecacheController::new(Arc::new(manifest), Arc::new(store), Arc::new(fetcher))
        .with_normalizer(config.precache.normalizer());
    Ok(Arc::new(controller))
}
