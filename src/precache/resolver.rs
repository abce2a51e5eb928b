//! Precache entry lookup abstraction

use crate::precache::entry::PrecacheEntry;
use url::Url;

/// Maps a normalized request URL to the entry registered for it.
///
/// Registered URLs must be keyed with the same normalization the controller
/// applies to requests.
///
/// Implementations must be pure from the handler's point of view: the same
/// URL yields the same entry until the registration side changes it.
pub trait EntryResolver: Send + Sync {
    /// Find the entry registered for `url`
    fn lookup(&self, url: &Url) -> Option<PrecacheEntry>;
}
