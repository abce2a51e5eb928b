//! Key command - print the cache key for a URL

use crate::cli::args::KeyArgs;
use crate::config::Config;
use crate::error::PrecacheResult;
use crate::precache::PrecacheEntry;

/// Execute the key command
pub async fn execute(args: KeyArgs, config: &Config) -> PrecacheResult<()> {
    let url = config.precache.scope()?.resolve(&args.url)?;
    let entry = PrecacheEntry::new(url, args.revision);
    println!("{}", entry.cache_key());
    Ok(())
}
