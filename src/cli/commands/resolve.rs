//! Resolve command - show which entry a request URL maps to

use crate::cli::args::ResolveArgs;
use crate::cli::commands::{build_controller, load_manifest};
use crate::config::Config;
use crate::error::PrecacheResult;
use crate::ui::{self, UiContext};

/// Execute the resolve command
pub async fn execute(args: ResolveArgs, config: &Config) -> PrecacheResult<()> {
    let ctx = UiContext::detect();
    let manifest = load_manifest(config, args.manifest.as_deref()).await?;
    let url = manifest.scope().resolve(&args.url)?;
    let controller = build_controller(config, manifest)?;

    ui::intro(&ctx, "Resolve");
    ui::key_value(&ctx, "Request", url.as_str());
    ui::key_value(&ctx, "Cache", controller.cache_name());

    let Some(entry) = controller.resolve(&url) else {
        ui::step_warn_hint(
            &ctx,
            "Not precached",
            "Add the URL to the manifest to serve it cache-first",
        );
        return Ok(());
    };

    ui::key_value(&ctx, "Entry", entry.url.as_str());
    ui::key_value(&ctx, "Revision", entry.revision.as_deref().unwrap_or("-"));
    ui::key_value(&ctx, "Cache key", entry.cache_key().as_str());

    let stored = controller.match_precache(&url).await?;
    match stored {
        Some(response) => ui::key_value_status(
            &ctx,
            "Stored",
            &format!("yes ({}, {} bytes)", response.status, response.body.len()),
            true,
        ),
        None => ui::key_value_status(&ctx, "Stored", "no", false),
    }

    Ok(())
}
