//! Manifest command - list entries and their cache keys

use crate::cli::args::{ManifestArgs, OutputFormat};
use crate::cli::commands::load_manifest;
use crate::config::Config;
use crate::error::PrecacheResult;
use crate::precache::PrecacheManifest;
use crate::ui::{self, UiContext};
use console::style;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryRow<'a> {
    url: &'a str,
    revision: Option<&'a str>,
    cache_key: String,
}

/// Execute the manifest command
pub async fn execute(args: ManifestArgs, config: &Config) -> PrecacheResult<()> {
    let manifest = load_manifest(config, args.manifest.as_deref()).await?;

    if manifest.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => ui::step_info(&UiContext::detect(), "Manifest is empty"),
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&manifest),
        OutputFormat::Json => print_json(&manifest)?,
        OutputFormat::Plain => print_plain(&manifest),
    }

    Ok(())
}

fn print_table(manifest: &PrecacheManifest) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Precache manifest");

    println!(
        "{:<40} {:<12} {}",
        style("URL").bold(),
        style("REVISION").bold(),
        style("CACHE KEY").bold()
    );
    println!("{}", "-".repeat(80));

    for entry in manifest.entries() {
        println!(
            "{:<40} {:<12} {}",
            entry.url.as_str(),
            entry.revision.as_deref().unwrap_or("-"),
            style(entry.cache_key()).dim()
        );
    }

    println!();
    println!("{} entr{}", manifest.len(), if manifest.len() == 1 { "y" } else { "ies" });
}

fn print_json(manifest: &PrecacheManifest) -> PrecacheResult<()> {
    let rows: Vec<_> = manifest
        .entries()
        .map(|entry| EntryRow {
            url: entry.url.as_str(),
            revision: entry.revision.as_deref(),
            cache_key: entry.cache_key().to_string(),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn print_plain(manifest: &PrecacheManifest) {
    for key in manifest.cache_keys() {
        println!("{}", key);
    }
}
