//! Fetch command - run requests through the precache handler

use crate::cli::args::FetchArgs;
use crate::cli::commands::{build_controller, load_manifest};
use crate::config::Config;
use crate::error::{PrecacheError, PrecacheResult};
use crate::exchange::{FetchEvent, Request, Response};
use crate::handler::{HandlerArgs, PrecacheController, RequestHandler};
use crate::ui::{self, UiContext};
use futures_util::future::join_all;
use tokio::fs;
use tracing::debug;

/// Execute the fetch command
pub async fn execute(args: FetchArgs, config: &Config) -> PrecacheResult<()> {
    if args.output.is_some() && args.urls.len() > 1 {
        return Err(PrecacheError::User(
            "--output can only be used with a single URL".to_string(),
        ));
    }

    let manifest = load_manifest(config, args.manifest.as_deref()).await?;
    let requests = args
        .urls
        .iter()
        .map(|url| manifest.scope().resolve(url).map(Request::get))
        .collect::<PrecacheResult<Vec<_>>>()?;

    let controller = build_controller(config, manifest)?;
    let fallback = config.precache.fallback_to_network && !args.no_fallback;
    let handler = controller.create_handler(fallback);
    debug!("Handling {} request(s), fallback {}", requests.len(), fallback);

    let event = FetchEvent::new();
    let results = join_all(
        requests
            .iter()
            .map(|request| handle_one(&handler, &controller, &event, request)),
    )
    .await;

    let ctx = UiContext::detect();
    let total = results.len();
    let mut failures = Vec::new();

    for (request, result) in requests.iter().zip(results) {
        match result {
            Ok((source, response)) => {
                ui::step_ok_detail(
                    &ctx,
                    &format!("{} {}", response.status, request.url),
                    &format!("{}, {} bytes", source, response.body.len()),
                );
                if let Some(path) = &args.output {
                    fs::write(path, &response.body).await.map_err(|e| {
                        PrecacheError::io(format!("writing {}", path.display()), e)
                    })?;
                    ui::remark(&ctx, &format!("Body written to {}", path.display()));
                }
            }
            Err(e) => {
                ui::step_error_detail(&ctx, request.url.as_str(), &e.to_string());
                failures.push(e);
            }
        }
    }

    match failures.len() {
        0 => Ok(()),
        1 => Err(failures.remove(0)),
        n => Err(PrecacheError::User(format!(
            "{} of {} requests failed",
            n, total
        ))),
    }
}

/// Run one request; pass-through requests go straight to the network
async fn handle_one(
    handler: &RequestHandler,
    controller: &PrecacheController,
    event: &FetchEvent,
    request: &Request,
) -> PrecacheResult<(&'static str, Response)> {
    let outcome = handler.handle(HandlerArgs { event, request }).await?;
    let source = outcome.source();

    match outcome.into_response() {
        Some(response) => Ok((source, response)),
        None => {
            let response = controller.fetcher().fetch(&request.url).await?;
            Ok(("network, not precached", response))
        }
    }
}
