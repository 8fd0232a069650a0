use axum::http::HeaderValue;
use axum::{Extension, Router, routing::get};
use clap::Parser;
use std::sync::Arc;

use aifiles_api::config::Args;
use aifiles_api::counters::handlers::counter_resource;
use aifiles_api::counters::service::CounterService;
use aifiles_api::counters::types::{FEEDBACK, REACTIONS};
use aifiles_api::feed::catalog::Catalog;
use aifiles_api::feed::handlers::{FeedContext, handle_feed, handle_sitemap};
use aifiles_api::store::HashStore;
use aifiles_api::store::memory::MemoryStore;
use aifiles_api::store::upstash::UpstashStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .init();

    if let Err(e) = args.validate() {
        tracing::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // 1. Story catalog (read-only, feeds the XML documents):
    let catalog = Catalog::load(&args.stories)?;
    tracing::info!(
        "Loaded {} stories from {}",
        catalog.len(),
        args.stories.display()
    );

    // 2. Hash store (all counter state lives here):
    let store: Arc<dyn HashStore> = if args.dev_mode {
        tracing::warn!("Dev mode: counters held in memory, not persisted");
        Arc::new(MemoryStore::new())
    } else {
        // validate() guarantees both secrets are present here.
        Arc::new(UpstashStore::new(
            args.kv_rest_api_url.as_deref().unwrap_or_default(),
            args.kv_rest_api_token.as_deref().unwrap_or_default(),
        ))
    };

    // 3. Counter services, one per family over the same store:
    let feedback = Arc::new(CounterService::new(FEEDBACK, store.clone()));
    let reactions = Arc::new(CounterService::new(REACTIONS, store));

    let allow_origin = HeaderValue::from_str(&args.allow_origin)?;

    let feed_context = Arc::new(FeedContext {
        site_url: args.site_url.clone(),
        catalog,
    });

    // 4. HTTP Router:
    let app = Router::new()
        .route(
            "/api/feedback",
            counter_resource(feedback, allow_origin.clone()),
        )
        .route("/api/reactions", counter_resource(reactions, allow_origin))
        .route("/feed.xml", get(handle_feed))
        .route("/sitemap.xml", get(handle_sitemap))
        .layer(Extension(feed_context));

    tracing::info!("Site root: {}", args.site_url);
    tracing::info!("Allowed origin: {}", args.allow_origin);
    tracing::info!("HTTP server listening on {}", args.listen);

    // 5. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
