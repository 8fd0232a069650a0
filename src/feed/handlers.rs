use axum::Extension;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use super::catalog::Catalog;
use super::{rss, sitemap};

/// Read-only context shared by the feed and sitemap handlers.
pub struct FeedContext {
    pub site_url: String,
    pub catalog: Catalog,
}

pub async fn handle_feed(Extension(context): Extension<Arc<FeedContext>>) -> Response {
    let document = rss::render_feed(&context.site_url, &context.catalog);
    (
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        document,
    )
        .into_response()
}

pub async fn handle_sitemap(Extension(context): Extension<Arc<FeedContext>>) -> Response {
    let document = sitemap::render_sitemap(&context.site_url, &context.catalog);
    ([(header::CONTENT_TYPE, "application/xml")], document).into_response()
}
