//! Feed Module
//!
//! Build-time/request-time documents derived from the static story catalog:
//! the RSS feed and the sitemap. Neither touches the counter store; both are
//! regenerated in full on every request.
//!
//! ## Submodules
//! - **`catalog`**: the `Story` catalog loaded from `data/stories.json`.
//! - **`rss`**: RSS 2.0 rendering for published stories, newest first.
//! - **`sitemap`**: sitemap rendering with the site's priority policy.
//! - **`handlers`**: axum handlers serving the two XML documents.

pub mod catalog;
pub mod handlers;
pub mod rss;
pub mod sitemap;
