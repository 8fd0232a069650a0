use rss::{CategoryBuilder, ChannelBuilder, ItemBuilder};

use super::catalog::Catalog;

pub const FEED_TITLE: &str = "The AI Files";
pub const FEED_DESCRIPTION: &str = "True stories from the age of artificial intelligence — documented incidents, landmark moments, and cautionary tales.";
pub const FEED_LANGUAGE: &str = "en-us";
pub const STORY_PATH_PREFIX: &str = "/stories";

pub fn story_url(site_url: &str, slug: &str) -> String {
    format!(
        "{}{}/{}",
        site_url.trim_end_matches('/'),
        STORY_PATH_PREFIX,
        slug
    )
}

/// Renders the RSS document: one item per published story, newest first.
pub fn render_feed(site_url: &str, catalog: &Catalog) -> String {
    let items: Vec<rss::Item> = catalog
        .published()
        .into_iter()
        .map(|(story, published_at)| {
            let categories: Vec<rss::Category> = story
                .tags
                .iter()
                .map(|tag| CategoryBuilder::default().name(tag.clone()).build())
                .collect();

            ItemBuilder::default()
                .title(Some(story.title.clone()))
                .link(Some(story_url(site_url, &story.slug)))
                .pub_date(Some(published_at.to_rfc2822()))
                .description(Some(story.deck.clone()))
                .categories(categories)
                .build()
        })
        .collect();

    ChannelBuilder::default()
        .title(FEED_TITLE)
        .link(site_url.trim_end_matches('/').to_string())
        .description(FEED_DESCRIPTION)
        .language(Some(FEED_LANGUAGE.to_string()))
        .items(items)
        .build()
        .to_string()
}
