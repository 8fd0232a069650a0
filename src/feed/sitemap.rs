use chrono::{DateTime, Utc};

use super::catalog::Catalog;
use super::rss::story_url;

pub const CHANGE_FREQUENCY: &str = "weekly";

/// Three-tier priority rule: home page highest, story pages next, everything
/// else default.
pub fn priority_for(site_url: &str, url: &str) -> f64 {
    let home = format!("{}/", site_url.trim_end_matches('/'));
    if url == home {
        1.0
    } else if url.contains("/stories/") {
        0.9
    } else {
        0.7
    }
}

struct SitemapUrl {
    loc: String,
    lastmod: Option<DateTime<Utc>>,
}

/// Renders the sitemap for the home page and every story page in the
/// catalog.
pub fn render_sitemap(site_url: &str, catalog: &Catalog) -> String {
    let site = site_url.trim_end_matches('/');

    let mut urls = vec![SitemapUrl {
        loc: format!("{}/", site),
        lastmod: None,
    }];
    urls.extend(catalog.stories().iter().map(|story| SitemapUrl {
        loc: story_url(site, &story.slug),
        lastmod: story.published_at(),
    }));

    let mut document = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for url in urls {
        document.push_str("  <url>\n");
        document.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&url.loc)));
        if let Some(lastmod) = url.lastmod {
            document.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                lastmod.format("%Y-%m-%d")
            ));
        }
        document.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            CHANGE_FREQUENCY
        ));
        document.push_str(&format!(
            "    <priority>{:.1}</priority>\n",
            priority_for(site, &url.loc)
        ));
        document.push_str("  </url>\n");
    }
    document.push_str("</urlset>\n");
    document
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
