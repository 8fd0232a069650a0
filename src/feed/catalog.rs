use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub iso_date: Option<String>,
    /// One-line summary shown under the title; doubles as the feed item
    /// description.
    pub deck: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Story {
    /// Publication timestamp, if the story has one. The catalog uses bare
    /// `YYYY-MM-DD` dates; full RFC 3339 timestamps are accepted too.
    /// An unparseable date counts as unpublished.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.iso_date.as_deref()?;

        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(timestamp.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

/// The static story catalog. Read once at startup, read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    stories: Vec<Story>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read story catalog {}", path.display()))?;
        let catalog = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse story catalog {}", path.display()))?;
        Ok(catalog)
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Stories with a publication timestamp, newest first. Ties keep the
    /// catalog's order.
    pub fn published(&self) -> Vec<(&Story, DateTime<Utc>)> {
        let mut published: Vec<_> = self
            .stories
            .iter()
            .filter_map(|story| story.published_at().map(|at| (story, at)))
            .collect();
        published.sort_by(|a, b| b.1.cmp(&a.1));
        published
    }
}
