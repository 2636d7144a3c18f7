//! Engagement Sets
//!
//! Saved, liked and read articles, keyed by URL and kept in insertion
//! order. Saved and liked toggle; read only grows.

use amp_feed::Article;
use serde::{Deserialize, Serialize};

/// Result of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// URL-keyed article set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngagementSet {
    articles: Vec<Article>,
}

impl EngagementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.articles.iter().any(|a| a.url == url)
    }

    /// Insert unless an article with the same URL is present
    pub fn insert(&mut self, article: &Article) -> bool {
        if self.contains(&article.url) {
            return false;
        }
        self.articles.push(article.clone());
        true
    }

    pub fn remove(&mut self, url: &str) -> bool {
        let before = self.articles.len();
        self.articles.retain(|a| a.url != url);
        self.articles.len() != before
    }

    pub fn toggle(&mut self, article: &Article) -> Toggle {
        if self.remove(&article.url) {
            Toggle::Removed
        } else {
            self.articles.push(article.clone());
            Toggle::Added
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Article> {
        self.articles.iter()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.articles)
    }

    /// Lenient decode
    ///
    /// Absent or malformed data yields an empty set. Entries that are not
    /// articles are skipped and duplicate URLs collapse to the first.
    pub fn from_json_lossy(raw: Option<&str>, key: &str) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        let entries: Vec<serde_json::Value> = match serde_json::from_str(raw) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("Malformed {} data, using empty set: {}", key, err);
                return Self::default();
            }
        };

        let mut set = Self::default();
        let mut skipped = 0usize;
        for entry in entries {
            match serde_json::from_value::<Article>(entry) {
                Ok(article) => {
                    set.insert(&article);
                }
                Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::warn!("Skipped {} malformed entries in {}", skipped, key);
        }
        set
    }
}

/// The three engagement sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngagementSets {
    pub saved: EngagementSet,
    pub liked: EngagementSet,
    pub read: EngagementSet,
}

impl EngagementSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_saved(&mut self, article: &Article) -> Toggle {
        self.saved.toggle(article)
    }

    pub fn toggle_liked(&mut self, article: &Article) -> Toggle {
        self.liked.toggle(article)
    }

    /// Returns `false` if the article was already read
    pub fn mark_read(&mut self, article: &Article) -> bool {
        self.read.insert(article)
    }

    pub fn is_saved(&self, url: &str) -> bool {
        self.saved.contains(url)
    }

    pub fn is_liked(&self, url: &str) -> bool {
        self.liked.contains(url)
    }

    pub fn is_read(&self, url: &str) -> bool {
        self.read.contains(url)
    }
}
