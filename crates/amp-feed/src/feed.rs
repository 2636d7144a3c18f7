//! Article Feed
//!
//! Holds the loaded articles for the current category and derives the
//! visible list from the search query and sort order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use url::Url;

use crate::{decode_top_headlines, demo_articles, Article, Category, FeedError, NewsApiRequest};

/// Sort order for the visible list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest first; undated articles last
    #[default]
    PublishedDesc,
    /// Title A-Z
    TitleAsc,
}

impl SortOrder {
    pub fn id(&self) -> &'static str {
        match self {
            Self::PublishedDesc => "publishedAt",
            Self::TitleAsc => "title",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim() {
            "publishedAt" | "date" => Some(Self::PublishedDesc),
            "title" => Some(Self::TitleAsc),
            _ => None,
        }
    }

    pub fn compare(&self, a: &Article, b: &Article) -> Ordering {
        match self {
            Self::PublishedDesc => b.published_at.cmp(&a.published_at),
            Self::TitleAsc => a
                .title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title)),
        }
    }
}

/// Host-supplied HTTP transport
pub trait FeedTransport {
    /// GET `url` and return the response body
    fn get(&mut self, url: &Url) -> Result<Vec<u8>, FeedError>;
}

/// Result of replacing the feed contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLoad {
    /// Articles loaded from the source
    Loaded { count: usize, category: Category },
    /// Loading failed; the demo set is shown instead
    Fallback { count: usize, reason: String },
}

/// Result of applying a search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Matches { count: usize, query: String },
    /// Empty query restored the full list
    Cleared,
}

/// Article feed
#[derive(Debug, Default)]
pub struct ArticleFeed {
    all: Vec<Article>,
    visible: Vec<Article>,
    category: Category,
    query: String,
    sort: SortOrder,
}

impl ArticleFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    pub fn set_sort_order(&mut self, sort: SortOrder) {
        self.sort = sort;
        self.visible.sort_by(|a, b| sort.compare(a, b));
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace all articles, clearing any search
    pub fn replace(&mut self, articles: Vec<Article>) -> usize {
        self.all = articles;
        self.query.clear();
        self.refresh();
        self.all.len()
    }

    /// Apply a load result, falling back to the demo set on error
    pub fn apply_load(
        &mut self,
        result: Result<Vec<Article>, FeedError>,
        now: DateTime<Utc>,
    ) -> FeedLoad {
        match result {
            Ok(articles) => {
                let count = self.replace(articles);
                tracing::info!("Loaded {} articles for {}", count, self.category.id());
                FeedLoad::Loaded { count, category: self.category }
            }
            Err(err) => {
                tracing::warn!("Feed load failed: {}", err);
                let count = self.replace(demo_articles(now));
                FeedLoad::Fallback { count, reason: err.to_string() }
            }
        }
    }

    /// Fetch the current category through `transport`
    pub fn fetch(
        &mut self,
        transport: &mut dyn FeedTransport,
        request: &NewsApiRequest,
        now: DateTime<Utc>,
    ) -> FeedLoad {
        let mut request = request.clone();
        request.category = self.category;
        let result = request
            .url()
            .and_then(|url| transport.get(&url))
            .and_then(|body| decode_top_headlines(&body));
        self.apply_load(result, now)
    }

    /// Filter by title/description; empty query restores the full list
    pub fn search(&mut self, query: &str) -> SearchOutcome {
        let query = query.trim();
        self.query = query.to_string();
        self.refresh();
        if query.is_empty() {
            SearchOutcome::Cleared
        } else {
            SearchOutcome::Matches { count: self.visible.len(), query: query.to_string() }
        }
    }

    /// Visible articles in display order
    pub fn articles(&self) -> &[Article] {
        &self.visible
    }

    pub fn get(&self, index: usize) -> Option<&Article> {
        self.visible.get(index)
    }

    pub fn find(&self, url: &str) -> Option<&Article> {
        self.all.iter().find(|a| a.url == url)
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    fn refresh(&mut self) {
        self.visible = if self.query.is_empty() {
            self.all.clone()
        } else {
            self.all.iter().filter(|a| a.matches(&self.query)).cloned().collect()
        };
        let sort = self.sort;
        self.visible.sort_by(|a, b| sort.compare(a, b));
    }
}
