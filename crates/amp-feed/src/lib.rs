//! Amplifica Feed
//!
//! Article records and the feed that supplies them to the reading surface.
//!
//! Features:
//! - NewsAPI-compatible article model (URL is the identity)
//! - Categories, search filter, sort order
//! - Top-headlines request building and response decoding
//! - Demo fallback set when loading fails

pub mod article;
pub mod category;
pub mod demo;
pub mod feed;
pub mod newsapi;

pub use article::{Article, Source};
pub use category::Category;
pub use demo::demo_articles;
pub use feed::{ArticleFeed, FeedLoad, FeedTransport, SearchOutcome, SortOrder};
pub use newsapi::{decode_top_headlines, NewsApiRequest, MAX_ARTICLES};

/// Feed error
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("API error: {0}")]
    Api(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Transport error: {0}")]
    Transport(String),
}
