//! NewsAPI top-headlines
//!
//! Request building and response decoding. The transport itself is
//! supplied by the host (see [`crate::FeedTransport`]).

use serde::Deserialize;
use url::Url;

use crate::{Article, Category, FeedError};

/// Maximum number of articles kept from one response
pub const MAX_ARTICLES: usize = 12;

const DEFAULT_ENDPOINT: &str = "https://newsapi.org/v2/top-headlines";
const PLACEHOLDER_KEY: &str = "your_api_key_here";

/// Top-headlines request
#[derive(Debug, Clone)]
pub struct NewsApiRequest {
    pub endpoint: String,
    pub country: String,
    pub category: Category,
    pub api_key: Option<String>,
}

impl Default for NewsApiRequest {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            country: "us".to_string(),
            category: Category::General,
            api_key: None,
        }
    }
}

impl NewsApiRequest {
    pub fn new(category: Category) -> Self {
        Self { category, ..Default::default() }
    }

    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    /// Build the request URL
    pub fn url(&self) -> Result<Url, FeedError> {
        let key = match self.api_key.as_deref() {
            Some(k) if !k.is_empty() && k != PLACEHOLDER_KEY => k,
            _ => return Err(FeedError::MissingApiKey),
        };

        let mut url = Url::parse(&self.endpoint)?;
        url.query_pairs_mut()
            .append_pair("country", &self.country)
            .append_pair("category", self.category.id())
            .append_pair("apiKey", key);
        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct TopHeadlines {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

/// Decode a top-headlines body
///
/// Keeps the first [`MAX_ARTICLES`] entries and drops retracted ones.
pub fn decode_top_headlines(body: &[u8]) -> Result<Vec<Article>, FeedError> {
    let response: TopHeadlines = serde_json::from_slice(body)?;

    if response.status != "ok" {
        return Err(FeedError::Api(
            response.message.unwrap_or_else(|| "unexpected API response".to_string()),
        ));
    }

    let articles: Vec<Article> = response
        .articles
        .into_iter()
        .take(MAX_ARTICLES)
        .filter(|a| !a.is_removed())
        .collect();

    tracing::debug!("Decoded {} articles", articles.len());
    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let req = NewsApiRequest::new(Category::Health).with_api_key("k123");
        let url = req.url().unwrap();
        assert_eq!(url.host_str(), Some("newsapi.org"));
        let query = url.query().unwrap();
        assert!(query.contains("country=us"));
        assert!(query.contains("category=health"));
        assert!(query.contains("apiKey=k123"));
    }

    #[test]
    fn test_missing_or_placeholder_key() {
        assert!(matches!(NewsApiRequest::default().url(), Err(FeedError::MissingApiKey)));
        let placeholder = NewsApiRequest::default().with_api_key("your_api_key_here");
        assert!(matches!(placeholder.url(), Err(FeedError::MissingApiKey)));
    }

    #[test]
    fn test_decode_truncates_and_drops_removed() {
        let mut entries = Vec::new();
        for i in 0..15 {
            let title = if i == 1 { "[Removed]".to_string() } else { format!("Story {i}") };
            entries.push(serde_json::json!({
                "url": format!("https://n.example/{i}"),
                "title": title,
            }));
        }
        let body = serde_json::json!({ "status": "ok", "articles": entries }).to_string();

        let articles = decode_top_headlines(body.as_bytes()).unwrap();
        assert_eq!(articles.len(), MAX_ARTICLES - 1);
        assert!(articles.iter().all(|a| !a.is_removed()));
        assert_eq!(articles[0].title, "Story 0");
    }

    #[test]
    fn test_decode_api_error() {
        let body = br#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid"}"#;
        match decode_top_headlines(body) {
            Err(FeedError::Api(msg)) => assert_eq!(msg, "Your API key is invalid"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_bad_timestamp_keeps_the_feed() {
        let body = br#"{
            "status": "ok",
            "articles": [
                {"url": "u/1", "title": "Dated", "publishedAt": "2024-05-02T10:00:00Z"},
                {"url": "u/2", "title": "Odd date", "publishedAt": "02/05/2024 at ten"}
            ]
        }"#;
        let articles = decode_top_headlines(body).unwrap();
        assert_eq!(articles.len(), 2);
        assert!(articles[0].published_at.is_some());
        assert!(articles[1].published_at.is_none());
    }

    #[test]
    fn test_decode_malformed() {
        assert!(matches!(decode_top_headlines(b"not json"), Err(FeedError::Decode(_))));
    }
}
