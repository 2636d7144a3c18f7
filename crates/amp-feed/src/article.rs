//! Article Model
//!
//! Articles as delivered by the news API. Two articles with the same URL
//! are the same article.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Publisher of an article
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A news article
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Unique key across saved/liked/read sets
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Body text
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: Source,
}

impl PartialEq for Article {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Article {}

impl std::hash::Hash for Article {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

impl Article {
    pub fn new(url: &str, title: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
            description: None,
            content: None,
            url_to_image: None,
            published_at: None,
            source: Source::default(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn with_image(mut self, url: &str) -> Self {
        self.url_to_image = Some(url.to_string());
        self
    }

    pub fn with_published_at(mut self, at: DateTime<Utc>) -> Self {
        self.published_at = Some(at);
        self
    }

    pub fn with_source(mut self, name: &str) -> Self {
        self.source = Source { id: None, name: name.to_string() };
        self
    }

    /// Description, or body when the description is absent or blank
    pub fn summary(&self) -> &str {
        non_blank(self.description.as_deref())
            .or_else(|| non_blank(self.content.as_deref()))
            .unwrap_or("")
    }

    /// Text read aloud in reading mode: title, then summary
    pub fn speech_text(&self) -> String {
        format!("{}. {}", self.title, self.summary())
    }

    /// Case-insensitive match of `query` against title or description
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(&needle)
    }

    /// Placeholder title the API uses for retracted articles
    pub fn is_removed(&self) -> bool {
        self.title == "[Removed]"
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// NewsAPI sends explicit nulls for missing strings
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Timestamps outside RFC 3339 leave the article undated instead of
/// failing the whole payload
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(raw)) => raw,
        Some(serde_json::Value::Null) | None => return Ok(None),
        Some(other) => {
            tracing::debug!("Ignoring non-string publishedAt: {}", other);
            return Ok(None);
        }
    };

    let parsed = DateTime::parse_from_rfc3339(raw.trim())
        .map(|at| at.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
                .map(|naive| naive.and_utc())
        });
    if parsed.is_none() {
        tracing::debug!("Ignoring unparseable publishedAt {:?}", raw);
    }
    Ok(parsed)
}
