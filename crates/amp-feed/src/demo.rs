//! Demo articles shown when the feed cannot be loaded

use chrono::{DateTime, Duration, Utc};

use crate::Article;

/// Fallback set, newest first, stamped relative to `now`
pub fn demo_articles(now: DateTime<Utc>) -> Vec<Article> {
    vec![
        Article::new(
            "demo://ai-industry",
            "Advances in artificial intelligence reshape the tech industry",
        )
        .with_description(
            "New generative AI tools are changing how companies work and innovate. \
             This is a sample story for demonstrating the platform.",
        )
        .with_content("A full demonstration article about recent advances in artificial intelligence...")
        .with_image("https://images.unsplash.com/photo-1677442136019-21780ecad995?w=400&h=250&fit=crop")
        .with_published_at(now)
        .with_source("Tech News"),
        Article::new(
            "demo://markets-recover",
            "Financial markets show recovery after volatility",
        )
        .with_description(
            "Investors show renewed optimism after a week of uncertainty. \
             Full analysis of market trends.",
        )
        .with_content("A detailed article about the recovery of financial markets...")
        .with_image("https://images.unsplash.com/photo-1611974789855-9c2a0a7236a3?w=400&h=250&fit=crop")
        .with_published_at(now - Duration::days(1))
        .with_source("Business Today"),
        Article::new(
            "demo://digital-health",
            "Digital health innovations improve access to care",
        )
        .with_description(
            "Telemedicine and health apps extend care to remote areas, \
             widening access to quality treatment.",
        )
        .with_content("How technology is transforming the health sector...")
        .with_image("https://images.unsplash.com/photo-1576091160399-112ba8d25d1d?w=400&h=250&fit=crop")
        .with_published_at(now - Duration::days(2))
        .with_source("Health Watch"),
    ]
}
