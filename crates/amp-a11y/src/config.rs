//! Session Configuration

use std::time::Duration;

use crate::{Locale, Messages, Politeness, Voice};

/// Reading-mode controller configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long an announcement stays in the live region
    pub announcement_lifetime: Duration,

    /// Delay before focus moves into a freshly opened modal
    pub initial_focus_delay: Duration,

    /// Delay before auto-read starts after opening
    pub auto_read_delay: Duration,

    /// Live region politeness
    pub politeness: Politeness,

    /// Number of past announcements kept for inspection
    pub history_limit: usize,

    /// Language of announcements and speech
    pub locale: Locale,

    /// Speech parameters
    pub voice: Voice,

    /// Announcement text
    pub messages: Messages,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            announcement_lifetime: Duration::from_millis(2000),
            initial_focus_delay: Duration::from_millis(50),
            auto_read_delay: Duration::from_millis(500),
            politeness: Politeness::Polite,
            history_limit: 100,
            locale: Locale::default(),
            voice: Voice::default(),
            messages: Messages::default(),
        }
    }
}

impl SessionConfig {
    /// Messages and voice language for `locale`
    pub fn for_locale(locale: Locale) -> Self {
        Self {
            locale,
            voice: Voice::for_locale(locale),
            messages: Messages::for_locale(locale),
            ..Default::default()
        }
    }
}
