//! Live Region Announcements
//!
//! Single-slot announcement channel mirrored to the host's live region.
//! A new message replaces the visible one and restarts its expiry, so an
//! older deadline can never clear a newer message.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

/// Live region politeness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Politeness {
    #[default]
    Polite,
    Assertive,
}

impl Politeness {
    /// `aria-live` attribute value
    pub fn aria_value(&self) -> &'static str {
        match self {
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

/// Host live region
///
/// Written synchronously from the handler that produced the message.
pub trait LiveRegion {
    /// Replace the region text; empty text clears it
    fn update(&mut self, text: &str, politeness: Politeness);
}

/// Visible announcement
#[derive(Debug, Clone, PartialEq, Eq)]
struct Announcement {
    text: String,
    expires_at: Instant,
}

/// Single-slot, auto-expiring announcement channel
pub struct AnnouncementChannel {
    current: Option<Announcement>,
    lifetime: Duration,
    politeness: Politeness,
    history: VecDeque<String>,
    max_history: usize,
    sink: Option<Box<dyn LiveRegion>>,
}

impl fmt::Debug for AnnouncementChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnouncementChannel")
            .field("current", &self.current)
            .field("lifetime", &self.lifetime)
            .field("politeness", &self.politeness)
            .field("history", &self.history.len())
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl Default for AnnouncementChannel {
    fn default() -> Self {
        Self::new(Duration::from_secs(2), Politeness::Polite, 100)
    }
}

impl AnnouncementChannel {
    pub fn new(lifetime: Duration, politeness: Politeness, max_history: usize) -> Self {
        Self {
            current: None,
            lifetime,
            politeness,
            history: VecDeque::new(),
            max_history,
            sink: None,
        }
    }

    /// Attach the host live region
    pub fn with_sink(mut self, sink: Box<dyn LiveRegion>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn set_sink(&mut self, sink: Box<dyn LiveRegion>) {
        self.sink = Some(sink);
    }

    /// Replace the visible message and restart the expiry
    pub fn announce(&mut self, message: impl Into<String>, now: Instant) {
        let text = message.into();
        tracing::debug!("Announce: {}", text);

        // Replacing the slot drops the superseded deadline with it
        self.current = Some(Announcement {
            text: text.clone(),
            expires_at: now + self.lifetime,
        });

        if let Some(sink) = self.sink.as_mut() {
            sink.update(&text, self.politeness);
        }

        self.history.push_back(text);
        while self.history.len() > self.max_history {
            self.history.pop_front();
        }
    }

    /// Live text, or empty
    pub fn current_message(&self) -> &str {
        self.current.as_ref().map(|a| a.text.as_str()).unwrap_or("")
    }

    /// Pending expiry deadline
    pub fn deadline(&self) -> Option<Instant> {
        self.current.as_ref().map(|a| a.expires_at)
    }

    /// Clear the message if its deadline has passed
    ///
    /// Returns `true` once per expiry.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(a) if now >= a.expires_at => {
                self.current = None;
                if let Some(sink) = self.sink.as_mut() {
                    sink.update("", self.politeness);
                }
                true
            }
            _ => false,
        }
    }

    pub fn politeness(&self) -> Politeness {
        self.politeness
    }

    /// Messages emitted so far, oldest first
    pub fn history(&self) -> impl Iterator<Item = &str> + '_ {
        self.history.iter().map(String::as_str)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
