//! Reader Application
//!
//! Wires the article feed, the user's preferences and the reading
//! session together. Every user-visible change is narrated through the
//! session's live region.

use std::time::Instant;

use amp_a11y::{
    ElementRegistry, FocusHost, KeyOutcome, KeyboardShortcut, LiveRegion, ReadingSessionController,
    SessionConfig, SessionView, SpeechEngine,
};
use amp_feed::{
    Article, ArticleFeed, Category, FeedError, FeedLoad, FeedTransport, NewsApiRequest,
    SearchOutcome, SortOrder,
};
use amp_prefs::{FontSize, PreferenceStore, Preferences, Toggle};
use chrono::{DateTime, Utc};

use crate::page::{self, MAIN_CONTENT, TARGETS};
use crate::{AppMessages, ReaderError};

/// Article card as rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRow {
    pub title: String,
    pub source: String,
    pub saved: bool,
    pub liked: bool,
    pub read: bool,
}

/// Everything the rendering surface needs
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderView {
    pub session: SessionView,
    pub dark_mode: bool,
    pub high_contrast: bool,
    pub reduced_motion: bool,
    pub font_size: FontSize,
    pub auto_read: bool,
    pub category: Category,
    pub sort: SortOrder,
    pub query: String,
    pub articles: Vec<ArticleRow>,
}

/// Reader application
#[derive(Debug)]
pub struct ReaderApp<E: SpeechEngine> {
    feed: ArticleFeed,
    request: NewsApiRequest,
    session: ReadingSessionController<E, ElementRegistry>,
    messages: AppMessages,
}

impl<E: SpeechEngine> ReaderApp<E> {
    pub fn new(
        config: SessionConfig,
        engine: E,
        prefs: Preferences,
        request: NewsApiRequest,
    ) -> Self {
        let messages = AppMessages::new(config.locale);
        let mut feed = ArticleFeed::new();
        feed.set_category(request.category);
        let page = page::build_page(0);
        let session = ReadingSessionController::new(config, engine, page, TARGETS, prefs);
        Self { feed, request, session, messages }
    }

    /// Mirror announcements to the host live region
    pub fn with_live_region(mut self, region: Box<dyn LiveRegion>) -> Self {
        self.session.announcer_mut().set_sink(region);
        self
    }

    /// Fetch the current category through `transport`
    pub fn fetch(
        &mut self,
        transport: &mut dyn FeedTransport,
        now: Instant,
        today: DateTime<Utc>,
    ) -> FeedLoad {
        let previous = self.feed.len();
        let outcome = self.feed.fetch(transport, &self.request, today);
        self.after_load(previous, &outcome, now);
        outcome
    }

    /// Replace the feed with an already decoded result
    pub fn load(
        &mut self,
        result: Result<Vec<Article>, FeedError>,
        now: Instant,
        today: DateTime<Utc>,
    ) -> FeedLoad {
        let previous = self.feed.len();
        let outcome = self.feed.apply_load(result, today);
        self.after_load(previous, &outcome, now);
        outcome
    }

    fn after_load(&mut self, previous: usize, outcome: &FeedLoad, now: Instant) {
        page::sync_articles(self.session.host_mut(), previous, self.feed.len());
        let message = match outcome {
            FeedLoad::Loaded { count, category } => self.messages.loaded(*count, *category),
            FeedLoad::Fallback { .. } => self.messages.load_failed(),
        };
        self.session.announce(message, now);
    }

    pub fn search(&mut self, query: &str, now: Instant) -> SearchOutcome {
        let previous = self.feed.len();
        let outcome = self.feed.search(query);
        page::sync_articles(self.session.host_mut(), previous, self.feed.len());
        let message = match &outcome {
            SearchOutcome::Matches { count, query } => self.messages.search_results(*count, query),
            SearchOutcome::Cleared => self.messages.search_cleared(),
        };
        self.session.announce(message, now);
        outcome
    }

    /// Switch category; the caller refetches
    pub fn set_category(&mut self, category: Category, now: Instant) {
        self.feed.set_category(category);
        self.request.category = category;
        self.session.announce(self.messages.category_changed(category), now);
    }

    pub fn set_sort(&mut self, sort: SortOrder, now: Instant) {
        self.feed.set_sort_order(sort);
        self.session.announce(self.messages.sort_changed(sort), now);
    }

    pub fn toggle_dark_mode(&mut self, now: Instant) -> bool {
        let prefs = self.session.preferences_mut();
        prefs.dark_mode = !prefs.dark_mode;
        let on = prefs.dark_mode;
        self.session.announce(self.messages.dark_mode(on), now);
        on
    }

    pub fn toggle_high_contrast(&mut self, now: Instant) -> bool {
        let prefs = self.session.preferences_mut();
        prefs.high_contrast = !prefs.high_contrast;
        let on = prefs.high_contrast;
        self.session.announce(self.messages.high_contrast(on), now);
        on
    }

    pub fn toggle_reduced_motion(&mut self, now: Instant) -> bool {
        let prefs = self.session.preferences_mut();
        prefs.reduced_motion = !prefs.reduced_motion;
        let on = prefs.reduced_motion;
        self.session.announce(self.messages.reduced_motion(on), now);
        on
    }

    /// Toggle reading aloud when reading mode opens
    pub fn toggle_auto_read(&mut self, now: Instant) -> bool {
        let prefs = self.session.preferences_mut();
        prefs.speech_enabled = !prefs.speech_enabled;
        let on = prefs.speech_enabled;
        self.session.announce(self.messages.auto_read(on), now);
        on
    }

    pub fn set_font_size(&mut self, size: FontSize, now: Instant) {
        self.session.preferences_mut().font_size = size;
        self.session.announce(self.messages.font_size(size), now);
    }

    /// Save or unsave the 1-based article `number`
    pub fn toggle_saved(&mut self, number: usize, now: Instant) -> Result<Toggle, ReaderError> {
        let article = self.article(number)?.clone();
        let toggle = self.session.preferences_mut().engagement.toggle_saved(&article);
        self.session.announce(self.messages.saved(toggle == Toggle::Added), now);
        Ok(toggle)
    }

    pub fn toggle_liked(&mut self, number: usize, now: Instant) -> Result<Toggle, ReaderError> {
        let article = self.article(number)?.clone();
        let toggle = self.session.preferences_mut().engagement.toggle_liked(&article);
        self.session.announce(self.messages.liked(toggle == Toggle::Added), now);
        Ok(toggle)
    }

    /// Open the 1-based article `number` from its card
    pub fn open(&mut self, number: usize, now: Instant) -> Result<bool, ReaderError> {
        let article = self.article(number)?.clone();
        if !self.session.is_open() {
            // Activation comes from the card's button
            self.session.host_mut().focus(page::article_button(number - 1));
        }
        Ok(self.session.open(&article, now))
    }

    pub fn close(&mut self, now: Instant) -> bool {
        self.session.close(now)
    }

    pub fn toggle_speech(&mut self, now: Instant) -> bool {
        self.session.toggle_speech(now)
    }

    pub fn handle_key(&mut self, key: &KeyboardShortcut, now: Instant) -> KeyOutcome {
        self.session.handle_key(key, now)
    }

    pub fn modal_mounted(&mut self, now: Instant) -> bool {
        self.session.modal_mounted(now)
    }

    pub fn tick(&mut self, now: Instant) {
        self.session.tick(now);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.session.next_deadline()
    }

    /// Skip link: jump to the main content region
    pub fn skip_to_main(&mut self, now: Instant) -> bool {
        let moved = self.session.host_mut().focus(MAIN_CONTENT);
        self.session.announce(self.messages.skip_to_main(), now);
        moved
    }

    /// Write preferences and engagement sets to `store`
    pub fn persist(&self, store: &mut dyn PreferenceStore) -> Result<(), ReaderError> {
        self.session.preferences().save(store)?;
        Ok(())
    }

    pub fn view(&self) -> ReaderView {
        let prefs = self.session.preferences();
        let articles = self
            .feed
            .articles()
            .iter()
            .map(|a| ArticleRow {
                title: a.title.clone(),
                source: a.source.name.clone(),
                saved: prefs.engagement.is_saved(&a.url),
                liked: prefs.engagement.is_liked(&a.url),
                read: prefs.engagement.is_read(&a.url),
            })
            .collect();

        ReaderView {
            session: self.session.view(),
            dark_mode: prefs.dark_mode,
            high_contrast: prefs.high_contrast,
            reduced_motion: prefs.reduced_motion,
            font_size: prefs.font_size,
            auto_read: prefs.speech_enabled,
            category: self.feed.category(),
            sort: self.feed.sort_order(),
            query: self.feed.query().to_string(),
            articles,
        }
    }

    fn article(&self, number: usize) -> Result<&Article, ReaderError> {
        number
            .checked_sub(1)
            .and_then(|i| self.feed.get(i))
            .ok_or(ReaderError::NoArticle(number))
    }

    pub fn feed(&self) -> &ArticleFeed {
        &self.feed
    }

    pub fn session(&self) -> &ReadingSessionController<E, ElementRegistry> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ReadingSessionController<E, ElementRegistry> {
        &mut self.session
    }

    pub fn messages(&self) -> &AppMessages {
        &self.messages
    }
}
