//! Edge case tests for amp-reader
//!
//! Feed loading through transports, persistence across restarts,
//! end-to-end reading sessions.

use std::time::{Duration, Instant};

use amp_a11y::{
    FocusHost, KeyOutcome, KeyboardShortcut, MockSpeechEngine, SessionConfig, SessionState,
    SpeechStatus,
};
use amp_feed::{Category, FeedLoad, NewsApiRequest};
use amp_prefs::{JsonFileStore, Preferences};
use amp_reader::page::{article_button, MODAL_CLOSE, MODAL_SPEAK};
use amp_reader::*;
use chrono::Utc;

const RESPONSE: &str = r#"{
    "status": "ok",
    "totalResults": 3,
    "articles": [
        {
            "source": {"id": null, "name": "Wire"},
            "author": null,
            "title": "Rivers rise after storms",
            "description": "Flood warnings issued downstream.",
            "url": "https://wire.example/rivers",
            "urlToImage": null,
            "publishedAt": "2024-05-02T10:00:00Z",
            "content": null
        },
        {
            "source": {"id": null, "name": "[Removed]"},
            "title": "[Removed]",
            "description": null,
            "url": "https://removed.com",
            "publishedAt": "2024-05-02T09:00:00Z"
        },
        {
            "source": {"id": "daily", "name": "Daily"},
            "title": "Budget vote delayed",
            "description": null,
            "url": "https://daily.example/budget",
            "publishedAt": "2024-05-01T08:00:00Z",
            "content": "Lawmakers postponed the vote."
        }
    ]
}"#;

fn request() -> NewsApiRequest {
    NewsApiRequest { api_key: Some("test-key".into()), ..Default::default() }
}

fn app(prefs: Preferences) -> ReaderApp<MockSpeechEngine> {
    let engine = MockSpeechEngine::new().with_auto_start();
    ReaderApp::new(SessionConfig::default(), engine, prefs, request())
}

// ============================================================================
// FEED LOADING
// ============================================================================

#[test]
fn test_file_transport_loads_response() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("headlines.json");
    std::fs::write(&path, RESPONSE).unwrap();

    let mut app = app(Preferences::default());
    let outcome = app.fetch(&mut FileTransport::new(&path), Instant::now(), Utc::now());

    assert_eq!(outcome, FeedLoad::Loaded { count: 2, category: Category::General });
    assert_eq!(app.session().announcer().current_message(), "2 articles loaded in General");
    let titles: Vec<_> = app.view().articles.into_iter().map(|r| r.title).collect();
    assert_eq!(titles, vec!["Rivers rise after storms", "Budget vote delayed"]);
}

#[test]
fn test_missing_file_falls_back_to_demo() {
    let mut app = app(Preferences::default());
    let mut transport = FileTransport::new("/nonexistent/headlines.json");
    let outcome = app.fetch(&mut transport, Instant::now(), Utc::now());

    assert!(matches!(outcome, FeedLoad::Fallback { count: 3, .. }));
    assert_eq!(app.feed().len(), 3);
}

#[test]
fn test_offline_without_key_falls_back() {
    let mut app = ReaderApp::new(
        SessionConfig::default(),
        MockSpeechEngine::new(),
        Preferences::default(),
        NewsApiRequest::default(),
    );
    let outcome = app.fetch(&mut OfflineTransport, Instant::now(), Utc::now());
    assert!(matches!(outcome, FeedLoad::Fallback { .. }));
}

// ============================================================================
// PERSISTENCE
// ============================================================================

#[test]
fn test_preferences_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    let t0 = Instant::now();

    {
        let mut store = JsonFileStore::open(&path);
        let mut app = app(Preferences::load(&store));
        app.fetch(&mut OfflineTransport, t0, Utc::now());
        app.toggle_dark_mode(t0);
        app.set_font_size(amp_prefs::FontSize::Small, t0);
        app.toggle_liked(2, t0).unwrap();
        app.open(3, t0).unwrap();
        app.close(t0);
        app.persist(&mut store).unwrap();
    }

    let store = JsonFileStore::open(&path);
    let mut app = app(Preferences::load(&store));
    app.fetch(&mut OfflineTransport, t0, Utc::now());
    let view = app.view();
    assert!(view.dark_mode);
    assert_eq!(view.font_size, amp_prefs::FontSize::Small);
    assert!(view.articles[1].liked);
    assert!(view.articles[2].read);
    assert!(!view.articles[0].read);
}

#[test]
fn test_unwritable_store_reports_prefs_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();
    let mut store = JsonFileStore::open(blocker.join("prefs.json"));

    let app = app(Preferences::default());
    assert!(matches!(app.persist(&mut store), Err(ReaderError::Prefs(_))));
}

// ============================================================================
// READING SESSIONS
// ============================================================================

#[test]
fn test_keyboard_only_session() {
    let t0 = Instant::now();
    let mut app = app(Preferences::default());
    app.fetch(&mut OfflineTransport, t0, Utc::now());

    app.open(1, t0).unwrap();
    app.modal_mounted(t0);
    assert_eq!(app.handle_key(&KeyboardShortcut::tab(), t0), KeyOutcome::Wrapped(MODAL_SPEAK));
    assert_eq!(
        app.handle_key(&KeyboardShortcut::shift_tab(), t0),
        KeyOutcome::Wrapped(MODAL_CLOSE)
    );
    assert_eq!(app.handle_key(&KeyboardShortcut::escape(), t0), KeyOutcome::CloseRequested);

    assert_eq!(app.session().state(), SessionState::Closed);
    assert_eq!(app.session().host().focused(), Some(article_button(0)));
}

#[test]
fn test_auto_read_from_preferences() {
    let t0 = Instant::now();
    let mut app = app(Preferences::default());
    app.fetch(&mut OfflineTransport, t0, Utc::now());
    assert!(app.toggle_auto_read(t0));

    app.open(2, t0).unwrap();
    app.tick(t0 + Duration::from_millis(500));
    assert_eq!(app.session().speech_status(), SpeechStatus::Speaking);

    // Closing mid-utterance stops it before the modal reports closed
    app.close(t0 + Duration::from_millis(600));
    assert_eq!(app.session().speech_status(), SpeechStatus::Idle);
    let history: Vec<_> = app.session().announcer().history().collect();
    assert_eq!(
        &history[history.len() - 2..],
        &["reading stopped", "reading mode deactivated"]
    );
}

#[test]
fn test_search_while_reading_keeps_session() {
    let t0 = Instant::now();
    let mut app = app(Preferences::default());
    app.fetch(&mut OfflineTransport, t0, Utc::now());
    app.open(3, t0).unwrap();

    app.search("markets", t0);
    assert_eq!(app.session().state(), SessionState::Open);
    assert!(app.session().current_article().is_some());

    // The opener card disappeared with the filter
    app.close(t0);
    assert_eq!(app.session().host().focused(), Some(amp_reader::page::MAIN_CONTENT));
}
