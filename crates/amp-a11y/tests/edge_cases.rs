//! Edge case tests for amp-a11y
//!
//! Session lifecycle, speech ordering, focus trap boundaries.

use std::time::{Duration, Instant};

use amp_a11y::*;
use amp_feed::Article;
use amp_prefs::Preferences;

const MAIN: ElementId = ElementId(1);
const OPENER: ElementId = ElementId(2);
const MODAL: ElementId = ElementId(10);
const SPEAK: ElementId = ElementId(11);
const CLOSE: ElementId = ElementId(12);

const TARGETS: ModalTargets =
    ModalTargets { surface: MODAL, close_control: CLOSE, main_content: MAIN };

type Session = ReadingSessionController<MockSpeechEngine, ElementRegistry>;

fn page() -> ElementRegistry {
    let mut reg = ElementRegistry::new();
    reg.insert(MAIN, None, TabIndex::Programmatic);
    reg.insert(OPENER, Some(MAIN), TabIndex::Sequential(0));
    reg.insert(MODAL, None, TabIndex::NotFocusable);
    reg.insert(SPEAK, Some(MODAL), TabIndex::Sequential(0));
    reg.insert(CLOSE, Some(MODAL), TabIndex::Sequential(0));
    reg.focus(OPENER);
    reg
}

fn session_with(engine: MockSpeechEngine, prefs: Preferences) -> Session {
    ReadingSessionController::new(SessionConfig::default(), engine, page(), TARGETS, prefs)
}

fn article_a() -> Article {
    Article::new("https://news.example/a", "Article A").with_description("First story")
}

fn article_b() -> Article {
    Article::new("https://news.example/b", "Article B").with_content("Body only")
}

// ============================================================================
// SESSION LIFECYCLE
// ============================================================================

#[test]
fn test_open_close_sequences() {
    let t0 = Instant::now();
    let mut s = session_with(MockSpeechEngine::new(), Preferences::default());

    // (calls, expected final state)
    let cases: &[(&[&str], SessionState)] = &[
        (&["open"], SessionState::Open),
        (&["open", "close"], SessionState::Closed),
        (&["close", "close"], SessionState::Closed),
        (&["open", "open"], SessionState::Open),
        (&["open", "close", "close", "open"], SessionState::Open),
        (&["open", "close", "open", "close"], SessionState::Closed),
    ];

    for (calls, expected) in cases {
        s.teardown();
        for call in *calls {
            match *call {
                "open" => s.open(&article_a(), t0),
                _ => s.close(t0),
            };
        }
        assert_eq!(s.state(), *expected, "sequence {:?}", calls);
    }
}

#[test]
fn test_double_close_announces_once() {
    let t0 = Instant::now();
    let mut s = session_with(MockSpeechEngine::new(), Preferences::default());
    s.open(&article_a(), t0);
    s.announcer_mut().clear_history();

    assert!(s.close(t0));
    assert!(!s.close(t0));
    let history: Vec<_> = s.announcer().history().collect();
    assert_eq!(history, vec!["reading mode deactivated"]);
}

#[test]
fn test_read_set_has_unique_urls() {
    let t0 = Instant::now();
    let mut s = session_with(MockSpeechEngine::new(), Preferences::default());

    for _ in 0..3 {
        s.open(&article_a(), t0);
        s.close(t0);
    }
    s.open(&article_b(), t0);
    s.close(t0);

    let read = &s.preferences().engagement.read;
    assert_eq!(read.len(), 2);
    assert!(read.contains("https://news.example/a"));
    assert!(read.contains("https://news.example/b"));
}

#[test]
fn test_article_already_read_on_load() {
    let t0 = Instant::now();
    let mut prefs = Preferences::default();
    prefs.engagement.mark_read(&article_a());
    let mut s = session_with(MockSpeechEngine::new(), prefs);

    s.open(&article_a(), t0);
    assert_eq!(s.preferences().engagement.read.len(), 1);
}

// ============================================================================
// SPEECH ORDERING
// ============================================================================

#[test]
fn test_toggle_twice_then_close_scenario() {
    let t0 = Instant::now();
    let mut s = session_with(MockSpeechEngine::new().with_auto_start(), Preferences::default());

    s.open(&article_a(), t0);
    s.toggle_speech(t0 + Duration::from_millis(10));
    s.tick(t0 + Duration::from_millis(20));
    assert_eq!(s.speech_status(), SpeechStatus::Speaking);
    s.toggle_speech(t0 + Duration::from_millis(30));
    assert_eq!(s.speech_status(), SpeechStatus::Idle);
    s.close(t0 + Duration::from_millis(40));

    let history: Vec<_> = s.announcer().history().collect();
    assert_eq!(
        history,
        vec![
            "reading mode activated",
            "reading started",
            "reading stopped",
            "reading mode deactivated",
        ]
    );
}

#[test]
fn test_close_while_speaking_is_synchronous() {
    let t0 = Instant::now();
    let mut s = session_with(MockSpeechEngine::new().with_auto_start(), Preferences::default());
    s.open(&article_a(), t0);
    s.toggle_speech(t0);
    s.tick(t0);
    let job = s.speech().current_job().map(|j| j.id).unwrap();

    s.close(t0);
    assert_eq!(s.speech_status(), SpeechStatus::Idle);
    assert_eq!(s.state(), SessionState::Closed);

    // Engine reports late: nothing changes
    s.speech_mut().engine_mut().emit(EngineEvent::ended(job));
    s.speech_mut().engine_mut().emit(EngineEvent::failed(job, "interrupted"));
    s.tick(t0 + Duration::from_millis(10));
    assert_eq!(s.speech_status(), SpeechStatus::Idle);
    assert_eq!(s.announcer().current_message(), "reading mode deactivated");
}

#[test]
fn test_stale_completion_after_restart() {
    let t0 = Instant::now();
    let mut s = session_with(MockSpeechEngine::new().with_auto_start(), Preferences::default());
    s.open(&article_a(), t0);

    s.toggle_speech(t0);
    s.tick(t0);
    let first = s.speech().current_job().map(|j| j.id).unwrap();
    s.toggle_speech(t0);
    s.toggle_speech(t0);
    s.tick(t0);
    let second = s.speech().current_job().map(|j| j.id).unwrap();
    assert_ne!(first, second);

    s.speech_mut().engine_mut().emit(EngineEvent::ended(first));
    s.tick(t0);
    assert_eq!(s.speech_status(), SpeechStatus::Speaking);
}

#[test]
fn test_auto_read_waits_for_delay() {
    let t0 = Instant::now();
    let prefs = Preferences { speech_enabled: true, ..Default::default() };
    let mut s = session_with(MockSpeechEngine::new().with_auto_start(), prefs);
    s.open(&article_b(), t0);

    // Activation is announced before auto-read ever starts
    assert_eq!(s.announcer().current_message(), "reading mode activated");
    s.tick(t0 + Duration::from_millis(100));
    assert!(s.speech().engine().spoken().is_empty());

    s.tick(t0 + Duration::from_millis(500));
    s.tick(t0 + Duration::from_millis(510));
    assert_eq!(s.speech_status(), SpeechStatus::Speaking);
    let text = s.speech().engine().last_spoken().map(|j| j.text.clone());
    assert_eq!(text.as_deref(), Some("Article B. Body only"));
}

#[test]
fn test_auto_read_dropped_after_close() {
    let t0 = Instant::now();
    let prefs = Preferences { speech_enabled: true, ..Default::default() };
    let mut s = session_with(MockSpeechEngine::new(), prefs);

    s.open(&article_a(), t0);
    s.close(t0 + Duration::from_millis(100));
    s.tick(t0 + Duration::from_secs(1));
    assert!(s.speech().engine().spoken().is_empty());

    // Reopening schedules a fresh auto-read that the old one cannot shadow
    s.open(&article_b(), t0 + Duration::from_secs(2));
    s.tick(t0 + Duration::from_millis(2500));
    assert_eq!(s.speech().engine().spoken().len(), 1);
}

#[test]
fn test_modal_mounted_fires_early() {
    let t0 = Instant::now();
    let prefs = Preferences { speech_enabled: true, ..Default::default() };
    let mut s = session_with(MockSpeechEngine::new(), prefs);

    s.open(&article_a(), t0);
    assert!(s.modal_mounted(t0 + Duration::from_millis(1)));
    assert_eq!(s.host().focused(), Some(CLOSE));
    assert_eq!(s.speech().engine().spoken().len(), 1);

    s.close(t0 + Duration::from_millis(2));
    assert!(!s.modal_mounted(t0 + Duration::from_millis(3)));
}

#[test]
fn test_unsupported_engine_degrades() {
    let t0 = Instant::now();
    let prefs = Preferences { speech_enabled: true, ..Default::default() };
    let mut s = session_with(MockSpeechEngine::unavailable(), prefs);

    assert!(s.open(&article_a(), t0));
    s.tick(t0 + Duration::from_millis(500));

    assert!(s.is_trap_active());
    assert_eq!(s.host().focused(), Some(CLOSE));
    assert_eq!(s.speech_status(), SpeechStatus::Idle);
    let history: Vec<_> = s.announcer().history().collect();
    assert_eq!(history, vec!["reading mode activated", "reading aloud is not available"]);
}

#[test]
fn test_engine_error_mid_utterance() {
    let t0 = Instant::now();
    let mut s = session_with(MockSpeechEngine::new().with_auto_start(), Preferences::default());
    s.open(&article_a(), t0);
    s.toggle_speech(t0);
    s.tick(t0);
    let job = s.speech().current_job().map(|j| j.id).unwrap();

    s.speech_mut().engine_mut().emit(EngineEvent::failed(job, "synthesis-failed"));
    s.tick(t0);
    assert_eq!(s.speech_status(), SpeechStatus::Idle);
    assert_eq!(s.announcer().current_message(), "reading error");
    assert_eq!(s.state(), SessionState::Open);
}

// ============================================================================
// FOCUS TRAP
// ============================================================================

#[test]
fn test_single_focusable_element() {
    let t0 = Instant::now();
    let mut reg = page();
    reg.remove(SPEAK);
    let mut s = ReadingSessionController::new(
        SessionConfig::default(),
        MockSpeechEngine::new(),
        reg,
        TARGETS,
        Preferences::default(),
    );
    s.open(&article_a(), t0);
    s.modal_mounted(t0);

    assert_eq!(s.handle_key(&KeyboardShortcut::tab(), t0), KeyOutcome::Wrapped(CLOSE));
    assert_eq!(s.host().focused(), Some(CLOSE));
    assert_eq!(s.handle_key(&KeyboardShortcut::shift_tab(), t0), KeyOutcome::Wrapped(CLOSE));
    assert_eq!(s.host().focused(), Some(CLOSE));
}

#[test]
fn test_escape_restores_opener() {
    let t0 = Instant::now();
    let mut s = session_with(MockSpeechEngine::new(), Preferences::default());
    s.open(&article_a(), t0);
    s.modal_mounted(t0);

    assert_eq!(s.handle_key(&KeyboardShortcut::escape(), t0), KeyOutcome::CloseRequested);
    assert_eq!(s.host().focused(), Some(OPENER));
    assert!(!s.is_trap_active());
}

#[test]
fn test_opener_removed_falls_back_to_main() {
    let t0 = Instant::now();
    let mut s = session_with(MockSpeechEngine::new(), Preferences::default());
    s.open(&article_a(), t0);
    s.modal_mounted(t0);
    s.host_mut().remove(OPENER);

    s.close(t0);
    assert_eq!(s.host().focused(), Some(MAIN));
}

#[test]
fn test_custom_speech_shortcut() {
    let t0 = Instant::now();
    let mut s = session_with(MockSpeechEngine::new(), Preferences::default());
    s.shortcuts_mut().register(KeyboardShortcut::new("s").alt(), ModalAction::ToggleSpeech);
    s.open(&article_a(), t0);

    s.handle_key(&KeyboardShortcut::parse("Alt+s").unwrap(), t0);
    assert_eq!(s.speech().engine().spoken().len(), 1);
}

// ============================================================================
// ANNOUNCEMENTS
// ============================================================================

#[test]
fn test_announcement_expires_after_close() {
    let t0 = Instant::now();
    let mut s = session_with(MockSpeechEngine::new(), Preferences::default());
    s.open(&article_a(), t0);
    s.close(t0 + Duration::from_millis(1500));

    // The activation deadline has passed but the newer message stays
    s.tick(t0 + Duration::from_millis(2100));
    assert_eq!(s.announcer().current_message(), "reading mode deactivated");
    s.tick(t0 + Duration::from_millis(3500));
    assert_eq!(s.announcer().current_message(), "");
}

#[test]
fn test_portuguese_messages() {
    let t0 = Instant::now();
    let config = SessionConfig::for_locale(Locale::PortugueseBrazil);
    let mut s: Session = ReadingSessionController::new(
        config,
        MockSpeechEngine::new(),
        page(),
        TARGETS,
        Preferences::default(),
    );
    s.open(&article_a(), t0);
    assert_eq!(s.announcer().current_message(), Messages::pt_br().reading_mode_activated);
}
