//! Reading Mode
//!
//! Session state machine for the reading-mode modal. Opening moves focus
//! into the modal, marks the article read, announces the transition and
//! optionally schedules auto-read; closing stops speech and releases the
//! focus trap before the closed state becomes observable.

use std::time::Instant;

use amp_feed::Article;
use amp_prefs::Preferences;

use crate::{
    A11yError, AnnouncementChannel, DeferredAction, DeferredQueue, DueTask, ElementId, FocusHost,
    FocusTrap, KeyOutcome, KeyboardShortcut, ModalAction, SessionConfig, ShortcutRegistry,
    SpeechController, SpeechEngine, SpeechStatus, TabDirection,
};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Closed,
    Open,
    Closing,
}

/// Host elements the session works with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalTargets {
    /// Modal container
    pub surface: ElementId,
    /// Receives focus once the modal mounts
    pub close_control: ElementId,
    /// Focus fallback when the opener is gone
    pub main_content: ElementId,
}

/// Open article and the generation that owns its deferred actions
#[derive(Debug, Clone)]
struct ReadingSession {
    article: Article,
    generation: u64,
}

/// Snapshot for the rendering surface
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub state: SessionState,
    pub article_url: Option<String>,
    pub article_title: Option<String>,
    pub announcement: String,
    pub speech: SpeechStatus,
    pub trap_active: bool,
}

/// Reading session controller
///
/// Owns the speech engine, the focus host and the user's preferences.
/// None of its operations return errors; failures degrade to an
/// announcement and a log line.
#[derive(Debug)]
pub struct ReadingSessionController<E: SpeechEngine, H: FocusHost> {
    config: SessionConfig,
    targets: ModalTargets,
    state: SessionState,
    session: Option<ReadingSession>,
    generation: u64,
    announcer: AnnouncementChannel,
    speech: SpeechController<E>,
    trap: FocusTrap,
    deferred: DeferredQueue,
    shortcuts: ShortcutRegistry,
    host: H,
    prefs: Preferences,
}

impl<E: SpeechEngine, H: FocusHost> ReadingSessionController<E, H> {
    pub fn new(
        config: SessionConfig,
        engine: E,
        host: H,
        targets: ModalTargets,
        prefs: Preferences,
    ) -> Self {
        let announcer = AnnouncementChannel::new(
            config.announcement_lifetime,
            config.politeness,
            config.history_limit,
        );
        let speech = SpeechController::new(engine, config.voice.clone(), config.messages.clone());
        tracing::info!(engine = speech.engine().name(), "Reading session controller ready");

        Self {
            config,
            targets,
            state: SessionState::Closed,
            session: None,
            generation: 0,
            announcer,
            speech,
            trap: FocusTrap::new(targets.main_content),
            deferred: DeferredQueue::new(),
            shortcuts: ShortcutRegistry::new(),
            host,
            prefs,
        }
    }

    /// Open `article` in reading mode
    ///
    /// Only valid while closed; returns `false` when absorbed.
    pub fn open(&mut self, article: &Article, now: Instant) -> bool {
        if self.state != SessionState::Closed {
            self.absorb("open");
            return false;
        }

        self.generation += 1;
        let generation = self.generation;
        self.session = Some(ReadingSession { article: article.clone(), generation });
        self.trap.activate(self.targets.surface, self.targets.close_control, &mut self.host);
        self.state = SessionState::Open;

        if self.prefs.engagement.mark_read(article) {
            tracing::debug!(url = %article.url, "Marked as read");
        }
        self.announcer.announce(self.config.messages.reading_mode_activated.clone(), now);

        self.deferred.schedule(
            DeferredAction::InitialFocus,
            generation,
            now + self.config.initial_focus_delay,
        );
        if self.prefs.speech_enabled {
            self.deferred.schedule(
                DeferredAction::AutoRead,
                generation,
                now + self.config.auto_read_delay,
            );
        }

        tracing::info!(url = %article.url, generation, "Reading mode opened");
        true
    }

    /// Close reading mode
    ///
    /// Repeated calls are no-ops; returns `false` when absorbed.
    pub fn close(&mut self, now: Instant) -> bool {
        if self.state != SessionState::Open {
            self.absorb("close");
            return false;
        }
        self.state = SessionState::Closing;

        if let Some(session) = &self.session {
            self.deferred.cancel_generation(session.generation);
        }
        if self.speech.is_speaking() {
            self.speech.stop(&mut self.announcer, now);
        } else {
            self.speech.halt();
        }
        self.trap.deactivate(&mut self.host);
        self.session = None;
        self.state = SessionState::Closed;

        self.announcer.announce(self.config.messages.reading_mode_deactivated.clone(), now);
        tracing::info!("Reading mode closed");
        true
    }

    /// Stop speech if speaking, else read the open article
    pub fn toggle_speech(&mut self, now: Instant) -> bool {
        if self.state != SessionState::Open {
            self.absorb("toggle speech");
            return false;
        }

        if self.speech.is_speaking() {
            self.speech.stop(&mut self.announcer, now);
        } else if let Some(session) = &self.session {
            let text = session.article.speech_text();
            self.speech.speak(&text, &mut self.announcer, now);
        }
        true
    }

    /// Route a key press while the modal is open
    pub fn handle_key(&mut self, key: &KeyboardShortcut, now: Instant) -> KeyOutcome {
        if self.state != SessionState::Open {
            return KeyOutcome::Inactive;
        }

        match self.shortcuts.get_action(key) {
            Some(ModalAction::NextElement) => {
                self.trap.handle_tab(TabDirection::Forward, &mut self.host)
            }
            Some(ModalAction::PrevElement) => {
                self.trap.handle_tab(TabDirection::Backward, &mut self.host)
            }
            Some(ModalAction::Close) => {
                let outcome = self.trap.handle_escape();
                if outcome == KeyOutcome::CloseRequested {
                    self.close(now);
                }
                outcome
            }
            Some(ModalAction::ToggleSpeech) => {
                self.toggle_speech(now);
                KeyOutcome::Passthrough
            }
            None => KeyOutcome::Passthrough,
        }
    }

    /// The modal finished mounting: run pending focus and auto-read now
    pub fn modal_mounted(&mut self, now: Instant) -> bool {
        let Some(generation) = self.open_generation() else {
            return false;
        };
        for action in [DeferredAction::InitialFocus, DeferredAction::AutoRead] {
            if let Some(task) = self.deferred.take(action, generation) {
                self.run_deferred(task, now);
            }
        }
        true
    }

    /// Advance timers and drain speech events
    pub fn tick(&mut self, now: Instant) {
        for task in self.deferred.take_due(now) {
            self.run_deferred(task, now);
        }
        self.speech.pump(&mut self.announcer, now);
        self.announcer.tick(now);
    }

    /// Earliest instant at which `tick` has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.deferred.next_deadline(), self.announcer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Host component going away: release everything without announcing
    pub fn teardown(&mut self) {
        self.deferred.clear();
        self.speech.halt();
        self.trap.deactivate(&mut self.host);
        self.session = None;
        self.state = SessionState::Closed;
    }

    /// Post an announcement through the session's live region
    pub fn announce(&mut self, message: impl Into<String>, now: Instant) {
        self.announcer.announce(message, now);
    }

    fn run_deferred(&mut self, task: DueTask, now: Instant) {
        if self.open_generation() != Some(task.generation) {
            tracing::debug!(
                generation = task.generation,
                action = ?task.action,
                "Dropping stale deferred action"
            );
            return;
        }
        let Some(session) = &self.session else {
            return;
        };

        match task.action {
            DeferredAction::InitialFocus => {
                let focused = self.trap.focus_initial(&mut self.host);
                tracing::debug!(focused = ?focused, "Initial focus moved");
            }
            DeferredAction::AutoRead => {
                if self.speech.current_job().is_some() {
                    tracing::debug!("Speech already in flight, skipping auto-read");
                    return;
                }
                let text = session.article.speech_text();
                self.speech.speak(&text, &mut self.announcer, now);
            }
        }
    }

    fn open_generation(&self) -> Option<u64> {
        match (&self.session, self.state) {
            (Some(session), SessionState::Open) => Some(session.generation),
            _ => None,
        }
    }

    fn absorb(&self, action: &'static str) {
        let err = A11yError::InvalidTransition { from: self.state, action };
        tracing::debug!("{}", err);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn current_article(&self) -> Option<&Article> {
        self.session.as_ref().map(|s| &s.article)
    }

    pub fn speech_status(&self) -> SpeechStatus {
        self.speech.status()
    }

    pub fn is_trap_active(&self) -> bool {
        self.trap.is_active()
    }

    pub fn view(&self) -> SessionView {
        let article = self.current_article();
        SessionView {
            state: self.state,
            article_url: article.map(|a| a.url.clone()),
            article_title: article.map(|a| a.title.clone()),
            announcement: self.announcer.current_message().to_string(),
            speech: self.speech.status(),
            trap_active: self.trap.is_active(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn shortcuts_mut(&mut self) -> &mut ShortcutRegistry {
        &mut self.shortcuts
    }

    pub fn announcer(&self) -> &AnnouncementChannel {
        &self.announcer
    }

    pub fn announcer_mut(&mut self) -> &mut AnnouncementChannel {
        &mut self.announcer
    }

    pub fn speech(&self) -> &SpeechController<E> {
        &self.speech
    }

    pub fn speech_mut(&mut self) -> &mut SpeechController<E> {
        &mut self.speech
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.prefs
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<E: SpeechEngine, H: FocusHost> Drop for ReadingSessionController<E, H> {
    fn drop(&mut self) {
        self.speech.halt();
    }
}
