//! Speech Output
//!
//! Wraps a platform text-to-speech engine behind a three-callback
//! contract (started, ended, failed). Only one utterance is in flight;
//! events belonging to a superseded job are dropped.

use std::time::Instant;

use crate::{A11yError, AnnouncementChannel, Locale, Messages};

/// Utterance identifier
pub type JobId = u64;

/// Speech parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    /// BCP 47 language tag
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Default for Voice {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

impl Voice {
    pub fn for_locale(locale: Locale) -> Self {
        Self {
            lang: locale.tag().to_string(),
            rate: 0.95,
            pitch: 1.0,
        }
    }
}

/// Job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeechStatus {
    #[default]
    Idle,
    Speaking,
    Error,
}

/// An utterance request
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechJob {
    pub id: JobId,
    pub text: String,
    pub voice: Voice,
    pub status: SpeechStatus,
}

/// Engine lifecycle callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEventKind {
    Started,
    Ended,
    Failed(String),
}

/// Engine event tagged with the job it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineEvent {
    pub job: JobId,
    pub kind: EngineEventKind,
}

impl EngineEvent {
    pub fn started(job: JobId) -> Self {
        Self { job, kind: EngineEventKind::Started }
    }

    pub fn ended(job: JobId) -> Self {
        Self { job, kind: EngineEventKind::Ended }
    }

    pub fn failed(job: JobId, detail: &str) -> Self {
        Self { job, kind: EngineEventKind::Failed(detail.to_string()) }
    }
}

/// Speech engine error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("no speech engine available")]
    Unsupported,

    #[error("engine rejected utterance: {0}")]
    Rejected(String),
}

/// Platform text-to-speech engine
///
/// Exclusively owned by a [`SpeechController`].
pub trait SpeechEngine {
    /// Whether speech synthesis exists on this platform
    fn is_available(&self) -> bool;

    /// Queue an utterance; lifecycle is reported through `poll_event`
    fn speak(&mut self, job: &SpeechJob) -> Result<(), SpeechError>;

    /// Cancel everything queued or playing
    fn cancel(&mut self);

    /// Next pending lifecycle event
    fn poll_event(&mut self) -> Option<EngineEvent>;

    /// Engine name for diagnostics
    fn name(&self) -> &'static str;
}

/// Engine for platforms without speech synthesis
#[derive(Debug, Default)]
pub struct NullEngine;

impl NullEngine {
    pub fn new() -> Self { Self }
}

impl SpeechEngine for NullEngine {
    fn is_available(&self) -> bool { false }
    fn speak(&mut self, _job: &SpeechJob) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }
    fn cancel(&mut self) {}
    fn poll_event(&mut self) -> Option<EngineEvent> { None }
    fn name(&self) -> &'static str { "null" }
}

/// Speech controller
#[derive(Debug)]
pub struct SpeechController<E: SpeechEngine> {
    engine: E,
    voice: Voice,
    messages: Messages,
    current: Option<SpeechJob>,
    last: Option<SpeechJob>,
    next_id: JobId,
}

impl<E: SpeechEngine> SpeechController<E> {
    pub fn new(engine: E, voice: Voice, messages: Messages) -> Self {
        Self {
            engine,
            voice,
            messages,
            current: None,
            last: None,
            next_id: 1,
        }
    }

    /// Status of the current job, idle when there is none
    pub fn status(&self) -> SpeechStatus {
        self.current.as_ref().map(|j| j.status).unwrap_or_default()
    }

    pub fn is_speaking(&self) -> bool {
        self.status() == SpeechStatus::Speaking
    }

    /// Job in flight (queued or speaking)
    pub fn current_job(&self) -> Option<&SpeechJob> {
        self.current.as_ref()
    }

    /// Most recently finished, stopped or failed job
    pub fn last_job(&self) -> Option<&SpeechJob> {
        self.last.as_ref()
    }

    pub fn voice(&self) -> &Voice {
        &self.voice
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Start speaking `text`, cancelling whatever is in flight
    ///
    /// Failures are announced and logged; `None` means nothing was queued.
    pub fn speak(
        &mut self,
        text: &str,
        announcer: &mut AnnouncementChannel,
        now: Instant,
    ) -> Option<JobId> {
        if !self.engine.is_available() {
            let err = A11yError::Unsupported("speech synthesis");
            tracing::warn!(engine = self.engine.name(), "{}", err);
            announcer.announce(self.messages.speech_unavailable.clone(), now);
            return None;
        }

        self.engine.cancel();
        self.retire_current(SpeechStatus::Idle);

        let mut job = SpeechJob {
            id: self.next_id,
            text: text.to_string(),
            voice: self.voice.clone(),
            status: SpeechStatus::Idle,
        };
        self.next_id += 1;

        match self.engine.speak(&job) {
            Ok(()) => {
                tracing::debug!(job = job.id, chars = text.len(), "Utterance queued");
                let id = job.id;
                self.current = Some(job);
                Some(id)
            }
            Err(err) => {
                let err = A11yError::from(err);
                tracing::warn!(engine = self.engine.name(), job = job.id, "{}", err);
                job.status = SpeechStatus::Error;
                self.last = Some(job);
                announcer.announce(self.messages.reading_error.clone(), now);
                None
            }
        }
    }

    /// Cancel unconditionally and announce
    pub fn stop(&mut self, announcer: &mut AnnouncementChannel, now: Instant) {
        self.halt();
        announcer.announce(self.messages.reading_stopped.clone(), now);
    }

    /// Cancel without announcing
    pub fn halt(&mut self) {
        self.engine.cancel();
        self.retire_current(SpeechStatus::Idle);
    }

    /// Apply one engine event
    ///
    /// Returns `false` for events of any job but the current one.
    pub fn on_event(
        &mut self,
        event: EngineEvent,
        announcer: &mut AnnouncementChannel,
        now: Instant,
    ) -> bool {
        let Some(job) = self.current.as_mut().filter(|j| j.id == event.job) else {
            tracing::debug!(job = event.job, "Dropping stale speech event {:?}", event.kind);
            return false;
        };

        match event.kind {
            EngineEventKind::Started => {
                job.status = SpeechStatus::Speaking;
                announcer.announce(self.messages.reading_started.clone(), now);
            }
            EngineEventKind::Ended => {
                self.retire_current(SpeechStatus::Idle);
                announcer.announce(self.messages.reading_finished.clone(), now);
            }
            EngineEventKind::Failed(detail) => {
                tracing::warn!(
                    job = event.job,
                    engine = self.engine.name(),
                    "Speech synthesis failed: {}",
                    detail
                );
                self.retire_current(SpeechStatus::Error);
                announcer.announce(self.messages.reading_error.clone(), now);
            }
        }
        true
    }

    /// Drain and apply all pending engine events
    pub fn pump(&mut self, announcer: &mut AnnouncementChannel, now: Instant) -> usize {
        let mut applied = 0;
        while let Some(event) = self.engine.poll_event() {
            if self.on_event(event, announcer, now) {
                applied += 1;
            }
        }
        applied
    }

    fn retire_current(&mut self, status: SpeechStatus) {
        if let Some(mut job) = self.current.take() {
            job.status = status;
            self.last = Some(job);
        }
    }
}
