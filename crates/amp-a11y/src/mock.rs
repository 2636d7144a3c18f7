//! Scripted speech engine for hosts without synthesis and for tests.

use std::collections::VecDeque;

use crate::speech::{EngineEvent, SpeechEngine, SpeechError, SpeechJob};

/// Records utterances and replays scripted lifecycle events.
#[derive(Debug, Default)]
pub struct MockSpeechEngine {
    available: bool,
    auto_start: bool,
    spoken: Vec<SpeechJob>,
    events: VecDeque<EngineEvent>,
    reject: Option<String>,
    cancels: usize,
}

impl MockSpeechEngine {
    pub fn new() -> Self {
        Self { available: true, ..Default::default() }
    }

    /// Engine that reports no synthesis capability
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Emit `Started` as soon as an utterance is queued
    pub fn with_auto_start(mut self) -> Self {
        self.auto_start = true;
        self
    }

    /// Queue an event for the next poll
    pub fn emit(&mut self, event: EngineEvent) {
        self.events.push_back(event);
    }

    /// Reject the next `speak` call
    pub fn reject_next(&mut self, detail: &str) {
        self.reject = Some(detail.to_string());
    }

    pub fn spoken(&self) -> &[SpeechJob] {
        &self.spoken
    }

    pub fn last_spoken(&self) -> Option<&SpeechJob> {
        self.spoken.last()
    }

    pub fn cancel_count(&self) -> usize {
        self.cancels
    }
}

impl SpeechEngine for MockSpeechEngine {
    fn is_available(&self) -> bool {
        self.available
    }

    fn speak(&mut self, job: &SpeechJob) -> Result<(), SpeechError> {
        if !self.available {
            return Err(SpeechError::Unsupported);
        }
        if let Some(detail) = self.reject.take() {
            return Err(SpeechError::Rejected(detail));
        }
        self.spoken.push(job.clone());
        if self.auto_start {
            self.events.push_back(EngineEvent::started(job.id));
        }
        Ok(())
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }

    fn poll_event(&mut self) -> Option<EngineEvent> {
        self.events.pop_front()
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
