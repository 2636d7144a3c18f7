//! Terminal Output
//!
//! Speech engine and live region for a text terminal. Speech is written
//! as a transcript line and "plays" for an estimated duration based on
//! word count and voice rate.

use std::collections::VecDeque;
use std::io::Write;
use std::time::{Duration, Instant};

use amp_a11y::{EngineEvent, JobId, LiveRegion, Politeness, SpeechEngine, SpeechError, SpeechJob};

/// Base speaking speed at rate 1.0
const WORDS_PER_MINUTE: f32 = 180.0;

/// Transcript-writing speech engine
pub struct ConsoleEngine {
    out: Box<dyn Write>,
    events: VecDeque<EngineEvent>,
    playing: Option<(JobId, Instant)>,
}

impl std::fmt::Debug for ConsoleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleEngine")
            .field("events", &self.events)
            .field("playing", &self.playing)
            .finish()
    }
}

impl ConsoleEngine {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self { out, events: VecDeque::new(), playing: None }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Estimated playback time of `text`
    pub fn duration_of(text: &str, rate: f32) -> Duration {
        let words = text.split_whitespace().count() as f32;
        let per_minute = WORDS_PER_MINUTE * rate.max(0.1);
        Duration::from_secs_f32(words * 60.0 / per_minute)
    }
}

impl SpeechEngine for ConsoleEngine {
    fn is_available(&self) -> bool {
        true
    }

    fn speak(&mut self, job: &SpeechJob) -> Result<(), SpeechError> {
        writeln!(self.out, "  [speech {}] {}", job.voice.lang, job.text)
            .map_err(|e| SpeechError::Rejected(e.to_string()))?;
        let ends_at = Instant::now() + Self::duration_of(&job.text, job.voice.rate);
        self.playing = Some((job.id, ends_at));
        self.events.push_back(EngineEvent::started(job.id));
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some((job, _)) = self.playing.take() {
            tracing::debug!(job, "Console speech cancelled");
        }
        self.events.clear();
    }

    fn poll_event(&mut self) -> Option<EngineEvent> {
        if let Some(event) = self.events.pop_front() {
            return Some(event);
        }
        match self.playing {
            Some((job, ends_at)) if Instant::now() >= ends_at => {
                self.playing = None;
                Some(EngineEvent::ended(job))
            }
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

/// Live region printed as status lines
pub struct ConsoleLiveRegion {
    out: Box<dyn Write>,
}

impl ConsoleLiveRegion {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self { out }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }
}

impl LiveRegion for ConsoleLiveRegion {
    fn update(&mut self, text: &str, politeness: Politeness) {
        if text.is_empty() {
            return;
        }
        if let Err(err) = writeln!(self.out, "  [live:{}] {}", politeness.aria_value(), text) {
            tracing::warn!("Live region write failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amp_a11y::{SpeechStatus, Voice};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    fn job(id: JobId, text: &str) -> SpeechJob {
        SpeechJob { id, text: text.into(), voice: Voice::default(), status: SpeechStatus::Idle }
    }

    #[test]
    fn test_duration_estimate() {
        assert_eq!(ConsoleEngine::duration_of("", 1.0), Duration::ZERO);
        assert_eq!(ConsoleEngine::duration_of("one two three", 1.0), Duration::from_secs(1));
    }

    #[test]
    fn test_transcript_and_events() {
        let buffer = SharedBuffer::default();
        let mut engine = ConsoleEngine::new(Box::new(buffer.clone()));

        engine.speak(&job(1, "")).unwrap();
        assert!(buffer.text().contains("[speech en-US]"));
        assert_eq!(engine.poll_event(), Some(EngineEvent::started(1)));
        // Empty text finishes immediately
        assert_eq!(engine.poll_event(), Some(EngineEvent::ended(1)));
        assert_eq!(engine.poll_event(), None);
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut engine = ConsoleEngine::new(Box::new(SharedBuffer::default()));
        engine.speak(&job(7, "a long sentence that takes a while")).unwrap();
        engine.cancel();
        assert_eq!(engine.poll_event(), None);
    }

    #[test]
    fn test_live_region_skips_clears() {
        let buffer = SharedBuffer::default();
        let mut region = ConsoleLiveRegion::new(Box::new(buffer.clone()));
        region.update("hello", Politeness::Polite);
        region.update("", Politeness::Polite);
        assert_eq!(buffer.text(), "  [live:polite] hello\n");
    }
}
