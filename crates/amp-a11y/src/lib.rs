//! Amplifica Accessibility
//!
//! The accessible interaction controller of the reading surface.
//!
//! Features:
//! - Live region announcements with auto-expiry
//! - Speech output with one utterance in flight
//! - Focus trap with wrap-around and restore-on-close
//! - Generation-keyed deferred actions
//! - Reading-mode session state machine

pub mod config;
pub mod deferred;
pub mod focus;
pub mod keyboard_nav;
pub mod live_region;
pub mod messages;
pub mod mock;
pub mod reading_mode;
pub mod speech;

pub use config::SessionConfig;
pub use deferred::{DeferredAction, DeferredQueue, DueTask, TaskId};
pub use focus::{
    ElementId, ElementRegistry, FocusHost, FocusTrap, KeyOutcome, TabDirection, TabIndex,
};
pub use keyboard_nav::{KeyboardShortcut, ModalAction, ShortcutRegistry};
pub use live_region::{AnnouncementChannel, LiveRegion, Politeness};
pub use messages::{Locale, Messages};
pub use mock::MockSpeechEngine;
pub use reading_mode::{ModalTargets, ReadingSessionController, SessionState, SessionView};
pub use speech::{
    EngineEvent, EngineEventKind, JobId, NullEngine, SpeechController, SpeechEngine, SpeechError,
    SpeechJob, SpeechStatus, Voice,
};

/// Accessibility error
///
/// Never returned to callers of the session controller; logged and, where
/// useful, announced.
#[derive(Debug, thiserror::Error)]
pub enum A11yError {
    #[error("Capability unsupported: {0}")]
    Unsupported(&'static str),

    #[error("Invalid transition: cannot {action} while {from:?}")]
    InvalidTransition {
        from: SessionState,
        action: &'static str,
    },

    #[error("Speech engine error: {0}")]
    Engine(#[from] SpeechError),
}
