//! Amplifica Preferences
//!
//! Durable display preferences and engagement sets behind a key/value
//! store. Loading never fails: absent or malformed values fall back to
//! defaults.

pub mod engagement;
pub mod preferences;
pub mod store;

pub use engagement::{EngagementSet, EngagementSets, Toggle};
pub use preferences::{keys, FontSize, Preferences};
pub use store::{JsonFileStore, MemoryStore, PreferenceStore};

/// Preference persistence error
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
