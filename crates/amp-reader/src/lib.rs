//! Amplifica Reader
//!
//! An accessible news reading surface for the terminal.
//!
//! Features:
//! - Feed loading with demo fallback, search, category and sort
//! - Display preferences and engagement sets, persisted as JSON
//! - Reading mode with focus trap, speech transcript and live region

pub mod app;
pub mod commands;
pub mod console;
pub mod messages;
pub mod page;
pub mod transport;

pub use app::{ArticleRow, ReaderApp, ReaderView};
pub use commands::{Command, HELP};
pub use console::{ConsoleEngine, ConsoleLiveRegion};
pub use messages::AppMessages;
pub use transport::{FileTransport, OfflineTransport};

/// Reader error
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error("No article number {0}")]
    NoArticle(usize),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument: {0:?}")]
    InvalidArgument(String),

    #[error("Empty command")]
    EmptyCommand,

    #[error("Preferences error: {0}")]
    Prefs(#[from] amp_prefs::PrefsError),
}
