//! Feed transports available without an HTTP client

use std::path::{Path, PathBuf};

use amp_feed::{FeedError, FeedTransport};
use url::Url;

/// Serves a saved top-headlines response from disk for every request
#[derive(Debug, Clone)]
pub struct FileTransport {
    path: PathBuf,
}

impl FileTransport {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl FeedTransport for FileTransport {
    fn get(&mut self, url: &Url) -> Result<Vec<u8>, FeedError> {
        tracing::debug!(url = %url.path(), file = %self.path.display(), "Serving feed from file");
        std::fs::read(&self.path)
            .map_err(|e| FeedError::Transport(format!("{}: {}", self.path.display(), e)))
    }
}

/// Always fails, so the feed shows its demo set
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineTransport;

impl FeedTransport for OfflineTransport {
    fn get(&mut self, _url: &Url) -> Result<Vec<u8>, FeedError> {
        Err(FeedError::Transport("offline".into()))
    }
}
