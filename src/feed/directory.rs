//! Local directory feed
//!
//! Reads the documents from a directory laid out like the published site,
//! i.e. `<root>/data/events_sources.json`.

use crate::feed::error::FeedError;
use crate::feed::{FeedSource, Resource};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DirectoryFeed {
    root: PathBuf,
}

impl DirectoryFeed {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn document_path(&self, resource: Resource) -> PathBuf {
        self.root.join(resource.path().trim_start_matches('/'))
    }
}

#[async_trait::async_trait]
impl FeedSource for DirectoryFeed {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch(&self, resource: Resource) -> Result<Vec<u8>, FeedError> {
        Ok(tokio::fs::read(self.document_path(resource)).await?)
    }
}
