use crate::consts::cli_consts::paths;
use crate::feed::error::FeedError;

pub(crate) mod client;
pub use client::HttpFeedClient;
pub(crate) mod directory;
pub use directory::DirectoryFeed;
pub mod error;

#[cfg(test)]
use mockall::automock;

/// The three documents published by the pipeline.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, strum::Display, strum::EnumIter)]
pub enum Resource {
    #[strum(to_string = "events")]
    Events,
    #[strum(to_string = "wallets")]
    Wallets,
    #[strum(to_string = "alerts")]
    Alerts,
}

impl Resource {
    /// Fixed path of the document relative to the feed root.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Events => paths::EVENTS,
            Resource::Wallets => paths::WALLETS,
            Resource::Alerts => paths::ALERTS,
        }
    }

    /// File name, used in diagnostics.
    pub fn file_name(&self) -> &'static str {
        self.path().rsplit('/').next().unwrap_or_default()
    }
}

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    /// Human readable location of the feed, shown in the header.
    fn location(&self) -> String;

    /// Fetch the raw body of one document.
    async fn fetch(&self, resource: Resource) -> Result<Vec<u8>, FeedError>;
}
