// Feed Builder Traits
//
// Core interfaces for the builder system

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{BuildContext, BuildError};
use crate::models::{BuildConfig, Feed, Provider};

/// Feed builder trait
///
/// One implementation per provider. A build is all-or-nothing: either the
/// complete feed is returned or the first error encountered.
#[async_trait]
pub trait FeedBuilder: Send + Sync {
    /// Provider this builder serves
    fn provider(&self) -> Provider;

    /// Resolve `cfg.url` and assemble a fresh feed from upstream data
    async fn build(&self, ctx: &BuildContext, cfg: &BuildConfig) -> Result<Feed, BuildError>;
}

/// Playlist metadata reported by an external downloader
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel: String,
    pub channel_id: String,
    pub channel_url: String,
    pub webpage_url: String,
    pub thumbnail: String,
}

/// External media downloader handle (youtube-dl style)
///
/// Builders for providers whose APIs lack playlist metadata may consult it.
/// The Bilibili builder has no use for it.
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn playlist_metadata(&self, url: &str) -> Result<PlaylistMetadata, BuildError>;
}
