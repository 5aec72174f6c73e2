use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::link::{ItemId, LinkInfo, LinkType, Provider};

/// Episodes kept per feed when a feed does not say otherwise
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Output media kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Audio,
    #[default]
    Video,
    Custom,
}

/// Media or artwork quality preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    High,
    Low,
}

/// Playlist ordering preference, carried through to the feed unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistSort {
    #[default]
    Asc,
    Desc,
}

/// Per-feed build settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Source URL (channel, user or playlist page)
    pub url: String,
    pub format: Format,
    pub quality: Quality,
    pub cover_art_quality: Quality,
    /// Maximum number of episodes in the built feed
    pub page_size: usize,
    pub playlist_sort: PlaylistSort,
    pub private_feed: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            format: Format::default(),
            quality: Quality::default(),
            cover_art_quality: Quality::default(),
            page_size: DEFAULT_PAGE_SIZE,
            playlist_sort: PlaylistSort::default(),
            private_feed: false,
        }
    }
}

impl BuildConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Episode lifecycle. Builders only ever produce `New`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeStatus {
    #[default]
    New,
    Downloaded,
    Error,
    Cleaned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Platform video id (BVID on Bilibili)
    pub id: String,
    pub title: String,
    pub description: String,
    /// Duration in seconds
    pub duration: i64,
    /// Estimated payload size in bytes, derived from duration
    pub size: i64,
    pub video_url: String,
    pub pub_date: DateTime<Utc>,
    pub thumbnail: String,
    pub status: EpisodeStatus,
}

/// Provider-agnostic show with its episodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub item_id: ItemId,
    pub provider: Provider,
    pub link_type: LinkType,
    pub format: Format,
    pub quality: Quality,
    pub cover_art_quality: Quality,
    pub page_size: usize,
    pub playlist_sort: PlaylistSort,
    pub private_feed: bool,
    pub updated_at: DateTime<Utc>,
    pub item_url: String,

    pub author: String,
    pub title: String,
    pub description: String,
    pub cover_art: String,

    /// In upstream listing order
    pub episodes: Vec<Episode>,
}

impl Feed {
    /// Empty feed for `info`, stamped with the current time.
    ///
    /// `item_url` starts as the configured URL; builders replace it with the
    /// canonical one once the link is resolved.
    #[must_use]
    pub fn new(info: &LinkInfo, cfg: &BuildConfig) -> Self {
        Self {
            item_id: info.item_id.clone(),
            provider: info.provider,
            link_type: info.link_type,
            format: cfg.format,
            quality: cfg.quality,
            cover_art_quality: cfg.cover_art_quality,
            page_size: cfg.page_size,
            playlist_sort: cfg.playlist_sort,
            private_feed: cfg.private_feed,
            updated_at: Utc::now(),
            item_url: cfg.url.clone(),
            author: String::new(),
            title: String::new(),
            description: String::new(),
            cover_art: String::new(),
            episodes: Vec::new(),
        }
    }

    /// Whether another episode would exceed `page_size`
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.episodes.len() >= self.page_size
    }
}
