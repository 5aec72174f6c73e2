use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::builder::BuildError;

/// Kind of collection a source URL points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Channel,
    Playlist,
    Season,
    Series,
    User,
    Group,
    Handle,
}

impl LinkType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Playlist => "playlist",
            Self::Season => "season",
            Self::Series => "series",
            Self::User => "user",
            Self::Group => "group",
            Self::Handle => "handle",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Bilibili,
    Youtube,
    Vimeo,
    Soundcloud,
    Twitch,
}

impl Provider {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bilibili => "bilibili",
            Self::Youtube => "youtube",
            Self::Vimeo => "vimeo",
            Self::Soundcloud => "soundcloud",
            Self::Twitch => "twitch",
        }
    }
}

impl FromStr for Provider {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bilibili" => Ok(Self::Bilibili),
            "youtube" => Ok(Self::Youtube),
            "vimeo" => Ok(Self::Vimeo),
            "soundcloud" => Ok(Self::Soundcloud),
            "twitch" => Ok(Self::Twitch),
            _ => Err(BuildError::UnsupportedProvider(s.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of the linked collection
///
/// Playlists on Bilibili are addressed by the owner's mid together with the
/// list id, so those links carry a pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Single(String),
    Pair { owner_id: String, list_id: String },
}

impl ItemId {
    pub fn single(id: impl Into<String>) -> Self {
        Self::Single(id.into())
    }

    pub fn pair(owner_id: impl Into<String>, list_id: impl Into<String>) -> Self {
        Self::Pair {
            owner_id: owner_id.into(),
            list_id: list_id.into(),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(id) => f.write_str(id),
            Self::Pair { owner_id, list_id } => write!(f, "{owner_id}:{list_id}"),
        }
    }
}

/// Data extracted from a source URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    pub link_type: LinkType,
    pub provider: Provider,
    pub item_id: ItemId,
}

impl LinkInfo {
    #[must_use]
    pub const fn new(provider: Provider, link_type: LinkType, item_id: ItemId) -> Self {
        Self {
            link_type,
            provider,
            item_id,
        }
    }
}
