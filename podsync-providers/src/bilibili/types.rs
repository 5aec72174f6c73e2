//! Bilibili API Data Structures
//!
//! Payload types for the `data` field of each endpoint envelope. All fields
//! default when absent; the upstream API omits or nulls fields freely.

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like an absent field.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Video detail (/x/web-interface/view)
// ============================================================================

/// Full video detail
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeInfo {
    pub aid: i64,
    pub bvid: String,
    pub title: String,
    pub desc: String,
    pub pic: String,
    pub pubdate: i64,
    pub duration: i64,
    /// Set for videos restricted to paying supporters ("充电专属").
    pub is_upower_exclusive: bool,
    pub owner: Owner,
    pub stat: Stat,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    pub mid: i64,
    pub name: String,
    pub face: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stat {
    pub view: i64,
}

// ============================================================================
// Uploader card (/x/web-interface/card)
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    pub card: UserCard,
    pub space: Option<UserSpace>,
    pub follower: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserCard {
    /// The card endpoint returns `mid` as a string.
    pub mid: String,
    pub name: String,
    pub face: String,
    pub sign: String,
    pub fans: i64,
    pub level_info: LevelInfo,
    pub official: Official,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelInfo {
    pub current_level: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Official {
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSpace {
    #[serde(rename = "viewcount")]
    pub view_count: i64,
}

// ============================================================================
// Listings
// ============================================================================

/// Lightweight listing entry shared by every archive listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Archive {
    pub aid: i64,
    pub bvid: String,
    pub ctime: i64,
    pub duration: i64,
    pub pic: String,
    pub pubdate: i64,
    pub stat: Stat,
    pub state: i64,
    pub title: String,
}

/// Uploader archive listing (/x/series/recArchivesByKeywords)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserArchives {
    #[serde(deserialize_with = "null_default")]
    pub archives: Vec<Archive>,
    pub page: ArchivePage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchivePage {
    pub num: i64,
    pub size: i64,
    pub total: i64,
}

/// Season metadata plus its archive page (/x/polymer/web-space/seasons_archives_list)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonArchives {
    #[serde(deserialize_with = "null_default")]
    pub aids: Vec<i64>,
    #[serde(deserialize_with = "null_default")]
    pub archives: Vec<Archive>,
    pub meta: SeasonMeta,
    pub page: SeasonPage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonMeta {
    pub category: i64,
    pub cover: String,
    pub description: String,
    pub mid: i64,
    pub name: String,
    pub ptime: i64,
    pub season_id: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonPage {
    pub page_num: i64,
    pub page_size: i64,
    pub total: i64,
}

/// Series metadata (/x/series/series). Series carry no cover image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesInfo {
    pub meta: SeriesMeta,
    #[serde(deserialize_with = "null_default")]
    pub recent_aids: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesMeta {
    pub series_id: i64,
    pub mid: i64,
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "null_default")]
    pub keywords: Vec<String>,
    pub creator: String,
    pub state: i64,
    pub last_update_ts: i64,
    pub total: i64,
    pub ctime: i64,
    pub mtime: i64,
    pub raw_keywords: String,
    pub category: i64,
}

/// Series archive listing (/x/series/archives)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesArchives {
    #[serde(deserialize_with = "null_default")]
    pub archives: Vec<Archive>,
    pub page: SeriesPage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesPage {
    pub num: i64,
    pub size: i64,
    pub count: i64,
}
