pub mod feed;
pub mod link;

pub use feed::{
    BuildConfig, Episode, EpisodeStatus, Feed, Format, PlaylistSort, Quality, DEFAULT_PAGE_SIZE,
};
pub use link::{ItemId, LinkInfo, LinkType, Provider};
