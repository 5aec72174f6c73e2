//! Bilibili FeedBuilder Adapter
//!
//! Adapter that calls BilibiliClient to implement the FeedBuilder trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use podsync_providers::bilibili::{Archive, EpisodeInfo};
use podsync_providers::{BilibiliClient, ClientOptions};
use tracing::{debug, info};

use super::{BuildContext, BuildError, FeedBuilder, FetchStage};
use crate::link::parse_url;
use crate::models::{BuildConfig, Episode, EpisodeStatus, Feed, ItemId, LinkType, Provider};

/// Series listings are fetched as one page of this size regardless of the
/// configured page size.
pub const MAX_SERIES_RESULTS: usize = 100;

/// Bytes per second of runtime used to estimate episode size.
///
/// Rough guess only; nothing is measured.
// TODO: replace with the Content-Length of the selected stream once playurl lookup exists
pub const ESTIMATED_BYTES_PER_SECOND: i64 = 15_000;

const SPACE_URL: &str = "https://space.bilibili.com";
const VIDEO_URL: &str = "https://www.bilibili.com/video/";

/// Bilibili FeedBuilder
pub struct BilibiliBuilder {
    client: BilibiliClient,
}

impl BilibiliBuilder {
    /// Builder against the public API with default HTTP settings
    pub fn new() -> Result<Self, BuildError> {
        Self::with_options(&ClientOptions::default())
    }

    pub fn with_options(options: &ClientOptions) -> Result<Self, BuildError> {
        BilibiliClient::with_options(options)
            .map(Self::with_client)
            .map_err(|e| BuildError::InvalidConfig(e.to_string()))
    }

    #[must_use]
    pub const fn with_client(client: BilibiliClient) -> Self {
        Self { client }
    }

    /// Season: uploader name, then season meta and first page of archives
    async fn resolve_season(
        &self,
        ctx: &BuildContext,
        feed: &mut Feed,
        mid: &str,
        season_id: &str,
    ) -> Result<Vec<Archive>, BuildError> {
        let user = ctx
            .call(FetchStage::UserInfo, self.client.get_user_info(mid))
            .await?;
        feed.author = user.card.name;

        let season = ctx
            .call(
                FetchStage::SeasonEpisodes,
                self.client
                    .get_season_episodes_by_page(mid, season_id, 1, feed.page_size),
            )
            .await?;
        feed.cover_art = season.meta.cover;
        feed.title = season.meta.name;
        feed.description = season.meta.description;
        feed.item_url = format!("{SPACE_URL}/{mid}/lists/{season_id}?type=season");

        Ok(season.archives)
    }

    /// Series: series meta, uploader card for author and cover, then archives
    async fn resolve_series(
        &self,
        ctx: &BuildContext,
        feed: &mut Feed,
        mid: &str,
        series_id: &str,
    ) -> Result<Vec<Archive>, BuildError> {
        let series = ctx
            .call(FetchStage::SeriesInfo, self.client.get_series_info(series_id))
            .await?;
        let user = ctx
            .call(FetchStage::UserInfo, self.client.get_user_info(mid))
            .await?;

        feed.author = user.card.name;
        feed.cover_art = user.card.face;
        feed.title = series.meta.name;
        feed.description = series.meta.description;
        feed.item_url = format!("{SPACE_URL}/{mid}/lists/{series_id}?type=series");

        let listing = ctx
            .call(
                FetchStage::SeriesEpisodes,
                self.client
                    .get_series_episodes_by_page(mid, series_id, 1, MAX_SERIES_RESULTS),
            )
            .await?;

        Ok(listing.archives)
    }

    /// User or channel: uploader card, then first page of uploads
    async fn resolve_user(
        &self,
        ctx: &BuildContext,
        feed: &mut Feed,
        mid: &str,
    ) -> Result<Vec<Archive>, BuildError> {
        let user = ctx
            .call(FetchStage::UserInfo, self.client.get_user_info(mid))
            .await?;
        feed.title = user.card.name.clone();
        feed.author = user.card.name;
        feed.cover_art = user.card.face;
        feed.description = user.card.sign;
        feed.item_url = format!("{SPACE_URL}/{mid}");

        let listing = ctx
            .call(
                FetchStage::UserEpisodes,
                self.client.get_user_episodes_by_page(mid, 1, feed.page_size),
            )
            .await?;

        Ok(listing.archives)
    }

    /// Fetch detail for each candidate in order until the feed is full.
    ///
    /// Listings lack the exclusivity flag, hence one detail call per
    /// candidate. Skipped candidates do not count toward the page size.
    async fn collect_episodes(
        &self,
        ctx: &BuildContext,
        feed: &mut Feed,
        archives: Vec<Archive>,
    ) -> Result<(), BuildError> {
        for archive in archives {
            if feed.is_full() {
                break;
            }

            let detail = ctx
                .call(FetchStage::EpisodeInfo, self.client.get_episode_info(&archive.bvid))
                .await?;

            if detail.is_upower_exclusive {
                debug!(bvid = %detail.bvid, "skipping supporter-exclusive video");
                continue;
            }

            feed.episodes.push(episode_from(detail, &archive));
        }
        Ok(())
    }
}

/// Map video detail to an episode; the publish time comes from the listing.
fn episode_from(detail: EpisodeInfo, archive: &Archive) -> Episode {
    Episode {
        video_url: format!("{VIDEO_URL}{}", detail.bvid),
        size: detail.duration.saturating_mul(ESTIMATED_BYTES_PER_SECOND),
        id: detail.bvid,
        title: detail.title,
        description: detail.desc,
        duration: detail.duration,
        pub_date: DateTime::<Utc>::from_timestamp(archive.pubdate, 0).unwrap_or_default(),
        thumbnail: detail.pic,
        status: EpisodeStatus::New,
    }
}

#[async_trait]
impl FeedBuilder for BilibiliBuilder {
    fn provider(&self) -> Provider {
        Provider::Bilibili
    }

    async fn build(&self, ctx: &BuildContext, cfg: &BuildConfig) -> Result<Feed, BuildError> {
        let info = parse_url(&cfg.url)?;
        info!(url = %cfg.url, link_type = %info.link_type, item_id = %info.item_id, "building bilibili feed");

        let mut feed = Feed::new(&info, cfg);

        let archives = match (info.link_type, &info.item_id) {
            (LinkType::Season, ItemId::Pair { owner_id, list_id }) => {
                self.resolve_season(ctx, &mut feed, owner_id, list_id).await?
            }
            (LinkType::Series, ItemId::Pair { owner_id, list_id }) => {
                self.resolve_series(ctx, &mut feed, owner_id, list_id).await?
            }
            (LinkType::Season | LinkType::Series, ItemId::Single(id)) => {
                return Err(BuildError::InvalidLink(format!(
                    "{} link needs owner and list ids, got {id:?}",
                    info.link_type
                )));
            }
            (_, ItemId::Single(mid)) => self.resolve_user(ctx, &mut feed, mid).await?,
            (link_type, ItemId::Pair { .. }) => {
                return Err(BuildError::InvalidLink(format!(
                    "{link_type} link takes a single id, got {}",
                    info.item_id
                )));
            }
        };

        debug!(candidates = archives.len(), "listing fetched");
        self.collect_episodes(ctx, &mut feed, archives).await?;

        info!(title = %feed.title, episodes = feed.episodes.len(), "bilibili feed built");
        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_from_uses_listing_pubdate() {
        let detail = EpisodeInfo {
            bvid: "BV1xx411c7XZ".to_string(),
            title: "T".to_string(),
            desc: "D".to_string(),
            pic: "http://i0.hdslb.com/p.jpg".to_string(),
            pubdate: 1_800_000_000,
            duration: 100,
            ..EpisodeInfo::default()
        };
        let archive = Archive {
            bvid: "BV1xx411c7XZ".to_string(),
            pubdate: 1_700_000_000,
            ..Archive::default()
        };

        let episode = episode_from(detail, &archive);
        assert_eq!(episode.pub_date.timestamp(), 1_700_000_000);
        assert_eq!(episode.size, 1_500_000);
        assert_eq!(episode.video_url, "https://www.bilibili.com/video/BV1xx411c7XZ");
        assert_eq!(episode.status, EpisodeStatus::New);
    }

    #[tokio::test]
    async fn test_mismatched_link_is_rejected_before_any_request() {
        // Unroutable base: any request would fail with a network error instead.
        let builder = BilibiliBuilder::with_options(&ClientOptions {
            api_base: "http://127.0.0.1:9".to_string(),
            ..ClientOptions::default()
        })
        .unwrap();

        let err = builder
            .build(&BuildContext::new(), &BuildConfig::new("https://www.youtube.com/@x"))
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidUrl(_)));
    }
}
