//! Bilibili HTTP Client

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER, USER_AGENT};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::pagination;
use super::types::{EpisodeInfo, SeasonArchives, SeriesArchives, SeriesInfo, UserArchives, UserInfo};
use super::BilibiliError;
use crate::error::{check_response, json_with_limit, Envelope};

pub const DEFAULT_API_BASE: &str = "https://api.bilibili.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// The web API refuses requests that do not look like they come from a browser tab.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0";
const BROWSER_ORIGIN: &str = "https://www.bilibili.com";
const BROWSER_REFERER: &str = "https://www.bilibili.com/";
const BROWSER_ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9";

const EPISODE_INFO_PATH: &str = "/x/web-interface/view";
const USER_INFO_PATH: &str = "/x/web-interface/card";
const USER_EPISODES_PATH: &str = "/x/series/recArchivesByKeywords";
const SEASON_ARCHIVES_PATH: &str = "/x/polymer/web-space/seasons_archives_list";
const SERIES_INFO_PATH: &str = "/x/series/series";
const SERIES_EPISODES_PATH: &str = "/x/series/archives";

/// Connection settings for [`BilibiliClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Scheme and host of the API, e.g. `https://api.bilibili.com`
    pub api_base: String,
    /// Upper bound for a single request, connect included
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE));
    headers.insert(ORIGIN, HeaderValue::from_static(BROWSER_ORIGIN));
    headers.insert(REFERER, HeaderValue::from_static(BROWSER_REFERER));
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers
}

/// Bilibili HTTP Client
///
/// Stateless apart from the connection pool; clones share it and may be
/// used from concurrent tasks.
#[derive(Debug, Clone)]
pub struct BilibiliClient {
    client: Client,
    api_base: Url,
}

impl BilibiliClient {
    /// Create a client against the public API with the default timeout
    pub fn new() -> Result<Self, BilibiliError> {
        Self::with_options(&ClientOptions::default())
    }

    /// Create a client with explicit base URL and timeout
    pub fn with_options(options: &ClientOptions) -> Result<Self, BilibiliError> {
        let api_base = Url::parse(&options.api_base).map_err(|e| {
            BilibiliError::InvalidConfig(format!("invalid api base {:?}: {e}", options.api_base))
        })?;

        // Redirects are disabled: every endpoint answers directly.
        let client = Client::builder()
            .default_headers(browser_headers())
            .connect_timeout(options.timeout)
            .timeout(options.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| BilibiliError::InvalidConfig(format!("failed to build http client: {e}")))?;

        Ok(Self { client, api_base })
    }

    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// GET `path` with `query`, unwrap the `{code, message, data}` envelope
    /// and decode `data` into `T`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, BilibiliError> {
        let url = self
            .api_base
            .join(path)
            .map_err(|e| BilibiliError::InvalidConfig(format!("invalid endpoint path {path:?}: {e}")))?;

        debug!(%url, ?query, "bilibili request");
        let resp = check_response(self.client.get(url).query(query).send().await?)?;
        let envelope: Envelope = json_with_limit(resp).await?;
        envelope.into_data()
    }

    /// Get full video detail by BVID
    pub async fn get_episode_info(&self, bvid: &str) -> Result<EpisodeInfo, BilibiliError> {
        self.fetch(EPISODE_INFO_PATH, &[("bvid", bvid.to_string())]).await
    }

    /// Get uploader card by mid
    pub async fn get_user_info(&self, mid: &str) -> Result<UserInfo, BilibiliError> {
        self.fetch(USER_INFO_PATH, &[("mid", mid.to_string())]).await
    }

    /// Get one page of an uploader's archives
    ///
    /// A `page_size` of 0 or above [`pagination::MAX_PAGE_SIZE`] requests
    /// every archive in a single page.
    pub async fn get_user_episodes_by_page(
        &self,
        mid: &str,
        page_num: usize,
        page_size: usize,
    ) -> Result<UserArchives, BilibiliError> {
        let (page_num, page_size) = pagination::unbounded(page_num, page_size);
        self.fetch(
            USER_EPISODES_PATH,
            &[
                ("keywords", String::new()),
                ("mid", mid.to_string()),
                ("pn", page_num.to_string()),
                ("ps", page_size.to_string()),
            ],
        )
        .await
    }

    /// Get season metadata and one page of its archives
    ///
    /// A `page_size` of 0 or above [`pagination::MAX_PAGE_SIZE`] is clamped
    /// to the maximum; the season endpoint has no unbounded mode.
    pub async fn get_season_episodes_by_page(
        &self,
        mid: &str,
        season_id: &str,
        page_num: usize,
        page_size: usize,
    ) -> Result<SeasonArchives, BilibiliError> {
        let page_size = pagination::capped(page_size);
        self.fetch(
            SEASON_ARCHIVES_PATH,
            &[
                ("season_id", season_id.to_string()),
                ("mid", mid.to_string()),
                ("page_num", page_num.to_string()),
                ("page_size", page_size.to_string()),
            ],
        )
        .await
    }

    /// Get series metadata
    pub async fn get_series_info(&self, series_id: &str) -> Result<SeriesInfo, BilibiliError> {
        self.fetch(SERIES_INFO_PATH, &[("series_id", series_id.to_string())]).await
    }

    /// Get one page of a series's archives
    ///
    /// Same normalization as [`Self::get_user_episodes_by_page`].
    pub async fn get_series_episodes_by_page(
        &self,
        mid: &str,
        series_id: &str,
        page_num: usize,
        page_size: usize,
    ) -> Result<SeriesArchives, BilibiliError> {
        let (page_num, page_size) = pagination::unbounded(page_num, page_size);
        self.fetch(
            SERIES_EPISODES_PATH,
            &[
                ("mid", mid.to_string()),
                ("series_id", series_id.to_string()),
                ("ps", page_size.to_string()),
                ("pn", page_num.to_string()),
            ],
        )
        .await
    }
}
