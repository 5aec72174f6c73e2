//! Source URL parsing
//!
//! Turns a user-supplied page URL into a [`LinkInfo`].

use url::Url;

use crate::builder::BuildError;
use crate::models::{ItemId, LinkInfo, LinkType, Provider};

const BILIBILI_SPACE_HOST: &str = "space.bilibili.com";

/// Parse a source URL into provider, link type and item id
pub fn parse_url(raw: &str) -> Result<LinkInfo, BuildError> {
    let url = Url::parse(raw.trim()).map_err(|e| BuildError::InvalidUrl(format!("{raw}: {e}")))?;

    match url.host_str() {
        Some(BILIBILI_SPACE_HOST) => parse_bilibili_space(&url),
        Some(host) => Err(BuildError::InvalidUrl(format!("unsupported host {host}"))),
        None => Err(BuildError::InvalidUrl(format!("{raw}: missing host"))),
    }
}

fn parse_bilibili_space(url: &Url) -> Result<LinkInfo, BuildError> {
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    let invalid = || BuildError::InvalidUrl(format!("unrecognized bilibili space url: {url}"));

    let (link_type, item_id) = match segments.as_slice() {
        [mid] | [mid, "video" | "upload" | "dynamic"] | [mid, "upload", "video"] => {
            (LinkType::User, ItemId::single(numeric(mid, url)?))
        }
        [mid, "lists", list] => {
            let link_type = match query_value(url, "type").as_deref() {
                Some("season") => LinkType::Season,
                Some("series") => LinkType::Series,
                _ => return Err(invalid()),
            };
            (link_type, ItemId::pair(numeric(mid, url)?, numeric(list, url)?))
        }
        [mid, "channel", "collectiondetail"] => {
            let sid = query_value(url, "sid").ok_or_else(invalid)?;
            (LinkType::Season, ItemId::pair(numeric(mid, url)?, numeric(&sid, url)?))
        }
        [mid, "channel", "seriesdetail"] => {
            let sid = query_value(url, "sid").ok_or_else(invalid)?;
            (LinkType::Series, ItemId::pair(numeric(mid, url)?, numeric(&sid, url)?))
        }
        _ => return Err(invalid()),
    };

    Ok(LinkInfo::new(Provider::Bilibili, link_type, item_id))
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

fn numeric(id: &str, url: &Url) -> Result<String, BuildError> {
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(id.to_string())
    } else {
        Err(BuildError::InvalidUrl(format!("invalid id {id:?} in {url}")))
    }
}
