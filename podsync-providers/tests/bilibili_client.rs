//! Bilibili client tests against a local mock server
//!
//! Run with: cargo test -p podsync-providers --test bilibili_client

use std::time::Duration;

use podsync_providers::{BilibiliClient, BilibiliError, ClientOptions};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> BilibiliClient {
    BilibiliClient::with_options(&ClientOptions {
        api_base: server.uri(),
        timeout: Duration::from_secs(2),
    })
    .expect("client")
}

#[tokio::test]
async fn sends_browser_headers_and_decodes_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/web-interface/view"))
        .and(query_param("bvid", "BV1xx411c7XZ"))
        .and(header("accept", "application/json"))
        .and(header("referer", "https://www.bilibili.com/"))
        .and(header("origin", "https://www.bilibili.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": "0",
            "data": {
                "aid": 170001,
                "bvid": "BV1xx411c7XZ",
                "title": "标题",
                "desc": "简介",
                "pic": "http://i0.hdslb.com/pic.jpg",
                "pubdate": 1700000000,
                "duration": 120,
                "is_upower_exclusive": true,
                "owner": { "mid": 7, "name": "up", "face": "f" },
                "stat": { "view": 42 }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = client_for(&server).get_episode_info("BV1xx411c7XZ").await.unwrap();
    assert_eq!(info.title, "标题");
    assert_eq!(info.duration, 120);
    assert!(info.is_upower_exclusive);
    assert_eq!(info.owner.name, "up");
    assert_eq!(info.stat.view, 42);
}

#[tokio::test]
async fn nonzero_code_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/web-interface/card"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": -404,
            "message": "啥都木有",
            "data": null
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).get_user_info("1").await.unwrap_err();
    match err {
        BilibiliError::Api { code, message } => {
            assert_eq!(code, -404);
            assert_eq!(message, "啥都木有");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_success_status_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/series/series"))
        .respond_with(ResponseTemplate::new(412))
        .mount(&server)
        .await;

    let err = client_for(&server).get_series_info("1067956").await.unwrap_err();
    assert!(matches!(err, BilibiliError::Http { status, .. } if status.as_u16() == 412));
    assert!(err.is_transport());
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/web-interface/card"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_user_info("1").await.unwrap_err();
    assert!(matches!(err, BilibiliError::Parse(_)));
}

#[tokio::test]
async fn stalled_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/web-interface/card"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": 0, "message": "0", "data": {} }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = BilibiliClient::with_options(&ClientOptions {
        api_base: server.uri(),
        timeout: Duration::from_millis(200),
    })
    .unwrap();

    let err = client.get_user_info("1").await.unwrap_err();
    assert!(matches!(err, BilibiliError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn user_listing_oversized_page_requests_everything() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/series/recArchivesByKeywords"))
        .and(query_param("keywords", ""))
        .and(query_param("mid", "1302298364"))
        .and(query_param("pn", "1"))
        .and(query_param("ps", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": "0",
            "data": {
                "archives": [{ "bvid": "BV1", "pubdate": 1 }, { "bvid": "BV2", "pubdate": 2 }],
                "page": { "num": 1, "size": 0, "total": 2 }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let listing = client_for(&server)
        .get_user_episodes_by_page("1302298364", 3, 250)
        .await
        .unwrap();
    assert_eq!(listing.archives.len(), 2);
    assert_eq!(listing.page.total, 2);
}

#[tokio::test]
async fn season_listing_zero_page_size_is_clamped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/polymer/web-space/seasons_archives_list"))
        .and(query_param("season_id", "678635"))
        .and(query_param("mid", "7380321"))
        .and(query_param("page_num", "2"))
        .and(query_param("page_size", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": "0",
            "data": {
                "aids": [],
                "archives": [],
                "meta": { "name": "合集", "cover": "c", "description": "d" },
                "page": { "page_num": 2, "page_size": 100, "total": 0 }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let season = client_for(&server)
        .get_season_episodes_by_page("7380321", "678635", 2, 0)
        .await
        .unwrap();
    assert_eq!(season.meta.name, "合集");
    assert_eq!(season.page.page_size, 100);
}

#[tokio::test]
async fn series_listing_in_range_page_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/series/archives"))
        .and(query_param("mid", "7458285"))
        .and(query_param("series_id", "1067956"))
        .and(query_param("ps", "100"))
        .and(query_param("pn", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": "0",
            "data": {
                "archives": null,
                "page": { "num": 1, "size": 100, "count": 0 }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let series = client_for(&server)
        .get_series_episodes_by_page("7458285", "1067956", 1, 100)
        .await
        .unwrap();
    assert!(series.archives.is_empty());
}
