//! End-to-end tests against a mock HTTP server
//!
//! The client is blocking, so every call runs on tokio's blocking pool
//! while the mock server keeps serving.

use eporner_core::{
    ClientConfig, EpornerClient, EpornerError, Order, RemovedFormat, RemovedVideo, SearchParams,
    ThumbSize, VideoIdParams,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        connect_timeout_secs: 2,
        ..ClientConfig::default()
    }
}

async fn blocking<F, R>(f: F) -> R
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("Blocking task should not panic")
}

fn video_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Video {id}"),
        "keywords": "tag1, tag2",
        "views": 1234,
        "rate": "4.12",
        "url": format!("https://www.eporner.com/video-{id}/"),
        "added": "2024-05-06 07:08:09",
        "length_sec": 600,
        "length_min": "10:00",
        "embed": format!("https://www.eporner.com/embed/{id}/"),
        "default_thumb": {"size": "medium", "width": 427, "height": 240, "src": format!("https://static/{id}.jpg")},
        "thumbs": [{"size": "medium", "width": 427, "height": 240, "src": format!("https://static/{id}_1.jpg")}]
    })
}

fn search_body(page: u64, total_pages: u64, ids: &[&str]) -> String {
    let videos: Vec<_> = ids.iter().map(|id| video_json(id)).collect();
    json!({
        "count": ids.len(),
        "start": (page - 1) * ids.len() as u64,
        "per_page": ids.len(),
        "page": page,
        "time_ms": 3,
        "total_count": total_pages * ids.len() as u64,
        "total_pages": total_pages,
        "videos": videos,
    })
    .to_string()
}

#[tokio::test]
async fn test_search_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/video/search/"))
        .and(query_param("query", "big cats"))
        .and(query_param("per_page", "2"))
        .and(query_param("page", "1"))
        .and(query_param("order", "top-rated"))
        .and(query_param("thumbsize", "big"))
        .and(query_param("gay", "0"))
        .and(query_param("lq", "1"))
        .and(query_param("format", "json"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(search_body(1, 4, &["a1", "a2"]), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let page = blocking(move || {
        let client = EpornerClient::with_config(config)?;
        let params = SearchParams::new("big cats")
            .with_per_page(2)
            .with_order(Order::TopRated)
            .with_thumbsize(ThumbSize::Big);
        client.search(&params)
    })
    .await
    .expect("Search should succeed");

    assert_eq!(page.len(), 2);
    assert_eq!(page.total_pages, 4);
    assert_eq!(page.next_page(), Some(2));
    assert_eq!(page.videos[0].id, "a1");
    assert_eq!(page.videos[0].rate, 4.12);
    assert_eq!(page.videos[0].keywords_list(), ["tag1", "tag2"]);
    assert_eq!(page.videos[1].thumbs[0].src, "https://static/a2_1.jpg");
}

#[tokio::test]
async fn test_search_xml() {
    let server = MockServer::start().await;
    let body = r#"<?xml version="1.0" encoding="UTF-8"?>
        <search>
            <count>1</count><start>0</start><per_page>1</per_page><page>1</page>
            <time_ms>2</time_ms><total_count>1</total_count><total_pages>1</total_pages>
            <videos>
                <video>
                    <id>x1</id><title>XML &amp; more</title><url>https://u/x1</url><embed>https://e/x1</embed>
                    <views>10</views>
                    <default_thumb size="big" width="640" height="360" src="https://static/x1.jpg"/>
                </video>
            </videos>
        </search>"#;
    Mock::given(method("GET"))
        .and(path("/api/v2/video/search/"))
        .and(query_param("format", "xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/xml"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let page = blocking(move || {
        let client = EpornerClient::with_config(config)?;
        client.search(&SearchParams::default().with_format(eporner_core::Format::Xml))
    })
    .await
    .expect("Search should succeed");

    assert_eq!(page.len(), 1);
    let video = &page.videos[0];
    assert_eq!(video.title, "XML & more");
    assert_eq!(video.views, 10);
    assert_eq!(video.default_thumb.size, ThumbSize::Big);
    assert_eq!(video.default_thumb.width, 640);
}

#[tokio::test]
async fn test_api_key_is_sent_as_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/video/id/"))
        .and(query_param("id", "k1"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(video_json("k1").to_string(), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig {
        api_key: Some("secret".to_string()),
        ..config_for(&server)
    };
    let video = blocking(move || {
        let client = EpornerClient::with_config(config)?;
        client.get_video("k1", None)
    })
    .await
    .expect("Lookup should succeed");

    assert_eq!(video.map(|v| v.id), Some("k1".to_string()));
}

#[tokio::test]
async fn test_get_video_removed_returns_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/video/id/"))
        .and(query_param("id", "gone"))
        .and(query_param("thumbsize", "small"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let video = blocking(move || {
        let client = EpornerClient::with_config(config)?;
        let params = VideoIdParams::new().with_thumbsize(ThumbSize::Small);
        client.get_video("gone", Some(params))
    })
    .await
    .expect("Lookup should succeed");

    assert_eq!(video, None);
}

#[tokio::test]
async fn test_get_removed_videos_txt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/video/removed/"))
        .and(query_param("format", "txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("123\n\n456\n  789  \n"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let removed = blocking(move || {
        let client = EpornerClient::with_config(config)?;
        client.get_removed_videos(RemovedFormat::Txt)
    })
    .await
    .expect("Removed list should load");

    assert_eq!(
        removed,
        vec![
            RemovedVideo::from_id("123"),
            RemovedVideo::from_id("456"),
            RemovedVideo::from_id("789"),
        ]
    );
}

#[tokio::test]
async fn test_get_removed_videos_xml() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/video/removed/"))
        .and(query_param("format", "xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<removed><video><id>r1</id></video><video><id>r2</id></video></removed>",
            "text/xml",
        ))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let removed = blocking(move || {
        let client = EpornerClient::with_config(config)?;
        client.get_removed_videos(RemovedFormat::Xml)
    })
    .await
    .expect("Removed list should load");

    assert_eq!(removed, vec![RemovedVideo::from_id("r1"), RemovedVideo::from_id("r2")]);
}

#[tokio::test]
async fn test_server_error_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let result = blocking(move || {
        let client = EpornerClient::with_config(config)?;
        client.search(&SearchParams::default())
    })
    .await;

    match result {
        Err(EpornerError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("Expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_json_surfaces_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"videos\": [", "application/json"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let result = blocking(move || {
        let client = EpornerClient::with_config(config)?;
        client.search(&SearchParams::default())
    })
    .await;

    assert!(matches!(result, Err(EpornerError::Parse(_))));
}

#[tokio::test]
async fn test_search_iter_walks_pages_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/video/search/"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(search_body(1, 2, &["p1a", "p1b"]), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/video/search/"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(search_body(2, 2, &["p2a"]), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let (ids, yielded, page) = blocking(move || {
        let client = EpornerClient::with_config(config).expect("Client should build");
        let mut iter = client.search_iter(&SearchParams::new("cats").with_per_page(2));
        let ids: Vec<String> = iter.by_ref().map(|v| v.id).collect();
        (ids, iter.yielded(), iter.current_page())
    })
    .await;

    assert_eq!(ids, ["p1a", "p1b", "p2a"]);
    assert_eq!(yielded, 3);
    assert_eq!(page, 2);
}

#[tokio::test]
async fn test_search_iter_stops_quietly_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(search_body(1, 3, &["only"]), "application/json"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let (ids, stopped_on_status) = blocking(move || {
        let client = EpornerClient::with_config(config).expect("Client should build");
        let mut iter = client.search_iter(&SearchParams::default());
        let ids: Vec<String> = iter.by_ref().map(|v| v.id).collect();
        let stopped = matches!(iter.last_error(), Some(EpornerError::Status { status: 500, .. }));
        (ids, stopped)
    })
    .await;

    assert_eq!(ids, ["only"]);
    assert!(stopped_on_status);
}
