mod common;

use std::time::Duration;

use common::{
    data_block, listing_page, story, story_wrapper, stream_doc, test_config, test_service,
};
use httpmock::{Method::GET, MockServer};
use serde_json::json;
use tempfile::TempDir;
use yfnews::{NewsError, ServiceConfig, Story};

const LISTING_PATH: &str = "/topic/latest-news/";

fn listing_body(ids: &[&str]) -> String {
    let wrappers: Vec<_> = ids
        .iter()
        .map(|id| story_wrapper(id, &format!("story {id}"), &format!("http://x/{id}"), &[]))
        .collect();
    listing_page(&[data_block(&stream_doc(json!(wrappers)))])
}

#[tokio::test]
async fn refresh_populates_the_snapshot_in_stream_order() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(200).body(listing_body(&["A1", "A2", "A3"]));
    });

    let tmp = TempDir::new().unwrap();
    let service = test_service(&server.url(LISTING_PATH), test_config(&tmp));

    service.refresh_now().await.unwrap();
    mock.assert();

    let stories = service.list_latest(None).await.unwrap();
    let ids: Vec<&str> = stories.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["A1", "A2", "A3"]);
}

#[tokio::test]
async fn listing_request_carries_browser_headers() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(LISTING_PATH)
            .header("accept-language", "en-US,en;q=0.9")
            .header_exists("user-agent");
        then.status(200).body(listing_body(&["A1"]));
    });

    let tmp = TempDir::new().unwrap();
    let service = test_service(&server.url(LISTING_PATH), test_config(&tmp));

    service.refresh_now().await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn empty_listing_keeps_the_previous_snapshot() {
    let server = MockServer::start();
    let mut good = server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(200).body(listing_body(&["A1", "A2"]));
    });

    let tmp = TempDir::new().unwrap();
    let service = test_service(&server.url(LISTING_PATH), test_config(&tmp));
    service.refresh_now().await.unwrap();
    good.delete();

    // A page whose blocks yield no stream is a soft failure: no write.
    server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(200)
            .body(listing_page(&[data_block(&stream_doc(json!([])))]));
    });
    service.refresh_now().await.unwrap();

    let stories = service.list_latest(None).await.unwrap();
    assert_eq!(stories.len(), 2, "empty parse must not clobber the snapshot");
}

#[tokio::test]
async fn fetch_failure_surfaces_and_keeps_the_previous_snapshot() {
    let server = MockServer::start();
    let mut good = server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(200).body(listing_body(&["A1"]));
    });

    let tmp = TempDir::new().unwrap();
    let service = test_service(&server.url(LISTING_PATH), test_config(&tmp));
    service.refresh_now().await.unwrap();
    good.delete();

    server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(500);
    });
    let err = service.refresh_now().await.unwrap_err();
    assert!(matches!(err, NewsError::Status { status: 500, .. }));

    assert_eq!(service.list_latest(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn list_latest_applies_the_default_and_explicit_limits() {
    let tmp = TempDir::new().unwrap();
    let server = MockServer::start();
    let service = test_service(&server.url(LISTING_PATH), test_config(&tmp));

    let snapshot: Vec<Story> = (0..60).map(|i| story(&format!("s{i}"))).collect();
    service.store().replace(&snapshot).await.unwrap();

    assert_eq!(service.list_latest(None).await.unwrap().len(), 50);
    assert_eq!(service.list_latest(Some(3)).await.unwrap().len(), 3);
    assert_eq!(service.list_latest(Some(500)).await.unwrap().len(), 60);
}

#[tokio::test]
async fn get_by_id_returns_the_first_match_for_duplicate_ids() {
    let tmp = TempDir::new().unwrap();
    let server = MockServer::start();
    let service = test_service(&server.url(LISTING_PATH), test_config(&tmp));

    let first = Story {
        title: Some("first occurrence".into()),
        ..story("x")
    };
    let second = Story {
        title: Some("shadowed duplicate".into()),
        ..story("x")
    };
    service
        .store()
        .replace(&[story("other"), first.clone(), second])
        .await
        .unwrap();

    let found = service.get_by_id("x").await.unwrap();
    assert_eq!(found, first);
}

#[tokio::test]
async fn get_by_id_on_an_absent_id_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let server = MockServer::start();
    let service = test_service(&server.url(LISTING_PATH), test_config(&tmp));
    service.store().replace(&[story("A1")]).await.unwrap();

    let err = service.get_by_id("ZZZ").await.unwrap_err();
    assert!(matches!(err, NewsError::NotFound(id) if id == "ZZZ"));
}

#[tokio::test]
async fn get_article_fetches_the_canonical_url_and_extracts_paragraphs() {
    let server = MockServer::start();
    let article_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/articles/a1.html")
            .header("accept-language", "en-US,en;q=0.9");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html><body><p>Hello</p><p>World</p></body></html>");
    });

    let tmp = TempDir::new().unwrap();
    let service = test_service(&server.url(LISTING_PATH), test_config(&tmp));
    let cached = Story {
        title: Some("T".into()),
        canonical_url: Some(server.url("/articles/a1.html")),
        ..story("A1")
    };
    service.store().replace(&[cached]).await.unwrap();

    let article = service.get_article("A1").await.unwrap();
    article_mock.assert();

    assert_eq!(article.id, "A1");
    assert_eq!(article.title.as_deref(), Some("T"));
    assert_eq!(article.url, server.url("/articles/a1.html"));
    assert_eq!(article.paragraph_count, 2);
    assert_eq!(article.paragraphs, ["Hello", "World"]);
}

#[tokio::test]
async fn get_article_without_a_canonical_url_never_touches_the_network() {
    let server = MockServer::start();
    let any_request = server.mock(|when, then| {
        when.method(GET);
        then.status(200);
    });

    let tmp = TempDir::new().unwrap();
    let service = test_service(&server.url(LISTING_PATH), test_config(&tmp));
    service.store().replace(&[story("A1")]).await.unwrap();

    let err = service.get_article("A1").await.unwrap_err();
    assert!(matches!(err, NewsError::IncompleteData(id) if id == "A1"));
    any_request.assert_hits(0);
}

#[tokio::test]
async fn scheduler_refreshes_periodically_and_stops_cleanly() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(200).body(listing_body(&["A1"]));
    });

    let tmp = TempDir::new().unwrap();
    let config = ServiceConfig {
        refresh_interval: Duration::from_millis(100),
        ..test_config(&tmp)
    };
    let service = test_service(&server.url(LISTING_PATH), config);

    service.start().await;
    assert!(service.scheduler_running().await);
    tokio::time::sleep(Duration::from_millis(350)).await;
    service.stop().await;
    assert!(!service.scheduler_running().await);

    let hits = mock.hits();
    assert!(hits >= 2, "expected the initial refresh plus ticks, saw {hits}");

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(mock.hits(), hits, "scheduler kept running after stop");
}
