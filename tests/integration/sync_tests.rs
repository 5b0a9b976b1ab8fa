//! End-to-end tests for the sync pass

use crate::{catalog_path, mount_document, read_catalog, test_config, OWNER, REPO};
use link_catalog::sync::run_sync;
use link_catalog::{CatalogError, SourceError};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VIDEO_URL: &str = "https://youtu.be/dQw4w9WgXcQ";

async fn mount_oembed(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .and(query_param(
            "url",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        ))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Never Gonna Give You Up",
            "author_name": "Rick Astley",
            "type": "video",
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_article(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    r#"<html><head>
                    <title>Fallback Title</title>
                    <meta property="og:title" content="Learning Rust">
                    <meta property="og:image" content="/img/cover.png">
                    <meta name="description" content="Notes on ownership">
                    </head><body>Hello</body></html>"#,
                )
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_sync_builds_catalog_from_document() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir, "");
    let base = server.uri();

    let readme = format!(
        "# Learning\n\n- Talk: {}\n- [Article]({}/article)\n- Gone: {}/missing.\n",
        VIDEO_URL, base, base
    );
    mount_document(&server, &readme).await;
    mount_oembed(&server, 1).await;
    mount_article(&server).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let report = run_sync(&config).await.expect("Sync failed");
    assert_eq!(report.extracted, 3);
    assert_eq!(report.inserted, 3);
    assert!(report.skipped.is_empty());
    assert!(report.removed.is_empty());

    let catalog = read_catalog(&catalog_path(&config));
    assert_eq!(catalog.as_object().unwrap().len(), 3);

    let video = &catalog[VIDEO_URL];
    assert_eq!(video["type"], "video");
    assert_eq!(video["title"], "Never Gonna Give You Up");
    assert_eq!(video["author"], "Rick Astley");
    assert_eq!(
        video["thumbnail"],
        format!("{}/vi/dQw4w9WgXcQ/maxresdefault.jpg", base)
    );
    assert!(video.get("addedAt").is_none());

    let article = &catalog[format!("{}/article", base).as_str()];
    assert_eq!(article["type"], "website");
    assert_eq!(article["title"], "Learning Rust");
    assert_eq!(article["image"], format!("{}/img/cover.png", base));
    assert_eq!(article["description"], "Notes on ownership");

    // Trailing period stripped; 404 falls back to the hostname
    let missing = &catalog[format!("{}/missing", base).as_str()];
    assert_eq!(missing["type"], "website");
    assert_eq!(missing["title"], "127.0.0.1");
    assert!(missing.get("image").is_none());
}

#[tokio::test]
async fn test_second_sync_prunes_without_refetching() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir, "");
    let base = server.uri();

    mount_document(
        &server,
        &format!("- {}\n- {}/article\n", VIDEO_URL, base),
    )
    .await;
    mount_oembed(&server, 1).await;
    mount_article(&server).await;
    run_sync(&config).await.expect("First sync failed");
    server.verify().await;

    let first = read_catalog(&catalog_path(&config));

    // The article link is removed; the video must not be looked up again
    server.reset().await;
    mount_document(&server, &format!("- {}\n", VIDEO_URL)).await;
    mount_oembed(&server, 0).await;

    let report = run_sync(&config).await.expect("Second sync failed");
    assert_eq!(report.new_links, 0);
    assert_eq!(report.removed, vec![format!("{}/article", base)]);

    let second = read_catalog(&catalog_path(&config));
    assert_eq!(second.as_object().unwrap().len(), 1);
    assert_eq!(second[VIDEO_URL], first[VIDEO_URL]);
}

#[tokio::test]
async fn test_unresolvable_video_is_left_out() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir, "");

    mount_document(&server, "Subscribe: https://www.youtube.com/@rustlang\n").await;
    mount_oembed(&server, 0).await;

    let report = run_sync(&config).await.expect("Sync failed");
    assert_eq!(report.skipped, vec!["https://www.youtube.com/@rustlang"]);

    let catalog = read_catalog(&catalog_path(&config));
    assert!(catalog.as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_oembed_failure_uses_placeholder() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir, "");

    mount_document(&server, VIDEO_URL).await;
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    run_sync(&config).await.expect("Sync failed");

    let video = &read_catalog(&catalog_path(&config))[VIDEO_URL];
    assert_eq!(video["title"], "YouTube Video");
    assert!(video["thumbnail"]
        .as_str()
        .unwrap()
        .ends_with("/dQw4w9WgXcQ/maxresdefault.jpg"));
    assert!(video.get("author").is_none());
}

#[tokio::test]
async fn test_document_fetch_failure_is_fatal() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir, "");

    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/{}/contents/README.md", OWNER, REPO)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = run_sync(&config).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Source(SourceError::Status { status: 404, .. })
    ));
    assert!(!catalog_path(&config).exists());
}
