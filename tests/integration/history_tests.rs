//! End-to-end tests for the dates pass

use crate::{catalog_path, read_catalog, test_config, OWNER, REPO};
use link_catalog::history::run_dates;
use link_catalog::CatalogError;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIRST: &str = "https://a.example.com";
const SECOND: &str = "https://b.example.com";
const NEVER_ADDED: &str = "https://c.example.com";

fn write_catalog(config: &link_catalog::Config, entries: serde_json::Value) {
    std::fs::write(
        catalog_path(config),
        serde_json::to_string_pretty(&entries).unwrap(),
    )
    .unwrap();
}

fn website(url: &str) -> serde_json::Value {
    json!({
        "url": url,
        "type": "website",
        "title": url.trim_start_matches("https://"),
        "fetchedAt": "2024-06-01T00:00:00Z",
    })
}

/// Two revisions of README.md: c1 adds FIRST, c2 adds SECOND
async fn mount_history(server: &MockServer, c1_calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/{}/commits", OWNER, REPO)))
        .and(query_param("path", "README.md"))
        .and(query_param("per_page", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ratelimit-remaining", "4999")
                .set_body_json(json!([
                    {"sha": "c2", "commit": {"author": {"name": "o", "date": "2024-02-01T00:00:00Z"}}},
                    {"sha": "c1", "commit": {"author": {"name": "o", "date": "2024-01-01T00:00:00Z"}}},
                ])),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/{}/commits/c1", OWNER, REPO)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sha": "c1",
            "files": [
                {"filename": "README.md", "patch": format!("@@ -0,0 +1,2 @@\n+# Links\n+- {}", FIRST)},
            ],
        })))
        .expect(c1_calls)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/{}/commits/c2", OWNER, REPO)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sha": "c2",
            "files": [
                {"filename": "notes.md", "patch": format!("+{}", NEVER_ADDED)},
                {"filename": "README.md", "patch": format!("@@ -2 +2,2 @@\n - {}\n+- {}", FIRST, SECOND)},
            ],
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_dates_from_revision_history() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir, "");
    write_catalog(
        &config,
        json!({
            FIRST: website(FIRST),
            SECOND: website(SECOND),
            NEVER_ADDED: website(NEVER_ADDED),
        }),
    );
    // Cached: c1 is fetched once even though every URL scans it
    mount_history(&server, 1).await;

    let before = chrono::Utc::now();
    let report = run_dates(&config).await.expect("Dates pass failed");
    assert_eq!(report.processed, 3);
    assert_eq!(report.from_history, 2);
    assert_eq!(report.provisional, 1);

    let catalog = read_catalog(&catalog_path(&config));
    assert_eq!(catalog[FIRST]["addedAt"], "2024-01-01T00:00:00Z");
    assert!(catalog[FIRST].get("addedAtProvisional").is_none());
    assert_eq!(catalog[SECOND]["addedAt"], "2024-02-01T00:00:00Z");

    // Only added in another file: wall-clock fallback
    let fallback = &catalog[NEVER_ADDED];
    assert_eq!(fallback["addedAtProvisional"], true);
    let at: chrono::DateTime<chrono::Utc> = fallback["addedAt"].as_str().unwrap().parse().unwrap();
    assert!(at >= before - chrono::Duration::seconds(1));

    // Other fields are untouched
    assert_eq!(catalog[FIRST]["fetchedAt"], "2024-06-01T00:00:00Z");
}

#[tokio::test]
async fn test_uncached_run_refetches_revisions() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir, "\n[history]\ncache-revisions = false\n");
    write_catalog(
        &config,
        json!({ FIRST: website(FIRST), SECOND: website(SECOND) }),
    );
    mount_history(&server, 2).await;

    let report = run_dates(&config).await.expect("Dates pass failed");
    assert_eq!(report.from_history, 2);
}

#[tokio::test]
async fn test_final_dates_are_not_rescanned() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir, "");

    let mut dated = website(FIRST);
    dated["addedAt"] = json!("2023-05-05T00:00:00Z");
    write_catalog(&config, json!({ FIRST: dated }));

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let report = run_dates(&config).await.expect("Dates pass failed");
    assert_eq!(report.skipped, 1);
    assert_eq!(
        read_catalog(&catalog_path(&config))[FIRST]["addedAt"],
        "2023-05-05T00:00:00Z"
    );
}

#[tokio::test]
async fn test_provisional_date_is_replaced() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir, "");

    let mut guessed = website(FIRST);
    guessed["addedAt"] = json!("2025-11-16T20:02:00Z");
    guessed["addedAtProvisional"] = json!(true);
    write_catalog(&config, json!({ FIRST: guessed }));
    mount_history(&server, 1).await;

    run_dates(&config).await.expect("Dates pass failed");

    let entry = &read_catalog(&catalog_path(&config))[FIRST];
    assert_eq!(entry["addedAt"], "2024-01-01T00:00:00Z");
    assert!(entry.get("addedAtProvisional").is_none());
}

#[tokio::test]
async fn test_history_failure_marks_dates_provisional() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir, "");
    write_catalog(&config, json!({ FIRST: website(FIRST) }));

    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/{}/commits", OWNER, REPO)))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let report = run_dates(&config).await.expect("Dates pass failed");
    assert_eq!(report.provisional, 1);
    assert_eq!(
        read_catalog(&catalog_path(&config))[FIRST]["addedAtProvisional"],
        true
    );
}

#[tokio::test]
async fn test_missing_catalog_is_fatal() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir, "");

    let err = run_dates(&config).await.unwrap_err();
    assert!(matches!(err, CatalogError::MissingCatalog { .. }));
}
