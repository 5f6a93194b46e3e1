mod common;

use url_shortener::domain::entities::NewShortLink;
use url_shortener::domain::repositories::LinkRepository;

#[tokio::test]
async fn test_redirect_success() {
    let app = common::TestApp::new();
    let server = app.server();

    let alias = app
        .state
        .link_service
        .create_short_url("https://example.com/target")
        .await
        .unwrap();

    let response = server.get(&format!("/{alias}")).await;

    assert_eq!(response.status_code(), 302);

    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_does_not_require_session() {
    let app = common::TestApp::new();
    let server = app.server();

    let alias = app
        .state
        .link_service
        .create_short_url("https://example.com")
        .await
        .unwrap();

    let response = server.get(&format!("/{alias}")).await;

    assert_ne!(response.header("location"), "/login");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server.get("/notfound").await;

    response.assert_status_not_found();
    assert!(response.text().contains("Short link not found"));
}

#[tokio::test]
async fn test_redirect_rejects_non_alias_paths() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server.get("/favicon.ico").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_preserves_query_string_of_target() {
    let app = common::TestApp::new();
    let server = app.server();

    let target = "https://example.com/search?q=rust&page=2";
    let alias = app
        .state
        .link_service
        .create_short_url(target)
        .await
        .unwrap();

    let response = server.get(&format!("/{alias}")).await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), target);
}

#[tokio::test]
async fn test_redirect_refuses_url_unfit_for_location_header() {
    let app = common::TestApp::new();
    let server = app.server();

    app.links
        .insert_link(NewShortLink {
            alias: "legacy1".to_string(),
            original_url: "https://example.com/a\nb".to_string(),
        })
        .await
        .unwrap();

    let response = server.get("/legacy1").await;

    assert_eq!(response.status_code(), 500);
    assert!(response.maybe_header("location").is_none());
}
