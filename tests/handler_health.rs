mod common;

#[tokio::test]
async fn test_health_endpoint_success() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_is_public() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 200);
    assert!(response.maybe_header("location").is_none());
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("database").is_some());
}
