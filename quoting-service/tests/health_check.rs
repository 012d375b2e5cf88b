mod common;

use common::TestApp;
use serde_json::Value;

#[tokio::test]
#[ignore = "requires a running MongoDB at MONGODB_URI"]
async fn health_check_reports_ok() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to reach health endpoint");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Invalid health body");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "quoting-service");

    app.cleanup().await;
}
