//! Activity feed tests.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_feed_records_folder_and_file_events() {
    let app = TestApp::new().await;
    app.create_department("Finance").await;
    let folder = app.create_folder("finance", "Invoices").await;
    let folder_id = folder["id"].as_str().unwrap().to_string();
    app.upload_pdf(&folder_id, "invoice.pdf").await;
    app.request(
        "PUT",
        &format!("/folders/{folder_id}"),
        Some(json!({ "folderName": "Paid Invoices" })),
    )
    .await;

    let response = app.request("GET", "/activities", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let entries = response.body.as_array().unwrap();
    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0]["type"], "folder");
    assert_eq!(entries[0]["status"], "renamed");
    assert_eq!(entries[0]["item_name"], "Paid Invoices");
    assert_eq!(entries[1]["type"], "file");
    assert_eq!(entries[1]["status"], "added");
    assert_eq!(entries[1]["folder_name"], "Paid Invoices");
    assert_eq!(entries[2]["status"], "added");
    assert_eq!(entries[2]["department_name"], "Finance");
}

#[tokio::test]
async fn test_feed_limit() {
    let app = TestApp::new().await;
    app.create_department("Finance").await;
    for name in ["A1", "B2", "C3"] {
        app.create_folder("finance", name).await;
    }

    let response = app.request("GET", "/activities?limit=2", None).await;
    let entries = response.body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["item_name"], "C3");
}

#[tokio::test]
async fn test_zero_limit_returns_empty_feed() {
    let app = TestApp::new().await;
    app.create_department("Finance").await;
    app.create_folder("finance", "Budget").await;

    let response = app.request("GET", "/activities?limit=0", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.as_array().unwrap().is_empty());
}
