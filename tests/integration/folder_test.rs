//! Folder endpoint tests.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_and_list_folders() {
    let app = TestApp::new().await;
    app.create_department("Finance").await;

    let folder = app.create_folder("finance", "Quarterly Reports").await;
    assert_eq!(folder["slug"], "quarterly-reports");
    assert!(folder["archived_at"].is_null());

    let response = app.request("GET", "/departments/finance/folders", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 2);

    let response = app
        .request("GET", "/departments/finance/folders?q=quarter", None)
        .await;
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_folder_names_get_suffixed_slugs() {
    let app = TestApp::new().await;
    app.create_department("Finance").await;

    let first = app.create_folder("finance", "Budget").await;
    let second = app.create_folder("finance", "Budget").await;
    assert_eq!(first["slug"], "budget");
    assert_eq!(second["slug"], "budget-1");
}

#[tokio::test]
async fn test_blank_folder_name_is_rejected() {
    let app = TestApp::new().await;
    app.create_department("Finance").await;

    let response = app
        .request(
            "POST",
            "/departments/finance/folders",
            Some(json!({ "folderName": "" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["details"]["folderName"].is_array());
}

#[tokio::test]
async fn test_lookup_by_slug_and_ambiguity() {
    let app = TestApp::new().await;
    app.create_department("HR").await;
    app.create_department("IT").await;
    let hr = app.create_folder("hr", "Policies").await;
    app.create_folder("it", "Policies").await;

    let response = app.request("GET", "/folders/slug/policies", None).await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request("GET", "/folders/slug/policies?department=hr", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], hr["id"]);
}

#[tokio::test]
async fn test_rename_keeps_slug() {
    let app = TestApp::new().await;
    app.create_department("Finance").await;
    let folder = app.create_folder("finance", "Budget").await;
    let path = format!("/folders/{}", folder["id"].as_str().unwrap());

    let response = app
        .request(
            "PUT",
            &path,
            Some(json!({ "folderName": "Budget 2025", "description": "Approved" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["folderName"], "Budget 2025");
    assert_eq!(response.body["description"], "Approved");
    assert_eq!(response.body["slug"], "budget");
}

#[tokio::test]
async fn test_archive_folder_hides_it() {
    let app = TestApp::new().await;
    app.create_department("Finance").await;
    let folder = app.create_folder("finance", "Budget").await;
    let path = format!("/folders/{}", folder["id"].as_str().unwrap());

    let response = app.request("DELETE", &path, None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", "/folders/slug/budget", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("DELETE", &path, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
