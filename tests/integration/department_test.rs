//! Department endpoint tests.

use axum::http::StatusCode;

use crate::helpers::{Multipart, TestApp};

#[tokio::test]
async fn test_create_department_returns_slug_and_root_folder() {
    let app = TestApp::new().await;

    let body = app.create_department("Human Resources").await;
    assert_eq!(body["slug"], "human-resources");
    assert_eq!(body["root_folder"]["folderName"], "Human Resources");
    assert_eq!(body["root_folder"]["slug"], "human-resources");
    assert!(body["image_url"].is_null());

    let response = app.request("GET", "/departments/human-resources", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], body["id"]);
    assert!(response.body.get("root_folder").is_none());
}

#[tokio::test]
async fn test_duplicate_name_is_unprocessable() {
    let app = TestApp::new().await;
    app.create_department("Finance").await;

    let form = Multipart::new().text("name", "Finance").text("alias", "FN");
    let response = app.multipart("POST", "/departments", form).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["details"]["name"].is_array());
}

#[tokio::test]
async fn test_missing_fields_are_reported() {
    let app = TestApp::new().await;

    let form = Multipart::new().text("alias", "X");
    let response = app.multipart("POST", "/departments", form).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["details"]["name"].is_array());
}

#[tokio::test]
async fn test_image_is_stored_and_served() {
    let app = TestApp::new().await;

    let form = Multipart::new()
        .text("name", "Design")
        .text("alias", "DES")
        .file("image", "logo.png", "image/png", b"\x89PNG\r\n");
    let response = app.multipart("POST", "/departments", form).await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

    let url = response.body["image_url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/storage/departments/"));

    let (status, bytes) = app.get_bytes(&url).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"\x89PNG\r\n");
}

#[tokio::test]
async fn test_form_update_requires_method_override() {
    let app = TestApp::new().await;
    let created = app.create_department("Legal").await;
    let path = format!("/departments/{}", created["id"].as_str().unwrap());

    let form = Multipart::new().text("name", "Legal Affairs").text("alias", "LA");
    let response = app.multipart("POST", &path, form).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["details"]["_method"].is_array());

    let form = Multipart::new()
        .text("_method", "PUT")
        .text("name", "Legal Affairs")
        .text("alias", "LA");
    let response = app.multipart("POST", &path, form).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Legal Affairs");
    assert_eq!(response.body["slug"], "legal");
}

#[tokio::test]
async fn test_list_filters_by_query() {
    let app = TestApp::new().await;
    app.create_department("Finance").await;
    app.create_department("Marketing").await;

    let response = app.request("GET", "/departments?q=fin", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<_> = response.body.as_array().unwrap().iter().map(|d| d["name"].clone()).collect();
    assert_eq!(names, vec!["Finance"]);
}

#[tokio::test]
async fn test_delete_department_removes_everything() {
    let app = TestApp::new().await;
    let created = app.create_department("Legal").await;
    let root = created["root_folder"]["id"].as_str().unwrap().to_string();
    let file = app.upload_pdf(&root, "contract.pdf").await;
    let key = file["filePath"].as_str().unwrap().to_string();

    let path = format!("/departments/{}", created["id"].as_str().unwrap());
    let response = app.request("DELETE", &path, None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    assert!(!app.storage.exists(&key).await.unwrap());
    let response = app.request("GET", "/departments/legal", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let response = app.request("GET", &format!("/folders/{root}/files"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_department_is_not_found() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/departments/nowhere", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");

    let response = app.request("DELETE", "/departments/not-a-uuid", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_new_department_has_exactly_its_root_folder() {
    let app = TestApp::new().await;

    let form = Multipart::new()
        .text("name", "Finance")
        .text("alias", "FIN")
        .file("image", "logo.jpg", "image/jpeg", b"\xff\xd8\xff\xe0");
    let response = app.multipart("POST", "/departments", form).await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["slug"], "finance");

    let response = app.request("GET", "/departments/finance/folders", None).await;
    let folders = response.body.as_array().unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0]["folderName"], "Finance");
}

#[tokio::test]
async fn test_alias_is_optional() {
    let app = TestApp::new().await;

    let form = Multipart::new().text("name", "Operations");
    let response = app.multipart("POST", "/departments", form).await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["alias"], "");
}

#[tokio::test]
async fn test_stored_image_must_be_a_department_image() {
    let app = TestApp::new().await;
    let department = app.create_department("Finance").await;
    let root = department["root_folder"]["id"].as_str().unwrap().to_string();
    let file = app.upload_pdf(&root, "ledger.pdf").await;
    let key = file["filePath"].as_str().unwrap();

    let form = Multipart::new()
        .text("name", "Design")
        .text("alias", "DES")
        .text("image", key);
    let response = app.multipart("POST", "/departments", form).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["details"]["image"].is_array());
    assert!(app.storage.exists(key).await.unwrap());

    let response = app.request("GET", &format!("/folders/{root}/files"), None).await;
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}
