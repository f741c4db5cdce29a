//! File endpoint tests.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{Multipart, TestApp};

async fn setup(app: &TestApp) -> String {
    app.create_department("Finance").await;
    let folder = app.create_folder("finance", "Invoices").await;
    folder["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_upload_and_download() {
    let app = TestApp::new().await;
    let folder = setup(&app).await;

    let file = app.upload_pdf(&folder, "invoice-01.pdf").await;
    assert_eq!(file["fileName"], "invoice-01.pdf");
    assert_eq!(file["fileType"], "application/pdf");
    assert_eq!(file["fileSize"], 13);

    let url = file["url"].as_str().unwrap();
    let (status, bytes) = app.get_bytes(url).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"%PDF-1.4 test");

    let response = app.request("GET", "/folders/invoices/files", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_upload_requires_file_part() {
    let app = TestApp::new().await;
    let folder = setup(&app).await;

    let form = Multipart::new().text("note", "nothing attached");
    let response = app
        .multipart("POST", &format!("/folders/{folder}/files"), form)
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["details"]["file"].is_array());
}

#[tokio::test]
async fn test_disallowed_type_is_rejected() {
    let app = TestApp::new().await;
    let folder = setup(&app).await;

    let form = Multipart::new().file("file", "run.exe", "application/x-msdownload", b"MZ");
    let response = app
        .multipart("POST", &format!("/folders/{folder}/files"), form)
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let response = app.request("GET", &format!("/folders/{folder}/files"), None).await;
    assert!(response.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_rename_file() {
    let app = TestApp::new().await;
    let folder = setup(&app).await;
    let file = app.upload_pdf(&folder, "draft.pdf").await;
    let path = format!("/folders/{folder}/files/{}", file["id"].as_str().unwrap());

    let response = app
        .request("PUT", &path, Some(json!({ "fileName": "final.pdf" })))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["fileName"], "final.pdf");
    assert_eq!(response.body["filePath"], file["filePath"]);

    let response = app
        .request("PUT", &path, Some(json!({ "fileName": "   " })))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_file_must_belong_to_folder() {
    let app = TestApp::new().await;
    let folder = setup(&app).await;
    let other = app.create_folder("finance", "Receipts").await;
    let file = app.upload_pdf(&folder, "draft.pdf").await;

    let path = format!(
        "/folders/{}/files/{}",
        other["id"].as_str().unwrap(),
        file["id"].as_str().unwrap()
    );
    let response = app.request("DELETE", &path, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_archive_file() {
    let app = TestApp::new().await;
    let folder = setup(&app).await;
    let file = app.upload_pdf(&folder, "draft.pdf").await;
    let path = format!("/folders/{folder}/files/{}", file["id"].as_str().unwrap());

    let response = app.request("DELETE", &path, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "File 'draft.pdf' moved to the archive.");

    let response = app.request("GET", &format!("/folders/{folder}/files"), None).await;
    assert!(response.body.as_array().unwrap().is_empty());

    // bytes stay until a permanent delete
    let key = file["filePath"].as_str().unwrap();
    assert!(app.storage.exists(key).await.unwrap());
}

#[tokio::test]
async fn test_shared_folder_slug_is_narrowed_by_department() {
    let app = TestApp::new().await;
    app.create_department("HR").await;
    app.create_department("IT").await;
    app.create_folder("hr", "Policies").await;
    app.create_folder("it", "Policies").await;

    let response = app.request("GET", "/folders/policies/files", None).await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let form = Multipart::new().file("file", "leave.pdf", "application/pdf", b"%PDF-1.4 test");
    let response = app
        .multipart("POST", "/folders/policies/files?department=hr", form)
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let hr_file = response.body["id"].as_str().unwrap().to_string();

    let response = app
        .request("GET", "/folders/policies/files?department=hr", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 1);

    let response = app
        .request("GET", "/folders/policies/files?department=it", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.as_array().unwrap().is_empty());

    // the HR file is not reachable through the IT folder
    let response = app
        .request(
            "PUT",
            &format!("/folders/policies/files/{hr_file}?department=it"),
            Some(json!({ "fileName": "moved.pdf" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(
            "PUT",
            &format!("/folders/policies/files/{hr_file}?department=hr"),
            Some(json!({ "fileName": "leave-2026.pdf" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["fileName"], "leave-2026.pdf");

    let response = app
        .request(
            "DELETE",
            &format!("/folders/policies/files/{hr_file}?department=hr"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
