//! Archive endpoint tests.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_archived_items_are_listed_newest_first() {
    let app = TestApp::new().await;
    app.create_department("Finance").await;
    let folder = app.create_folder("finance", "Invoices").await;
    let folder_id = folder["id"].as_str().unwrap().to_string();
    let file = app.upload_pdf(&folder_id, "invoice.pdf").await;

    let path = format!("/folders/{folder_id}/files/{}", file["id"].as_str().unwrap());
    app.request("DELETE", &path, None).await;
    app.request("DELETE", &format!("/folders/{folder_id}"), None).await;

    let response = app.request("GET", "/archive", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["type"], "folder");
    assert_eq!(items[0]["name"], "Invoices");
    assert_eq!(items[0]["department_name"], "Finance");
    assert_eq!(items[1]["type"], "file");
    assert_eq!(items[1]["metadata"]["original_folder_name"], "Invoices");
}

#[tokio::test]
async fn test_restore_folder_leaves_files_archived() {
    let app = TestApp::new().await;
    app.create_department("Finance").await;
    let folder = app.create_folder("finance", "Invoices").await;
    let folder_id = folder["id"].as_str().unwrap().to_string();
    let file = app.upload_pdf(&folder_id, "invoice.pdf").await;
    let file_id = file["id"].as_str().unwrap().to_string();

    app.request("DELETE", &format!("/folders/{folder_id}"), None).await;

    let response = app
        .request("POST", &format!("/archive/folder/{folder_id}/restore"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let message = response.body["message"].as_str().unwrap();
    assert!(message.starts_with("Folder 'Invoices' restored."));
    assert!(message.contains("restored individually"));

    let response = app.request("GET", &format!("/folders/{folder_id}/files"), None).await;
    assert!(response.body.as_array().unwrap().is_empty());

    let response = app
        .request("POST", &format!("/archive/file/{file_id}/restore"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "File 'invoice.pdf' restored.");

    let response = app.request("GET", &format!("/folders/{folder_id}/files"), None).await;
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_restoring_active_item_is_not_found() {
    let app = TestApp::new().await;
    app.create_department("Finance").await;
    let folder = app.create_folder("finance", "Invoices").await;

    let path = format!("/archive/folder/{}/restore", folder["id"].as_str().unwrap());
    let response = app.request("POST", &path, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_item_type_is_not_found() {
    let app = TestApp::new().await;
    let folder_id = uuid::Uuid::now_v7();

    let response = app
        .request("POST", &format!("/archive/widget/{folder_id}/restore"), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_permanent_delete_is_not_implemented() {
    let app = TestApp::new().await;
    app.create_department("Finance").await;
    let folder = app.create_folder("finance", "Invoices").await;
    let folder_id = folder["id"].as_str().unwrap().to_string();
    let path = format!("/archive/folder/{folder_id}");

    // only archived items qualify
    let response = app.request("DELETE", &path, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    app.request("DELETE", &format!("/folders/{folder_id}"), None).await;
    let response = app.request("DELETE", &path, None).await;
    assert_eq!(response.status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(response.body["error"], "NOT_IMPLEMENTED");
}

#[tokio::test]
async fn test_archiving_folder_cascades_to_its_files() {
    let app = TestApp::new().await;
    app.create_department("Finance").await;
    let folder = app.create_folder("finance", "Invoices").await;
    let folder_id = folder["id"].as_str().unwrap().to_string();
    let first = app.upload_pdf(&folder_id, "jan.pdf").await;
    let second = app.upload_pdf(&folder_id, "jan.pdf").await;
    assert_ne!(first["id"], second["id"]);
    assert_ne!(first["filePath"], second["filePath"]);

    let response = app.request("DELETE", &format!("/folders/{folder_id}"), None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", "/archive", None).await;
    let items = response.body.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i["department_name"] == "Finance"));
    assert!(items.iter().all(|i| i["archived_at"].is_string()));

    // one activity for the whole cascade
    let response = app.request("GET", "/activities", None).await;
    let deleted: Vec<_> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["status"] == "deleted")
        .collect();
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0]["type"], "folder");
}
