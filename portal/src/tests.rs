//! HTTP端到端测试
//!
//! 通过 `tower::ServiceExt::oneshot` 直接驱动路由，公共目录使用临时目录

use crate::config::Config;
use crate::server::{create_router, init_app_state};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "portal-test-boundary";

struct TestApp {
    temp_dir: TempDir,
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        Self::with_limits("50MB", "64MB")
    }

    fn with_limits(max_file_size: &str, max_request_body_size: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();

        let mut config = Config::default();
        config.storage.public_dir = temp_dir.path().join("public");
        config.storage.max_file_size = max_file_size.to_string();
        config.server.max_request_body_size = max_request_body_size.to_string();

        let state = init_app_state(config.storage_settings().unwrap());
        let router = create_router(state, config.max_request_body_size().unwrap());
        Self { temp_dir, router }
    }

    fn public(&self) -> PathBuf {
        self.temp_dir.path().join("public")
    }

    fn uploads(&self) -> PathBuf {
        self.public().join("uploads")
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = self.send(request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn upload(&self, fields: &[(&str, &str)], file_name: &str, content: &[u8]) -> (StatusCode, Value) {
        self.send_json(upload_request(fields, Some((file_name, content)))).await
    }

    async fn delete(&self, body: Value) -> (StatusCode, Value) {
        self.send_json(delete_request(body.to_string())).await
    }
}

fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes(),
        );
    }
    if let Some((file_name, content)) = file {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields, file)))
        .unwrap()
}

fn delete_request(body: String) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri("/api/delete")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

const TAGS: [(&str, &str); 3] = [("grade", "Grade 10"), ("subject", "Math!"), ("medium", "English")];

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_upload_success() {
    let app = TestApp::new();
    let content = vec![42u8; 1024];

    let (status, body) = app.upload(&TAGS, "notes.pdf", &content).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["fileSize"], 1024);
    assert_eq!(body["message"], "File uploaded successfully!");

    let file_url = body["fileUrl"].as_str().unwrap();
    let relative_path = body["relativePath"].as_str().unwrap();
    assert!(file_url.starts_with("/uploads/Grade_10/Math/English/"));
    assert_eq!(file_url, format!("/{relative_path}"));
    assert!(body["fileName"].as_str().unwrap().ends_with("_notes.pdf"));

    assert_eq!(std::fs::read(app.public().join(relative_path)).unwrap(), content);
}

#[tokio::test]
async fn test_uploaded_file_is_served() {
    let app = TestApp::new();
    let (_, body) = app.upload(&TAGS, "diagram.png", b"fake png bytes").await;

    let request = Request::builder()
        .uri(body["fileUrl"].as_str().unwrap())
        .body(Body::empty())
        .unwrap();
    let (status, bytes) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"fake png bytes");
}

#[tokio::test]
async fn test_upload_missing_field() {
    let app = TestApp::new();
    let (status, body) = app
        .upload(&[("grade", "Grade 10"), ("subject", "Math")], "notes.pdf", b"x")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "All fields are required");
    assert_eq!(body["details"]["missing"], json!(["medium"]));
    assert!(!app.uploads().exists());
}

#[tokio::test]
async fn test_upload_without_file() {
    let app = TestApp::new();
    let (status, body) = app.send_json(upload_request(&TAGS, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["missing"], json!(["file"]));
}

#[tokio::test]
async fn test_upload_too_large() {
    let app = TestApp::with_limits("1KB", "64MB");
    let content = vec![0u8; 2048];

    for _ in 0..2 {
        let (status, body) = app.upload(&TAGS, "notes.pdf", &content).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "File size exceeds 1KB limit");
    }
    assert!(!app.uploads().exists());
}

#[tokio::test]
async fn test_upload_exceeding_request_limit() {
    let app = TestApp::with_limits("1KB", "4KB");
    let content = vec![0u8; 16 * 1024];

    let (status, body) = app.upload(&TAGS, "lecture.mp4", &content).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("File size exceeds"));
    assert!(!app.uploads().exists());
}

#[tokio::test]
async fn test_upload_unsupported_type() {
    let app = TestApp::new();
    let (status, body) = app.upload(&TAGS, "payload.exe", b"MZ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid file type. Allowed types: .pdf, .doc, .docx, .ppt, .pptx, .jpg, .jpeg, .png, .gif, .mp4, .avi, .mov"
    );
    assert!(!app.uploads().exists());
}

#[tokio::test]
async fn test_upload_requires_multipart() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/upload")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let (status, body) = app.send_json(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_round_trip() {
    let app = TestApp::new();
    let (_, uploaded) = app.upload(&TAGS, "notes.pdf", b"%PDF").await;
    let relative_path = uploaded["relativePath"].as_str().unwrap();

    let (status, body) = app.delete(json!({ "filePath": relative_path })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["deletedPath"], relative_path);
    assert_eq!(body["message"], "File deleted successfully and empty folders cleaned!");
    assert!(!app.public().join(relative_path).exists());
    assert!(!app.uploads().join("Grade_10").exists());
    assert!(app.uploads().is_dir());
}

#[tokio::test]
async fn test_delete_traversal() {
    let app = TestApp::new();
    let (status, body) = app.delete(json!({ "filePath": "../../etc/passwd" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid file path");
}

#[tokio::test]
async fn test_delete_empty_path() {
    let app = TestApp::new();
    let (status, body) = app.delete(json!({ "filePath": "" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_delete_not_found() {
    let app = TestApp::new();
    let (status, body) = app
        .delete(json!({ "filePath": "uploads/Grade_10/Math/English/missing.pdf" }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "File not found");
}

#[tokio::test]
async fn test_delete_directory() {
    let app = TestApp::new();
    app.upload(&TAGS, "notes.pdf", b"%PDF").await;

    let (status, body) = app.delete(json!({ "filePath": "uploads/Grade_10/Math" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Path does not point to a file");
    assert!(app.uploads().join("Grade_10/Math/English").is_dir());
}

#[tokio::test]
async fn test_delete_malformed_body() {
    let app = TestApp::new();

    let (status, body) = app.send_json(delete_request("not json".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request data");

    let (status, body) = app.delete(json!({ "path": "uploads/x.pdf" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request data");
}

#[tokio::test]
async fn test_openapi_document() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();

    let (status, body) = app.send_json(request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/upload"].is_object());
    assert!(body["paths"]["/api/delete"].is_object());
}
