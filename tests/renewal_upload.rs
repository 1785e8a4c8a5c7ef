//! Integration tests for the bulk training renewal upload

use isg_tools::renewal::{RenewalUploader, UploadError, UploaderConfig};
use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UPLOAD_PATH: &str = "/api/personnel/reports/isg-temel-training-renewal/apply-excel";

fn uploader_for(base_url: &str) -> RenewalUploader {
    RenewalUploader::new(reqwest::Client::new(), UploaderConfig::from_base_url(base_url))
}

fn spreadsheet(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents).unwrap();
    path
}

/// Whether this process still holds a descriptor pointing at `target`
#[cfg(target_os = "linux")]
fn holds_open_handle(target: &Path) -> bool {
    let target = target.canonicalize().unwrap();
    std::fs::read_dir("/proc/self/fd")
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| std::fs::read_link(entry.path()).ok())
        .any(|link| link == target)
}

#[tokio::test]
async fn test_missing_file_fails_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let missing = Path::new("/nonexistent/AKDO PERSONEL VERİ TAKİP TABLOSU.xlsx");
    let err = uploader_for(&server.uri())
        .upload_file(missing, true)
        .await
        .unwrap_err();

    match err {
        UploadError::FileNotFound(p) => assert_eq!(p, missing),
        other => panic!("expected FileNotFound, got {:?}", other),
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_summary_round_trip_preserves_identifier_order() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let file = spreadsheet(&dir, "renewal.xlsx", b"PK\x03\x04 fake workbook bytes");

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalRows": 10,
            "updatedCount": 7,
            "skippedCount": 2,
            "notFoundCount": 1,
            "updatedTcList": ["A", "B"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let summary = uploader_for(&server.uri())
        .upload_file(&file, true)
        .await
        .unwrap();

    assert_eq!(summary.total_rows, 10);
    assert_eq!(summary.updated_count, 7);
    assert_eq!(summary.skipped_count, 2);
    assert_eq!(summary.not_found_count, 1);
    assert_eq!(summary.updated_identifiers, vec!["A".to_string(), "B".to_string()]);
}

#[tokio::test]
async fn test_multipart_carries_file_and_overwrite_flag() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let contents = b"spreadsheet-bytes-0123456789";
    let file = spreadsheet(&dir, "ISG.xlsx", contents);

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalRows": 0, "updatedCount": 0, "skippedCount": 0, "notFoundCount": 0,
            "updatedTcList": []
        })))
        .mount(&server)
        .await;

    uploader_for(&server.uri())
        .upload_file(&file, false)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\"; filename=\"ISG.xlsx\""));
    assert!(body.contains("spreadsheet-bytes-0123456789"));
    assert!(body.contains("name=\"overwriteExisting\""));
    assert!(body.contains("\r\n\r\nfalse\r\n"));
}

#[tokio::test]
async fn test_non_200_preserves_status_and_body() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let file = spreadsheet(&dir, "renewal.xlsx", b"bytes");

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(422).set_body_string(r#"{"error":"bad format"}"#))
        .mount(&server)
        .await;

    let err = uploader_for(&server.uri())
        .upload_file(&file, true)
        .await
        .unwrap_err();

    match err {
        UploadError::Rejected { status, body } => {
            assert_eq!(status, 422);
            assert!(body.contains("bad format"));
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unparsable_200_is_malformed_not_zero() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let file = spreadsheet(&dir, "renewal.xlsx", b"bytes");

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let err = uploader_for(&server.uri())
        .upload_file(&file, true)
        .await
        .unwrap_err();

    match err {
        UploadError::MalformedResponse { body, .. } => assert!(body.contains("proxy error")),
        other => panic!("expected MalformedResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_inconsistent_server_counts_do_not_crash() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let file = spreadsheet(&dir, "renewal.xlsx", b"bytes");

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalRows": 1,
            "updatedCount": 5,
            "skippedCount": 5,
            "notFoundCount": 5,
            "updatedTcList": ["X"]
        })))
        .mount(&server)
        .await;

    let summary = uploader_for(&server.uri())
        .upload_file(&file, true)
        .await
        .unwrap();

    assert!(!summary.is_consistent());
    assert_eq!(summary.updated_count, 5);
}

#[tokio::test]
async fn test_transport_failure_is_an_upload_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let dir = TempDir::new().unwrap();
    let file = spreadsheet(&dir, "renewal.xlsx", b"bytes");

    let err = uploader_for(&format!("http://127.0.0.1:{}", port))
        .upload_file(&file, true)
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::Transport(_)));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_file_handle_released_after_transport_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let dir = TempDir::new().unwrap();
    let file = spreadsheet(&dir, "handle-check.xlsx", &vec![7u8; 64 * 1024]);

    let result = uploader_for(&format!("http://127.0.0.1:{}", port))
        .upload_file(&file, true)
        .await;

    assert!(result.is_err());
    assert!(!holds_open_handle(&file));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_file_handle_released_after_rejection() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let file = spreadsheet(&dir, "handle-reject.xlsx", b"bytes");

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = uploader_for(&server.uri()).upload_file(&file, true).await;

    assert!(matches!(result, Err(UploadError::Rejected { status: 500, .. })));
    assert!(!holds_open_handle(&file));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_file_handle_released_when_connection_drops_mid_upload() {
    use tokio::io::AsyncReadExt;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Take part of the request, then hang up without answering
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 16 * 1024];
        let mut received = 0;
        while received < 64 * 1024 {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => received += n,
            }
        }
        drop(socket);
        received
    });

    let dir = TempDir::new().unwrap();
    let file = spreadsheet(&dir, "mid-stream.xlsx", &vec![42u8; 16 * 1024 * 1024]);

    let result = uploader_for(&format!("http://{}", addr))
        .upload_file(&file, true)
        .await;

    let received = server.await.unwrap();
    assert!(received > 0);
    assert!(matches!(result, Err(UploadError::Transport(_))));
    assert!(!holds_open_handle(&file));
}
