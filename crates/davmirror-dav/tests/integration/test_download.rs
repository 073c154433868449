//! Download primitive tests

use davmirror_core::ports::IDownloader;
use davmirror_dav::HttpDownloader;

use crate::common::mount_file;

#[tokio::test]
async fn download_streams_body_to_the_destination_file() {
    let server = wiremock::MockServer::start().await;
    mount_file(&server, "/download", b"payload-bytes", 200).await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("payload.bin");

    let downloader = HttpDownloader::new(false).unwrap();
    downloader
        .fetch(&format!("{}/download", server.uri()), &dest)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&dest).unwrap(), b"payload-bytes");
}

#[tokio::test]
async fn download_overwrites_previous_content() {
    let server = wiremock::MockServer::start().await;
    mount_file(&server, "/download", b"new", 200).await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("f.bin");
    std::fs::write(&dest, b"a much longer stale body").unwrap();

    let downloader = HttpDownloader::new(false).unwrap();
    downloader
        .fetch(&format!("{}/download", server.uri()), &dest)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&dest).unwrap(), b"new");
}

#[tokio::test]
async fn download_error_status_is_a_failure_value() {
    let server = wiremock::MockServer::start().await;
    mount_file(&server, "/download", b"", 503).await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("f.bin");

    let downloader = HttpDownloader::new(false).unwrap();
    let err = downloader
        .fetch(&format!("{}/download", server.uri()), &dest)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("error status"));
    // No partial file is considered synced; the path simply was not written.
    assert!(!dest.exists() || std::fs::read(&dest).unwrap().is_empty());
}
