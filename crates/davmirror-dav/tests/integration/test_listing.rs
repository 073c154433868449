//! Listing tests: WebDAV PROPFIND and the index-file fallback

use davmirror_core::domain::content::{build_tree, ContentKind};
use davmirror_core::domain::path_index::PathIndex;
use davmirror_core::ports::IRemoteLister;
use davmirror_dav::{IndexFileLister, WebdavLister};

use crate::common::{mount_file, setup_webdav_mock, MULTISTATUS_BODY};

#[tokio::test]
async fn webdav_lister_returns_flat_entries_without_the_share_root() {
    let (_server, client) = setup_webdav_mock(MULTISTATUS_BODY, 207).await;
    let lister = WebdavLister::new(client);

    let entries = lister.list().await.unwrap();

    let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["data.dat", "test_dir1", "test_dir1/mini.txt"]);

    assert_eq!(entries[0].kind, ContentKind::File);
    assert_eq!(entries[0].size, Some(4));
    assert_eq!(entries[0].modified, "Tue, 21 Mar 2017 11:30:00 GMT");

    assert_eq!(entries[1].kind, ContentKind::Directory);
    assert_eq!(entries[1].size, None);
}

#[tokio::test]
async fn webdav_listing_feeds_the_tree_and_index_pipeline() {
    let (_server, client) = setup_webdav_mock(MULTISTATUS_BODY, 207).await;
    let lister = WebdavLister::new(client);

    let entries = lister.list().await.unwrap();
    let tree = build_tree(&entries);
    let index = PathIndex::from_tree(&tree, "https://host/share");

    assert_eq!(
        index.paths(),
        vec!["data.dat".to_string(), "test_dir1/mini.txt".to_string()]
    );
    assert_eq!(
        index.get("test_dir1/mini.txt").unwrap().url,
        "https://host/share/download?path=test_dir1&files=mini.txt"
    );
}

#[tokio::test]
async fn webdav_error_status_fails_the_listing() {
    let (_server, client) = setup_webdav_mock("forbidden", 403).await;
    let lister = WebdavLister::new(client);

    let err = lister.list().await.unwrap_err();
    assert!(err.to_string().contains("PROPFIND"));
}

#[tokio::test]
async fn index_file_lister_parses_the_stat_dump() {
    let server = wiremock::MockServer::start().await;
    let dump = "\
##directory##4096##1490000000##test_data##
##regular file##4##1490000001##test_data/data.dat##
";
    mount_file(&server, "/fs_info.txt", dump.as_bytes(), 200).await;

    let lister = IndexFileLister::new(format!("{}/fs_info.txt", server.uri()), false).unwrap();
    let entries = lister.list().await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].kind, ContentKind::Directory);
    assert_eq!(entries[1].path, "test_data/data.dat");
    assert_eq!(entries[1].modified, "1490000001");
}

#[tokio::test]
async fn index_file_missing_fails_the_listing() {
    let server = wiremock::MockServer::start().await;
    mount_file(&server, "/fs_info.txt", b"gone", 404).await;

    let lister = IndexFileLister::new(format!("{}/fs_info.txt", server.uri()), false).unwrap();
    assert!(lister.list().await.is_err());
}
