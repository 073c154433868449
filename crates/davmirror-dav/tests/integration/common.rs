//! Shared test helpers for adapter integration tests
//!
//! Provides wiremock-based mock server setup for the public-share WebDAV
//! endpoint and plain-HTTP file serving.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use davmirror_dav::DavClient;

/// A small ownCloud-style multistatus body: the share root, one file at
/// the root, a nested directory, and a file inside it.
pub const MULTISTATUS_BODY: &str = r#"<?xml version="1.0"?>
<d:multistatus xmlns:d="DAV:" xmlns:s="http://sabredav.org/ns" xmlns:oc="http://owncloud.org/ns">
  <d:response>
    <d:href>/public.php/webdav/</d:href>
    <d:propstat>
      <d:prop><d:resourcetype><d:collection/></d:resourcetype></d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
  <d:response>
    <d:href>/public.php/webdav/data.dat</d:href>
    <d:propstat>
      <d:prop>
        <d:getlastmodified>Tue, 21 Mar 2017 11:30:00 GMT</d:getlastmodified>
        <d:resourcetype/>
        <d:getcontentlength>4</d:getcontentlength>
      </d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
  <d:response>
    <d:href>/public.php/webdav/test_dir1/</d:href>
    <d:propstat>
      <d:prop>
        <d:getlastmodified>Wed, 22 Mar 2017 09:15:00 GMT</d:getlastmodified>
        <d:resourcetype><d:collection/></d:resourcetype>
      </d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
  <d:response>
    <d:href>/public.php/webdav/test_dir1/mini.txt</d:href>
    <d:propstat>
      <d:prop>
        <d:getlastmodified>Thu, 23 Mar 2017 08:00:00 GMT</d:getlastmodified>
        <d:resourcetype/>
        <d:getcontentlength>2</d:getcontentlength>
      </d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
</d:multistatus>"#;

/// Starts a mock server answering PROPFIND on the webdav endpoint and
/// returns it with a `DavClient` pointed at it.
pub async fn setup_webdav_mock(body: &str, status: u16) -> (MockServer, DavClient) {
    let server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .and(path("/public.php/webdav/"))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body.to_string())
                .append_header("Content-Type", "application/xml; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let client = DavClient::with_base_url(server.uri(), Some("dGVzdC10b2tlbjo="), 3, false)
        .expect("client construction");

    (server, client)
}

/// Mounts a plain GET endpoint serving `content` at `route`.
pub async fn mount_file(server: &MockServer, route: &str, content: &[u8], status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_bytes(content.to_vec())
                .append_header("Content-Type", "application/octet-stream"),
        )
        .mount(server)
        .await;
}
