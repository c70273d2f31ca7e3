use std::path::PathBuf;

use tempfile::TempDir;
use wicket::config::SiteConfig;
use wicket::http::dispatcher::{DispatchError, dispatch};
use wicket::http::parser::parse_request;
use wicket::http::request::RequestLine;
use wicket::http::response::StatusCode;
use wicket::site::Site;

fn fixture() -> (TempDir, Site) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<p>index</p>").unwrap();
    std::fs::write(dir.path().join("error_page.html"), "<p>try again</p>").unwrap();
    std::fs::write(dir.path().join("contact.html"), "<p>thanks</p>").unwrap();

    let site = Site::new(SiteConfig {
        document_root: dir.path().to_path_buf(),
        form_log: dir.path().join("file.txt"),
        ..SiteConfig::default()
    });
    (dir, site)
}

fn read_log(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.path().join("file.txt")).unwrap_or_default()
}

#[tokio::test]
async fn test_get_root_serves_index() {
    let (_dir, site) = fixture();
    let (line, args) = parse_request(b"GET / HTTP/1.1\r\n\r\n", &site.config).unwrap();

    let response = dispatch(&line, &args, &site).await.unwrap();

    assert_eq!(response.status_line.to_string(), "HTTP/1.1 200 OK");
    assert_eq!(response.body.as_bytes(), b"<p>index</p>");
    assert_eq!(response.header("Content-Length"), Some("12"));
}

#[tokio::test]
async fn test_get_missing_is_404() {
    let (_dir, site) = fixture();
    let (line, args) = parse_request(b"GET /missing.html HTTP/1.1\r\n\r\n", &site.config).unwrap();

    let response = dispatch(&line, &args, &site).await.unwrap();

    assert_eq!(response.status_line.to_string(), "HTTP/1.1 404 Not Found");
    assert_eq!(
        response.body.as_bytes(),
        b"<html><body><h1> Invalid Client Request</h1></body></html>"
    );
}

#[tokio::test]
async fn test_unsupported_method_names_method() {
    let (_dir, site) = fixture();
    let line = RequestLine::new("DELETE", PathBuf::from("index.html"), "HTTP/1.1");

    let result = dispatch(&line, "", &site).await;

    assert_eq!(
        result.unwrap_err(),
        DispatchError::UnsupportedMethod("DELETE".to_string())
    );
}

#[tokio::test]
async fn test_unsupported_method_error_message() {
    let err = DispatchError::UnsupportedMethod("PUT".to_string());

    assert_eq!(err.to_string(), "Method PUT is unsupported");
}

#[tokio::test]
async fn test_post_to_form_page_records_submission() {
    let (dir, site) = fixture();
    let req = b"POST /error_page.html HTTP/1.1\r\nHost: x\r\n\r\nemail=jane%40example.com&password=hunter2";
    let (line, args) = parse_request(req, &site.config).unwrap();

    let response = dispatch(&line, &args, &site).await.unwrap();

    assert_eq!(response.status(), StatusCode::Ok);
    assert_eq!(response.body.as_bytes(), b"<p>try again</p>");
    assert_eq!(
        read_log(&dir),
        "Email: jane@example.com | Password: hunter2\n"
    );
}

#[tokio::test]
async fn test_post_to_other_page_is_served_without_recording() {
    let (dir, site) = fixture();
    let req = b"POST /contact.html HTTP/1.1\r\n\r\nemail=a%40b&password=c";
    let (line, args) = parse_request(req, &site.config).unwrap();

    let response = dispatch(&line, &args, &site).await.unwrap();

    assert_eq!(response.status(), StatusCode::Ok);
    assert_eq!(response.body.as_bytes(), b"<p>thanks</p>");
    assert_eq!(read_log(&dir), "");
}

#[tokio::test]
async fn test_post_with_unwritable_log_still_responds() {
    let (dir, site) = fixture();
    let site = Site::new(SiteConfig {
        form_log: dir.path().join("no-such-dir").join("file.txt"),
        ..site.config.clone()
    });
    let req = b"POST /error_page.html HTTP/1.1\r\n\r\nemail=a&password=b";
    let (line, args) = parse_request(req, &site.config).unwrap();

    let response = dispatch(&line, &args, &site).await.unwrap();

    assert_eq!(response.status(), StatusCode::Ok);
}

#[tokio::test]
async fn test_post_to_form_page_without_body_records_nothing() {
    let (dir, site) = fixture();
    let (line, args) =
        parse_request(b"POST /error_page.html HTTP/1.1\r\n\r\n", &site.config).unwrap();

    assert_eq!(args, "");
    let response = dispatch(&line, &args, &site).await.unwrap();

    assert_eq!(response.status(), StatusCode::Ok);
    assert_eq!(read_log(&dir), "");
}
