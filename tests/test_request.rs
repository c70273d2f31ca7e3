use std::path::PathBuf;

use wicket::http::request::{Method, RequestLine};

#[test]
fn test_method_from_str() {
    assert_eq!(Method::from_str("GET"), Some(Method::Get));
    assert_eq!(Method::from_str("POST"), Some(Method::Post));
    assert_eq!(Method::from_str("post"), None);
    assert_eq!(Method::from_str("PUT"), None);
    assert_eq!(Method::from_str(""), None);
}

#[test]
fn test_method_as_str_matches_wire_token() {
    for method in [Method::Get, Method::Post] {
        assert_eq!(Method::from_str(method.as_str()), Some(method));
    }
}

#[test]
fn test_request_line_method_lookup() {
    let line = RequestLine::new("PATCH", "www/index.html", "HTTP/1.1");

    assert_eq!(line.method, "PATCH");
    assert_eq!(line.method(), None);
}

#[test]
fn test_request_line_file_name() {
    let line = RequestLine::new("POST", PathBuf::from("www/forms/error_page.html"), "HTTP/1.1");

    assert_eq!(line.file_name(), Some("error_page.html"));
    assert_eq!(line.path(), PathBuf::from("www/forms/error_page.html").as_path());
}
