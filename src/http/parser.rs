use std::path::PathBuf;

use thiserror::Error;

use crate::config::SiteConfig;
use crate::http::request::{Method, RequestLine};

/// Page served for a bare `/` request.
pub const INDEX_FILE: &str = "index.html";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("request is not valid ASCII")]
    Decode,
    #[error("malformed request line: {0:?}")]
    Malformed(String),
    #[error("request path escapes the document root: {path:?}")]
    InvalidPath { path: String, http_version: String },
}

impl ParseError {
    /// Version token of the rejected request, when it got far enough to be
    /// read.
    pub fn http_version(&self) -> Option<&str> {
        match self {
            ParseError::InvalidPath { http_version, .. } => Some(http_version.as_str()),
            _ => None,
        }
    }
}

/// Parses a raw request buffer.
///
/// Only the request line is interpreted. For POST requests the last
/// CRLF-delimited line of the buffer is returned as the form arguments; for
/// every other method the arguments are empty.
pub fn parse_request(buf: &[u8], site: &SiteConfig) -> Result<(RequestLine, String), ParseError> {
    if !buf.is_ascii() {
        return Err(ParseError::Decode);
    }
    let text = std::str::from_utf8(buf).map_err(|_| ParseError::Decode)?;
    tracing::trace!(request = %text, "decoded request");

    let lines: Vec<&str> = text.split("\r\n").collect();
    let first = lines[0];

    let parts: Vec<&str> = first.split(' ').collect();
    let [method, raw_path, version] = parts[..] else {
        return Err(ParseError::Malformed(first.to_string()));
    };
    if method.is_empty() || version.is_empty() {
        return Err(ParseError::Malformed(first.to_string()));
    }

    let path = resolve_path(raw_path, site).ok_or_else(|| ParseError::InvalidPath {
        path: raw_path.to_string(),
        http_version: version.to_string(),
    })?;

    let args = if method == Method::Post.as_str() {
        lines.last().copied().unwrap_or_default().to_string()
    } else {
        String::new()
    };

    Ok((RequestLine::new(method, path, version), args))
}

/// Maps a request target onto a file under the document root.
///
/// Returns `None` for targets that do not start with `/` or that contain a
/// `..` segment.
pub fn resolve_path(raw_path: &str, site: &SiteConfig) -> Option<PathBuf> {
    let relative = match raw_path {
        "/" => INDEX_FILE,
        "/favicon.ico" if site.favicon_fallback => "favicon.png",
        _ => raw_path.strip_prefix('/')?,
    };

    let mut path = site.document_root.clone();
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            s => path.push(s),
        }
    }
    Some(path)
}

/// Position just past the first CRLF, i.e. the end of the request line.
pub fn find_request_line_end(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n").map(|i| i + 2)
}

/// True for a POST buffer whose last line is still empty, meaning the form
/// body has not arrived yet.
pub fn form_body_pending(buf: &[u8]) -> bool {
    buf.starts_with(b"POST ") && buf.ends_with(b"\r\n")
}

/// True when `buf` could be the beginning of a request line: an upper-case
/// method token, possibly still incomplete.
pub fn starts_request_line(buf: &[u8]) -> bool {
    let token = buf.split(|&b| b == b' ').next().unwrap_or_default();
    !token.is_empty() && token.iter().all(u8::is_ascii_uppercase)
}
