use std::fmt;

/// HTTP status codes the server emits.
///
/// - `Ok` (200): File served
/// - `BadRequest` (400): Request line could not be decoded or split
/// - `NotFound` (404): File missing or unreadable
/// - `MethodNotAllowed` (405): Method other than GET or POST
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use wicket::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use wicket::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
        }
    }
}

/// First line of a response: version echoed from the request plus status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub http_version: String,
    pub status: StatusCode,
}

impl StatusLine {
    pub fn new(http_version: impl Into<String>, status: StatusCode) -> Self {
        Self {
            http_version: http_version.into(),
            status,
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.http_version,
            self.status.as_u16(),
            self.status.reason_phrase()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub name: String,
    pub value: String,
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Response payload. Text bodies are framed with a trailing blank line on
/// the wire, binary bodies are written untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Text(String),
    Binary(Vec<u8>),
}

impl Body {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Body::Text(text) => text.as_bytes(),
            Body::Binary(bytes) => bytes,
        }
    }

    /// Encoded length in bytes, the value sent as `Content-Length`.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Body::Binary(_))
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers keep their insertion order, which is the order they are written.
#[derive(Debug, Clone)]
pub struct Response {
    pub status_line: StatusLine,
    pub headers: Vec<HeaderField>,
    pub body: Body,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use wicket::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new("HTTP/1.1", StatusCode::Ok)
///     .header("Content-Type", "text/plain")
///     .text("hello")
///     .build();
/// assert_eq!(response.header("Content-Length"), Some("5"));
/// ```
pub struct ResponseBuilder {
    status_line: StatusLine,
    headers: Vec<HeaderField>,
    body: Body,
}

impl ResponseBuilder {
    pub fn new(http_version: impl Into<String>, status: StatusCode) -> Self {
        Self {
            status_line: StatusLine::new(http_version, status),
            headers: Vec::new(),
            body: Body::Text(String::new()),
        }
    }

    /// Appends a header. Headers are serialized in the order they are added.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(HeaderField {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Body::Text(body.into());
        self
    }

    pub fn binary(mut self, body: Vec<u8>) -> Self {
        self.body = Body::Binary(body);
        self
    }

    /// Builds the final Response.
    ///
    /// Appends a Content-Length header based on the body size if one was not
    /// set explicitly.
    pub fn build(mut self) -> Response {
        let has_length = self
            .headers
            .iter()
            .any(|h| h.name.eq_ignore_ascii_case("Content-Length"));
        if !has_length {
            let len = self.body.len().to_string();
            self.headers.push(HeaderField {
                name: "Content-Length".to_string(),
                value: len,
            });
        }

        Response {
            status_line: self.status_line,
            headers: self.headers,
            body: self.body,
        }
    }
}

const BAD_REQUEST_HTML: &str = "<html><body><h1> Bad Request</h1></body></html>";
const METHOD_NOT_ALLOWED_HTML: &str = "<html><body><h1> Method Not Allowed</h1></body></html>";

impl Response {
    pub fn status(&self) -> StatusCode {
        self.status_line.status
    }

    /// First header value with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// 400 response sent before closing a connection whose input could not
    /// be understood.
    pub fn bad_request(http_version: &str) -> Self {
        ResponseBuilder::new(http_version, StatusCode::BadRequest)
            .header("Content-Type", "text/html")
            .header("Content-Length", BAD_REQUEST_HTML.len().to_string())
            .header("Connection", "close")
            .text(BAD_REQUEST_HTML)
            .build()
    }

    pub fn method_not_allowed(http_version: &str) -> Self {
        ResponseBuilder::new(http_version, StatusCode::MethodNotAllowed)
            .header("Content-Type", "text/html")
            .header("Allow", "GET, POST")
            .header("Content-Length", METHOD_NOT_ALLOWED_HTML.len().to_string())
            .header("Connection", "Keep-Alive")
            .text(METHOD_NOT_ALLOWED_HTML)
            .build()
    }

    /// Whether the connection should stay open after this response.
    pub fn keep_alive(&self) -> bool {
        !self
            .header("Connection")
            .is_some_and(|v| v.eq_ignore_ascii_case("close"))
    }
}
