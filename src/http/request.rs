use std::path::{Path, PathBuf};

/// HTTP methods the server answers.
///
/// Anything else is parsed into a [`RequestLine`] verbatim and rejected at
/// dispatch time with 405 Method Not Allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a file
    Get,
    /// POST - Submit a form, then retrieve the target file
    Post,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive, uppercase)
    ///
    /// # Returns
    ///
    /// `Some(Method)` for `GET` and `POST`, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use wicket::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::Get));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("DELETE"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// The first line of a client request.
///
/// `path` has already been resolved against the document root, so it names
/// the file to serve rather than the URL the client sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Method token exactly as received (e.g. "GET")
    pub method: String,
    /// Resolved file path under the document root
    pub path: PathBuf,
    /// HTTP version token exactly as received (e.g. "HTTP/1.1")
    pub http_version: String,
}

impl RequestLine {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<PathBuf>,
        http_version: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            http_version: http_version.into(),
        }
    }

    /// The supported method this line names, if any.
    pub fn method(&self) -> Option<Method> {
        Method::from_str(&self.method)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last `/`-separated segment of the resolved path.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}
