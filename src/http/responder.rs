//! Builds file-backed responses.

use std::io;
use std::path::Path;

use tokio::io::AsyncWrite;

use crate::http::mime;
use crate::http::response::{Body, Response, ResponseBuilder, StatusCode};
use crate::http::writer::ResponseWriter;

/// Body sent whenever the requested file cannot be served.
pub const INVALID_RESPONSE_HTML: &str =
    "<html><body><h1> Invalid Client Request</h1></body></html>";

/// Loads the file at `path` and wraps it in a response.
///
/// Any read failure (missing file, permissions, a directory, non UTF-8 text)
/// yields a 404 carrying [`INVALID_RESPONSE_HTML`] as `text/html`.
pub async fn build_file_response(path: &Path, http_version: &str) -> Response {
    let mut file_type = mime::file_type(path);
    let mut status = StatusCode::Ok;

    let body = match read_body(path, &file_type).await {
        Ok(body) => body,
        Err(e) => {
            if e.kind() == io::ErrorKind::NotFound {
                tracing::info!(path = %path.display(), "File not found");
            } else {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read file");
            }
            status = StatusCode::NotFound;
            file_type = "HTML".to_string();
            Body::Text(INVALID_RESPONSE_HTML.to_string())
        }
    };

    let mut builder = ResponseBuilder::new(http_version, status);
    if !body.is_binary() {
        builder = builder.header("Charset", "utf-8");
    }
    builder = builder
        .header("Content-Type", mime::content_type(&file_type))
        .header("Content-Length", body.len().to_string())
        .header("Connection", "Keep-Alive");

    let builder = match body {
        Body::Text(text) => builder.text(text),
        Body::Binary(bytes) => builder.binary(bytes),
    };
    builder.build()
}

/// Builds the response for `path` and writes it to `stream`.
pub async fn send_file_response<W>(path: &Path, http_version: &str, stream: &mut W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let response = build_file_response(path, http_version).await;
    ResponseWriter::new(&response).write_to_stream(stream).await
}

async fn read_body(path: &Path, file_type: &str) -> io::Result<Body> {
    if mime::is_binary(file_type) {
        Ok(Body::Binary(tokio::fs::read(path).await?))
    } else {
        Ok(Body::Text(tokio::fs::read_to_string(path).await?))
    }
}
