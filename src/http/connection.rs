use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::http::dispatcher::dispatch;
use crate::http::parser::{
    find_request_line_end, form_body_pending, parse_request, starts_request_line,
};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::site::Site;

/// Bytes accepted before a request line must be complete.
pub const MAX_REQUEST_LINE: usize = 8 * 1024;

/// Upper bound on a buffered POST while waiting for its form body.
pub const MAX_REQUEST: usize = 64 * 1024;

/// How long a POST that ends at a blank line waits for its form body.
pub const FORM_BODY_WAIT: Duration = Duration::from_millis(250);

/// Version used in responses when the request line itself was unreadable.
const FALLBACK_VERSION: &str = "HTTP/1.1";

pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    site: Arc<Site>,
    buffer: BytesMut,
    state: ConnectionState,
    // Set once a POST has been handed over; bytes arriving next may be its
    // late form body.
    after_post: bool,
}

pub enum ConnectionState {
    Reading,
    Processing(Bytes),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

/// Outcome of waiting for the next request.
enum Frame {
    Request(Bytes),
    Oversized,
    Eof,
}

impl Connection {
    pub fn new(stream: TcpStream, peer: SocketAddr, site: Arc<Site>) -> Self {
        Self {
            stream,
            peer,
            site,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
            after_post: false,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);
            self.state = match state {
                ConnectionState::Reading => match self.read_request().await? {
                    Frame::Request(buf) => ConnectionState::Processing(buf),
                    Frame::Oversized => {
                        tracing::warn!(peer = %self.peer, "Request line too long");
                        let response = Response::bad_request(FALLBACK_VERSION);
                        ConnectionState::Writing(ResponseWriter::new(&response), false)
                    }
                    Frame::Eof => ConnectionState::Closed,
                },

                ConnectionState::Processing(buf) => {
                    let response = self.handle_request(&buf).await;
                    let keep_alive = response.keep_alive();
                    ConnectionState::Writing(ResponseWriter::new(&response), keep_alive)
                }

                ConnectionState::Writing(mut writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if keep_alive {
                        ConnectionState::Reading // go back for next request
                    } else {
                        ConnectionState::Closed
                    }
                }

                ConnectionState::Closed => break,
            };
        }

        tracing::info!(peer = %self.peer, "Connection closed");
        Ok(())
    }

    /// Waits until a full request line has arrived and hands over everything
    /// buffered so far as one request.
    ///
    /// A POST whose buffer ends at a blank line keeps reading for up to
    /// [`FORM_BODY_WAIT`] so the form body becomes part of the same request.
    async fn read_request(&mut self) -> anyhow::Result<Frame> {
        loop {
            if find_request_line_end(&self.buffer).is_some() {
                if form_body_pending(&self.buffer) && self.buffer.len() <= MAX_REQUEST {
                    match timeout(FORM_BODY_WAIT, self.stream.read_buf(&mut self.buffer)).await {
                        Ok(Ok(n)) if n > 0 => continue,
                        Ok(Err(e)) => return Err(e.into()),
                        // Timed out or peer finished sending
                        _ => {}
                    }
                }
                self.after_post = self.buffer.starts_with(b"POST ");
                return Ok(Frame::Request(self.buffer.split().freeze()));
            }

            if self.buffer.len() > MAX_REQUEST_LINE {
                return Ok(Frame::Oversized);
            }

            let was_empty = self.buffer.is_empty();
            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                // Client closed connection
                if !self.buffer.is_empty() {
                    tracing::debug!(
                        peer = %self.peer,
                        pending = self.buffer.len(),
                        "Discarding incomplete request"
                    );
                }
                return Ok(Frame::Eof);
            }

            if std::mem::take(&mut self.after_post)
                && was_empty
                && find_request_line_end(&self.buffer).is_none()
                && !starts_request_line(&self.buffer)
            {
                tracing::debug!(
                    peer = %self.peer,
                    dropped = self.buffer.len(),
                    "Dropping late form body"
                );
                self.buffer.clear();
            }
        }
    }

    /// Parses and dispatches one request, turning protocol errors into
    /// 400 and 405 responses.
    async fn handle_request(&self, buf: &[u8]) -> Response {
        let (line, args) = match parse_request(buf, &self.site.config) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(peer = %self.peer, error = %e, "Rejecting request");
                return Response::bad_request(e.http_version().unwrap_or(FALLBACK_VERSION));
            }
        };

        let response = match dispatch(&line, &args, &self.site).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(peer = %self.peer, error = %e, "Rejecting request");
                Response::method_not_allowed(&line.http_version)
            }
        };

        tracing::debug!(
            peer = %self.peer,
            method = %line.method,
            path = %line.path.display(),
            status = response.status().as_u16(),
            "Request handled"
        );

        response
    }
}
