//! HTTP protocol implementation.
//!
//! This module implements a small HTTP/1.x file server: only the request line
//! is interpreted, GET and POST are answered, and connections are kept alive
//! until the client closes them.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`parser`**: Parses the request line and resolves it under the document root
//! - **`request`**: Request line representation and supported methods
//! - **`dispatcher`**: Maps the method to its GET or POST handler
//! - **`responder`**: Loads a file and builds the response for it
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for a complete request line
//!        └──────┬──────┘
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Parse, dispatch, build response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close (400, or peer EOF) → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wicket::config::SiteConfig;
//! use wicket::http::connection::Connection;
//! use wicket::site::Site;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let site = Arc::new(Site::new(SiteConfig::default()));
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, peer) = listener.accept().await?;
//!         let site = site.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, peer, site);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod dispatcher;
pub mod responder;
pub mod writer;
pub mod mime;
