//! Wicket - minimal HTTP/1.x file server
//!
//! Core library for request parsing, dispatch and file responses.

pub mod config;
pub mod form_log;
pub mod http;
pub mod server;
pub mod site;
