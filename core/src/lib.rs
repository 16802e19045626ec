//! Minimal HTTP/1.1 client written directly against TCP sockets.
//!
//! # Overview
//! Resolves a URL into connection parameters, assembles the request text by
//! hand, exchanges it over one blocking TCP connection, and parses the raw
//! reply into a status code and a decoded body.
//!
//! # Design
//! - `HttpClient` is stateless; every request opens and closes its own
//!   connection.
//! - Building (`build_get` / `build_post`) and parsing (`parse_response`) are
//!   pure, so both can be tested without a network.
//! - No TLS, keep-alive, chunked transfer, redirects, cookies or timeouts.
//!   The response is fully buffered before it is parsed.

pub mod charset;
pub mod client;
pub mod command;
pub mod error;
pub mod http;
pub mod target;
pub mod transport;

pub use charset::Charset;
pub use client::HttpClient;
pub use command::{Command, CommandArgs};
pub use error::ClientError;
pub use http::{FormFields, HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use target::Target;
