//! Request building, response parsing, and the GET/POST round-trips.
//!
//! # Design
//! `HttpClient` carries no state between calls beyond its read chunk size.
//! Each method is split into a `build_*` step that produces an `HttpRequest`
//! and `parse_response`, which turns the raw bytes read back into an
//! `HttpResponse`. `get` and `post` join the two with a single TCP exchange,
//! so every call opens and closes exactly one connection.

use log::{trace, warn};

use crate::charset::{declared_charset, Charset};
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::target::Target;
use crate::transport::{self, DEFAULT_READ_CHUNK};

/// Code reported when the status line is too short to carry one.
pub const MALFORMED_STATUS_CODE: u16 = 500;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Synchronous HTTP/1.1 client speaking directly over TCP.
#[derive(Debug, Clone)]
pub struct HttpClient {
    read_chunk: usize,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            read_chunk: DEFAULT_READ_CHUNK,
        }
    }

    /// Uses `bytes` per socket read instead of the default 2048.
    pub fn with_read_chunk(bytes: usize) -> Self {
        Self {
            read_chunk: bytes.max(1),
        }
    }

    pub fn build_get(&self, url: &str) -> Result<HttpRequest, ClientError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            target: Target::parse(url)?,
            body: None,
        })
    }

    pub fn build_post(&self, url: &str, body: &RequestBody) -> Result<HttpRequest, ClientError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            target: Target::parse(url)?,
            body: Some(body.serialize()),
        })
    }

    /// Splits `raw` at the first blank line, reads the status code from the
    /// first header line, and decodes the body with the declared charset.
    ///
    /// A status line with fewer than three space-separated tokens yields
    /// code 500 rather than an error.
    pub fn parse_response(&self, raw: &[u8]) -> Result<HttpResponse, ClientError> {
        let (head, body) = match find_subslice(raw, HEADER_TERMINATOR) {
            Some(at) => (&raw[..at], Some(&raw[at + HEADER_TERMINATOR.len()..])),
            None => (raw, None),
        };

        let head = Charset::Utf8.decode(head)?;
        let lines: Vec<&str> = head.split("\r\n").collect();

        let code = status_code(lines.first().copied().unwrap_or_default())?;

        let body = match body {
            Some(bytes) => {
                let charset = match declared_charset(lines.iter().copied()) {
                    Some(name) => Charset::lookup(name)?,
                    None => Charset::Utf8,
                };
                charset.decode(bytes)?
            }
            None => String::new(),
        };

        Ok(HttpResponse { code, body })
    }

    /// Writes `request` over a fresh connection and parses what comes back.
    pub fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        let wire = request.to_wire();
        trace!("request:\n{wire}");
        let target = &request.target;
        let raw = transport::exchange(&target.host, target.port, wire.as_bytes(), self.read_chunk)?;
        self.parse_response(&raw)
    }

    pub fn get(&self, url: &str) -> Result<HttpResponse, ClientError> {
        let request = self.build_get(url)?;
        self.execute(&request)
    }

    pub fn post(&self, url: &str, body: &RequestBody) -> Result<HttpResponse, ClientError> {
        let request = self.build_post(url, body)?;
        self.execute(&request)
    }
}

fn status_code(status_line: &str) -> Result<u16, ClientError> {
    let tokens: Vec<&str> = status_line.split(' ').collect();
    if tokens.len() < 3 {
        warn!("status line {status_line:?} is too short, reporting {MALFORMED_STATUS_CODE}");
        return Ok(MALFORMED_STATUS_CODE);
    }
    tokens[1]
        .parse()
        .map_err(|_| ClientError::InvalidStatusCode(tokens[1].to_string()))
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
