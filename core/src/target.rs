//! Resolution of a URL string into the parameters of a single connection.
//!
//! # Design
//! Splitting follows the classic generic-URL rules: an optional scheme, a
//! network location introduced by `//`, then a path from which the fragment,
//! the query and any `;params` of the last segment are removed. Only the path
//! travels on the request line. The network location is kept verbatim as the
//! authority for the `Host` header.
//!
//! The version label on the request line is `HTTP/1.1` for `http` URLs and
//! the bare scheme for every other URL, so `https://host/` produces
//! `GET / https`. This mirrors long-standing observable behavior and is left
//! in place deliberately; see DESIGN.md.

use crate::error::ClientError;

/// Port used when the authority does not name one.
pub const DEFAULT_PORT: u16 = 80;

/// Version label placed on the request line for `http` URLs.
pub const DEFAULT_VERSION: &str = "HTTP/1.1";

/// Schemes whose last path segment may carry `;params`.
const PARAM_SCHEMES: &[&str] = &[
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp", "rtsps", "rtspu",
    "sip", "sips", "mms", "sftp", "tel",
];

/// Connection parameters derived from one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: u16,
    pub path: String,
    /// `host[:port]` exactly as written in the URL.
    pub authority: String,
    pub version: String,
}

impl Target {
    pub fn parse(url: &str) -> Result<Self, ClientError> {
        let parts = UrlParts::split(url);

        let path = if parts.path.is_empty() {
            "/".to_string()
        } else {
            parts.path.to_string()
        };

        let mut pieces = parts.netloc.split(':');
        let host = pieces.next().unwrap_or_default().to_string();
        let port = match pieces.next() {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ClientError::InvalidPort(raw.to_string()))?,
            None => DEFAULT_PORT,
        };

        let version = if parts.scheme == "http" {
            DEFAULT_VERSION.to_string()
        } else {
            parts.scheme.clone()
        };

        Ok(Target {
            host,
            port,
            path,
            authority: parts.netloc,
            version,
        })
    }
}

/// The pieces of a URL this client cares about.
#[derive(Debug, PartialEq, Eq)]
struct UrlParts {
    scheme: String,
    netloc: String,
    path: String,
}

impl UrlParts {
    fn split(url: &str) -> Self {
        let cleaned: String = url
            .trim_start_matches(|c: char| c <= ' ')
            .chars()
            .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
            .collect();
        let mut rest = cleaned.as_str();

        let mut scheme = String::new();
        if let Some(colon) = rest.find(':') {
            let candidate = &rest[..colon];
            if is_scheme(candidate) {
                scheme = candidate.to_ascii_lowercase();
                rest = &rest[colon + 1..];
            }
        }

        let mut netloc = "";
        if let Some(after) = rest.strip_prefix("//") {
            let end = after.find(['/', '?', '#']).unwrap_or(after.len());
            netloc = &after[..end];
            rest = &after[end..];
        }

        if let Some(hash) = rest.find('#') {
            rest = &rest[..hash];
        }
        if let Some(question) = rest.find('?') {
            rest = &rest[..question];
        }
        if PARAM_SCHEMES.contains(&scheme.as_str()) {
            rest = strip_params(rest);
        }

        UrlParts {
            scheme,
            netloc: netloc.to_string(),
            path: rest.to_string(),
        }
    }
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Drops `;params` from the final path segment.
fn strip_params(path: &str) -> &str {
    let segment_start = path.rfind('/').unwrap_or(0);
    match path[segment_start..].find(';') {
        Some(offset) => &path[..segment_start + offset],
        None => path,
    }
}
