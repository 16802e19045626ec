//! Error types for the HTTP client.
//!
//! # Design
//! Connection failures carry the target they were aimed at so the caller can
//! report which host refused. Everything that goes wrong after the socket is
//! open is either an I/O error, a malformed status code, or a decoding
//! problem. A status line that is merely too short is not an error at all;
//! the parser reports it as 500.

use std::fmt;
use std::io;

/// Errors returned by `HttpClient` and the URL resolver.
#[derive(Debug)]
pub enum ClientError {
    /// The port part of the authority is not a valid TCP port.
    InvalidPort(String),

    /// The peer could not be reached, refused, or the host did not resolve.
    Connect {
        host: String,
        port: u16,
        source: io::Error,
    },

    /// Sending the request or reading the response failed mid-exchange.
    Io(io::Error),

    /// The second token of the status line is not an integer.
    InvalidStatusCode(String),

    /// Bytes were not valid under the charset used to decode them.
    Decode {
        charset: String,
        position: Option<usize>,
    },

    /// The response declared a charset this client cannot decode.
    UnknownCharset(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidPort(port) => write!(f, "invalid port: {port:?}"),
            ClientError::Connect { host, port, source } => {
                write!(f, "could not connect to {host}:{port}: {source}")
            }
            ClientError::Io(err) => write!(f, "connection error: {err}"),
            ClientError::InvalidStatusCode(token) => {
                write!(f, "invalid status code: {token:?}")
            }
            ClientError::Decode {
                charset,
                position: Some(position),
            } => write!(f, "cannot decode byte at position {position} as {charset}"),
            ClientError::Decode {
                charset,
                position: None,
            } => write!(f, "body is not valid {charset}"),
            ClientError::UnknownCharset(name) => write!(f, "unknown charset: {name:?}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Connect { source, .. } => Some(source),
            ClientError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ClientError {
    fn from(err: io::Error) -> Self {
        ClientError::Io(err)
    }
}
