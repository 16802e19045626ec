//! Blocking TCP exchange: one connection, one request, read until close.
//!
//! The stream is owned by `exchange` and dropped on every return path, so the
//! socket is closed whether the read loop finishes or fails. There is no read
//! timeout; a peer that never closes the connection blocks the caller.

use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream};

use log::{debug, trace};

use crate::error::ClientError;

/// Bytes requested from the socket per read call.
pub const DEFAULT_READ_CHUNK: usize = 2048;

/// Connects to `host:port`, writes `request` in full, then accumulates every
/// byte the peer sends until it closes the connection.
pub fn exchange(
    host: &str,
    port: u16,
    request: &[u8],
    read_chunk: usize,
) -> Result<Vec<u8>, ClientError> {
    debug!("connecting to {host}:{port}");
    let mut stream = TcpStream::connect((host, port)).map_err(|source| ClientError::Connect {
        host: host.to_string(),
        port,
        source,
    })?;

    stream.write_all(request)?;
    stream.flush()?;
    debug!("sent {} bytes to {host}:{port}", request.len());

    let received = read_to_close(&mut stream, read_chunk)?;
    debug!("received {} bytes from {host}:{port}", received.len());

    if let Err(err) = stream.shutdown(Shutdown::Both) {
        trace!("shutdown after peer close: {err}");
    }
    Ok(received)
}

fn read_to_close<R: Read>(reader: &mut R, read_chunk: usize) -> Result<Vec<u8>, ClientError> {
    let mut received = Vec::new();
    let mut chunk = vec![0u8; read_chunk.max(1)];
    loop {
        match reader.read(&mut chunk) {
            Ok(0) => return Ok(received),
            Ok(n) => received.extend_from_slice(&chunk[..n]),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
    }
}
