//! HTTP/1.1 subset for single-file transfer
//!
//! This module provides the message codec and the per-connection drivers for
//! both ends of a transfer. Only `GET` is served, every connection carries a
//! single exchange, and responses are always framed by `Content-Length`.
//!
//! # Architecture
//!
//! All socket I/O goes through the session operations abstraction:
//!
//! - `SessionOps` trait defines operations (poll, read, write, close)
//! - `HttpSession` wraps an implementation, waiting for readiness before
//!   each read and following short writes until the buffer is out
//! - `HttpClient` and `HttpServer` drive one exchange over a session
//!
//! # Examples
//!
//! ```no_run
//! use httpxfer::http::{HttpClient, HttpRequest};
//! use httpxfer::http::session::FdSessionOps;
//! use std::net::TcpStream;
//!
//! let stream = TcpStream::connect("127.0.0.1:8080").unwrap();
//! let mut client = HttpClient::new(FdSessionOps::new(stream));
//!
//! client.send_request(&HttpRequest::get("localhost", "/index.html")).unwrap();
//! let response = client.receive_response().unwrap();
//! assert_eq!(response.status().code(), 200);
//! ```

pub mod client;
pub mod date;
pub mod headers;
pub mod message;
pub mod parser;
pub mod server;
pub mod session;

pub use client::HttpClient;
pub use headers::Headers;
pub use message::{HttpRequest, HttpResponse, Method, Status, Version};
pub use server::HttpServer;
pub use session::{HttpSession, SessionOps};

use std::path::PathBuf;

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP operation errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] crate::net::Error),

    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The server answered with something other than 200. `message` is the
    /// status line minus the version, e.g. `404 Not Found`.
    #[error("{message}")]
    ServerStatus { code: i64, message: String },

    #[error("send() failed: {0}")]
    Send(#[source] std::io::Error),

    #[error("recv() failed: {0}")]
    Receive(#[source] std::io::Error),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Incomplete message: {0}")]
    Incomplete(String),

    #[error("Message exceeds {limit} bytes")]
    MessageTooLarge { limit: usize },

    #[error("Cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Process exit code for this error on the client side.
    ///
    /// A response line that is not `HTTP/1.1 <int>` exits with 2, a
    /// well-formed non-200 status exits with 3, any other failure with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Protocol(_) => 2,
            Error::ServerStatus { .. } => 3,
            _ => 1,
        }
    }
}

/// Maximum number of headers per message
pub const MAX_HEADERS: usize = 64;

/// Size of a single socket read
pub const RECV_CHUNK: usize = 1512;

/// Upper bound on an inbound request head (request line plus headers)
pub const MAX_REQUEST_HEAD: usize = 8192;

/// CRLF line ending
pub const CRLF: &str = "\r\n";

/// Blank line separating the head from the body
pub const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";
