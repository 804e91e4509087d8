//! Static file serving from a document root
//!
//! Connections are taken one at a time. Each one gets exactly one response
//! decided in this order:
//!
//! 1. malformed request line, extra fields, or a version other than
//!    `HTTP/1.1`: `400 Bad Request`. Header lines after the request line
//!    never cause a refusal.
//! 2. any method other than `GET`: `501 Not Implemented`
//! 3. the mapped file does not exist or cannot be read: `404 Not Found`
//! 4. otherwise `200 OK` with the file contents

use crate::config::ServerConfig;
use crate::http::session::FdSessionOps;
use crate::http::{
    date, Error, HttpRequest, HttpResponse, HttpServer, Method, Result, SessionOps, Status,
};
use crate::net::Listener;
use crate::{shutdown, transfer};
use std::net::{SocketAddr, TcpStream};
use std::path::{Component, Path, PathBuf};

/// Serves files below a document root
#[derive(Debug, Clone)]
pub struct FileServer {
    doc_root: PathBuf,
    index: String,
}

impl FileServer {
    pub fn new(doc_root: impl Into<PathBuf>, index: impl Into<String>) -> Self {
        FileServer {
            doc_root: doc_root.into(),
            index: index.into(),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        FileServer::new(&config.doc_root, &config.index)
    }

    pub fn doc_root(&self) -> &Path {
        &self.doc_root
    }

    /// Map a request target to a file under the document root.
    ///
    /// Targets ending in `/` get the index file appended. Targets that try
    /// to climb out with `..` map to nothing.
    pub fn resolve(&self, target: &str) -> Option<PathBuf> {
        let relative = Path::new(target.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return None;
        }

        let mut path = self.doc_root.join(relative);
        if target.ends_with('/') {
            path.push(&self.index);
        }
        Some(path)
    }

    /// Build the response for a request that parsed cleanly
    pub fn respond(&self, request: &HttpRequest) -> Result<HttpResponse> {
        if *request.method() != Method::Get {
            return Ok(HttpResponse::refusal(Status::NOT_IMPLEMENTED));
        }

        let path = match self.resolve(request.target()) {
            Some(path) if path.exists() => path,
            _ => {
                tracing::debug!(path = request.target(), "no such file");
                return Ok(HttpResponse::refusal(Status::NOT_FOUND));
            }
        };

        match transfer::read_body(&path) {
            Ok(body) => Ok(HttpResponse::file(body, &date::now()?)),
            Err(e @ Error::FileAccess { .. }) => {
                tracing::warn!(error = %e, "file exists but cannot be read");
                Ok(HttpResponse::refusal(Status::NOT_FOUND))
            }
            Err(e) => Err(e),
        }
    }

    /// Answer one request on an established session.
    ///
    /// Returns the status sent, or `None` if the peer left without sending
    /// anything. Transport failures are returned as errors.
    pub fn serve<S: SessionOps>(&self, server: &mut HttpServer<S>) -> Result<Option<Status>> {
        let response = match server.receive_request() {
            Ok(request) => {
                let response = self.respond(&request)?;
                tracing::info!(
                    method = %request.method(),
                    path = request.target(),
                    status = response.status().code(),
                    bytes = response.body().len(),
                    "request served"
                );
                response
            }
            Err(Error::ConnectionClosed) => return Ok(None),
            Err(e) => {
                let status = match e {
                    Error::MalformedRequest(_)
                    | Error::InvalidVersion(_)
                    | Error::MessageTooLarge { .. } => Status::BAD_REQUEST,
                    _ => return Err(e),
                };
                tracing::info!(error = %e, status = status.code(), "request refused");
                HttpResponse::refusal(status)
            }
        };

        server.send_response(&response)?;
        Ok(Some(response.status()))
    }

    /// Serve one accepted connection and close it
    pub fn handle_connection(&self, stream: TcpStream, peer: SocketAddr) -> Result<Option<Status>> {
        tracing::debug!(%peer, "connection accepted");

        let mut server = HttpServer::new(FdSessionOps::new(stream));
        let status = self.serve(&mut server)?;

        if let Err(e) = server.close() {
            tracing::debug!(%peer, error = %e, "close failed");
        }
        Ok(status)
    }

    /// Accept and serve connections one after another until shutdown is
    /// requested.
    pub fn run(&self, listener: &Listener) -> Result<()> {
        tracing::info!(
            addr = %listener.local_addr()?,
            root = %self.doc_root.display(),
            "waiting for connections"
        );

        while shutdown::is_running() {
            let (stream, peer) = {
                let _waiting = shutdown::AcceptGuard::enter();
                tracing::debug!("accepting");
                listener.accept()?
            };
            self.handle_connection(stream, peer)?;
        }

        tracing::info!("shutdown requested, listener closed");
        Ok(())
    }
}
