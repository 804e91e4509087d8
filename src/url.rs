//! `http://` URL splitting
//!
//! Only what a single GET needs: the host to connect to and send in `Host`,
//! and the path to request. A port written into the URL is not used for
//! connecting; the port comes from configuration.

use crate::http::{Error, Result};

/// Required scheme prefix
pub const SCHEME: &str = "http://";

/// Characters that end the host part
pub const HOST_DELIMITERS: &[char] = &[';', '/', ':', '@', '=', '&'];

/// File name used when the URL path names a directory
pub const DEFAULT_FILE_NAME: &str = "index.html";

/// A URL split into host and request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    host: String,
    path: String,
}

impl ParsedUrl {
    /// Split `url` into host and path.
    ///
    /// The host runs from after `http://` up to the first of `;/:@=&`; the
    /// path is everything from the first `/` after the scheme. A URL with
    /// no delimiter at all is rejected.
    pub fn parse(url: &str) -> Result<Self> {
        if url.len() <= SCHEME.len() {
            return Err(Error::MalformedUrl(format!("too short: {:?}", url)));
        }
        let rest = url
            .strip_prefix(SCHEME)
            .ok_or_else(|| Error::MalformedUrl(format!("must start with {}: {:?}", SCHEME, url)))?;

        let host_end = rest
            .find(HOST_DELIMITERS)
            .ok_or_else(|| Error::MalformedUrl(format!("no path or port after host: {:?}", url)))?;

        let host = &rest[..host_end];
        if host.is_empty() {
            return Err(Error::MalformedUrl(format!("empty host: {:?}", url)));
        }

        let path = rest.find('/').map(|i| &rest[i..]).unwrap_or_default();

        Ok(ParsedUrl {
            host: host.to_string(),
            path: path.to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Path as written in the URL; empty when the URL has none
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path to put on the request line. An empty path becomes `/`.
    pub fn request_path(&self) -> &str {
        if self.path.is_empty() {
            "/"
        } else {
            &self.path
        }
    }

    /// Name for saving the resource: the last path segment, or
    /// `index.html` when the path is empty, ends in `/`, or ends in a `.`
    /// or `..` segment.
    pub fn file_name(&self) -> &str {
        match self.path.rsplit('/').next() {
            Some("" | "." | "..") | None => DEFAULT_FILE_NAME,
            Some(segment) => segment,
        }
    }
}
