//! HTTP message types
//!
//! Requests and responses as exchanged by the transfer client and server.

use super::{parser, Error, Headers, Result, CRLF};
use bytes::Bytes;
use std::fmt;
use std::str::FromStr;

/// Request method. Only `GET` is served; every other token is kept as
/// written so it can be logged and refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Other(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Other(token) => token,
        }
    }
}

impl From<&str> for Method {
    /// Methods are case-sensitive: `get` is not `GET`.
    fn from(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            other => Method::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Version {
    Http10,
    #[default]
    Http11,
}

impl Version {
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Http10 => "HTTP/1.0",
            Version::Http11 => "HTTP/1.1",
        }
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "HTTP/1.0" => Ok(Version::Http10),
            "HTTP/1.1" => Ok(Version::Http11),
            _ => Err(Error::InvalidVersion(s.to_string())),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status {
    code: u16,
}

impl Status {
    pub const OK: Status = Status { code: 200 };
    pub const BAD_REQUEST: Status = Status { code: 400 };
    pub const NOT_FOUND: Status = Status { code: 404 };
    pub const NOT_IMPLEMENTED: Status = Status { code: 501 };

    pub fn code(&self) -> u16 {
        self.code
    }

    /// Canonical reason phrase
    pub fn reason_phrase(&self) -> &'static str {
        match self.code {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            501 => "Not Implemented",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.reason_phrase())
    }
}

/// HTTP request. Requests in this protocol never carry a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    method: Method,
    target: String,
    version: Version,
    headers: Headers,
}

impl HttpRequest {
    pub fn new(method: Method, target: impl Into<String>, version: Version, headers: Headers) -> Self {
        HttpRequest {
            method,
            target: target.into(),
            version,
            headers,
        }
    }

    /// The one request the client ever sends:
    /// `GET <path> HTTP/1.1` with `Host` and `Connection: close`.
    pub fn get(host: &str, path: &str) -> Self {
        let mut headers = Headers::new();
        headers.insert("Host", host);
        headers.insert("Connection", "close");
        HttpRequest::new(Method::Get, path, Version::Http11, headers)
    }

    /// Parse a received request head. See [`parser::parse_request_head`].
    pub fn parse(head: &[u8]) -> Result<Self> {
        parser::parse_request_head(head)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request target exactly as it appeared on the request line
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn to_wire(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(64 + self.target.len());

        buf.extend_from_slice(self.method.as_str().as_bytes());
        buf.push(b' ');
        buf.extend_from_slice(self.target.as_bytes());
        buf.push(b' ');
        buf.extend_from_slice(self.version.as_str().as_bytes());
        buf.extend_from_slice(CRLF.as_bytes());

        self.headers.write_wire(&mut buf);
        buf.extend_from_slice(CRLF.as_bytes());

        buf
    }
}

/// HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: Status,
    reason: String,
    headers: Headers,
    body: Bytes,
}

impl HttpResponse {
    pub fn new(status: Status, headers: Headers, body: Bytes) -> Self {
        HttpResponse {
            status,
            reason: status.reason_phrase().to_string(),
            headers,
            body,
        }
    }

    /// Header-only refusal (400, 404, 501)
    pub fn refusal(status: Status) -> Self {
        let mut headers = Headers::new();
        headers.insert("Connection", "close");
        HttpResponse::new(status, headers, Bytes::new())
    }

    /// `200 OK` carrying a file body. `Content-Length` is taken from `body`.
    pub fn file(body: Bytes, date: &str) -> Self {
        let mut headers = Headers::new();
        headers.insert("Date", date);
        headers.insert("Content-Length", body.len().to_string());
        headers.insert("Connection", "Close");
        HttpResponse::new(Status::OK, headers, body)
    }

    /// Parse a complete response as received by the client.
    /// See [`parser::parse_response`].
    pub fn parse(raw: Bytes) -> Result<Self> {
        parser::parse_response(raw)
    }

    pub(crate) fn from_parts(status: Status, reason: String, headers: Headers, body: Bytes) -> Self {
        HttpResponse {
            status,
            reason,
            headers,
            body,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Status line, header fields and the blank line; the body is sent
    /// separately.
    pub fn head_to_wire(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(128);

        buf.extend_from_slice(Version::Http11.as_str().as_bytes());
        buf.push(b' ');
        buf.extend_from_slice(self.status.code().to_string().as_bytes());
        buf.push(b' ');
        buf.extend_from_slice(self.reason.as_bytes());
        buf.extend_from_slice(CRLF.as_bytes());

        self.headers.write_wire(&mut buf);
        buf.extend_from_slice(CRLF.as_bytes());

        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_token() {
        assert_eq!(Method::from("GET"), Method::Get);
        assert_eq!(Method::from("POST"), Method::Other("POST".to_string()));
        assert_eq!(Method::from("get"), Method::Other("get".to_string()));
        assert_eq!(Method::from("BREW").to_string(), "BREW");
    }

    #[test]
    fn test_version_from_str() {
        assert_eq!("HTTP/1.1".parse::<Version>().unwrap(), Version::Http11);
        assert_eq!("HTTP/1.0".parse::<Version>().unwrap(), Version::Http10);
        assert!("HTTP/2".parse::<Version>().is_err());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::OK.to_string(), "200 OK");
        assert_eq!(Status::BAD_REQUEST.to_string(), "400 Bad Request");
        assert_eq!(Status::NOT_FOUND.to_string(), "404 Not Found");
        assert_eq!(Status::NOT_IMPLEMENTED.to_string(), "501 Not Implemented");
    }

    #[test]
    fn test_get_request_wire() {
        let req = HttpRequest::get("example.com", "/index.html");
        assert_eq!(
            req.to_wire(),
            b"GET /index.html HTTP/1.1\r\nHost: example.com\r\nConnection: close\r\n\r\n"
        );
    }

    #[test]
    fn test_refusal_head() {
        let resp = HttpResponse::refusal(Status::BAD_REQUEST);
        assert_eq!(
            resp.head_to_wire(),
            b"HTTP/1.1 400 Bad Request\r\nConnection: close\r\n\r\n"
        );
        assert!(resp.body().is_empty());
    }

    #[test]
    fn test_file_head() {
        let resp = HttpResponse::file(Bytes::from_static(b"hello\n"), "Mon, 03 Jan 22 10:00:00 CET");
        let head = String::from_utf8(resp.head_to_wire()).unwrap();

        assert_eq!(
            head,
            "HTTP/1.1 200 OK\r\n\
             Date: Mon, 03 Jan 22 10:00:00 CET\r\n\
             Content-Length: 6\r\n\
             Connection: Close\r\n\r\n"
        );
        assert_eq!(resp.body().as_ref(), b"hello\n");
    }
}
