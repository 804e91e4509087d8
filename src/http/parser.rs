//! HTTP message parsing
//!
//! Field splitting for request and status lines, and whole-message parsers
//! for the two directions this crate receives: request heads on the server,
//! complete responses on the client.

use super::{Error, Headers, HttpRequest, HttpResponse, Method, Result, Status, Version, HEAD_TERMINATOR};
use bytes::Bytes;

/// Offset of the `\r\n\r\n` that ends a message head
pub fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEAD_TERMINATOR.len())
        .position(|w| w == HEAD_TERMINATOR)
}

/// Space-separated fields of a start line. Runs of spaces count as one
/// separator.
fn fields(line: &str) -> Vec<&str> {
    line.split(' ').filter(|f| !f.is_empty()).collect()
}

/// Parse a request line
///
/// Format: METHOD TARGET VERSION
///
/// Checks run in a fixed order so the server can map each failure to one
/// status: field count, then version (both `400`). The method is not
/// checked here; any token is accepted and refusing it is the server's call.
pub fn parse_request_line(line: &str) -> Result<(Method, String, Version)> {
    let parts = fields(line);

    if parts.len() != 3 {
        return Err(Error::MalformedRequest(format!(
            "expected 3 fields in request line, got {}",
            parts.len()
        )));
    }

    let version: Version = parts[2].parse()?;
    if version != Version::Http11 {
        return Err(Error::InvalidVersion(parts[2].to_string()));
    }

    Ok((Method::from(parts[0]), parts[1].to_string(), version))
}

/// Parse a request head: the request line followed by header fields.
///
/// `head` may run past the blank line or stop short of it; only the part
/// before the terminator is looked at. The request line ends at the first CR
/// (or LF) and must be valid UTF-8. Header lines are best effort: lines that
/// do not decode or have no `Name: value` shape are skipped.
pub fn parse_request_head(head: &[u8]) -> Result<HttpRequest> {
    let head = match find_head_end(head) {
        Some(end) => &head[..end],
        None => head,
    };

    let line_end = head
        .iter()
        .position(|&b| b == b'\r' || b == b'\n')
        .unwrap_or(head.len());
    let request_line = std::str::from_utf8(&head[..line_end])
        .map_err(|_| Error::MalformedRequest("request line is not valid UTF-8".to_string()))?;
    let (method, target, version) = parse_request_line(request_line)?;

    let rest = String::from_utf8_lossy(&head[line_end..]);
    let headers = parse_header_lines(rest.lines());

    Ok(HttpRequest::new(method, target, version, headers))
}

/// Collect `Name: value` lines, skipping any that do not parse
fn parse_header_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Headers {
    let mut headers = Headers::new();
    for line in lines.filter(|l| !l.is_empty()) {
        match Headers::parse_line(line) {
            Ok((name, value)) => headers.insert(name, value),
            Err(e) => tracing::debug!(error = %e, "header line skipped"),
        }
    }
    headers
}

/// Parse a status line
///
/// Format: VERSION CODE [REASON]
///
/// The version must be exactly `HTTP/1.1` and the code must be a whole
/// integer; anything else is a protocol error. The code is not range
/// checked. Returns the text after the first space alongside, e.g.
/// `404 Not Found`.
pub fn parse_status_line(line: &str) -> Result<(Version, i64, String)> {
    let parts = fields(line);

    if parts.len() < 2 {
        return Err(Error::Protocol(format!("Invalid status line: {:?}", line)));
    }
    if parts[0] != Version::Http11.as_str() {
        return Err(Error::Protocol(format!("Unsupported version: {}", parts[0])));
    }

    let code = parts[1]
        .parse::<i64>()
        .map_err(|_| Error::Protocol(format!("Invalid status code: {}", parts[1])))?;

    let after_version = line
        .split_once(' ')
        .map(|(_, rest)| rest.trim())
        .unwrap_or_default();

    Ok((Version::Http11, code, after_version.to_string()))
}

/// Parse a complete response as read until the server closed the connection.
///
/// The status line is validated first; any code other than 200 is reported
/// as [`Error::ServerStatus`] without looking any further. For `200`,
/// everything after the head terminator is the body, cut to `Content-Length`
/// when the server declared a usable one. Header lines that do not parse are
/// skipped.
pub fn parse_response(raw: Bytes) -> Result<HttpResponse> {
    if raw.is_empty() {
        return Err(Error::Protocol("empty response".to_string()));
    }

    let line_end = raw.iter().position(|&b| b == b'\n').unwrap_or(raw.len());
    let status_line = String::from_utf8_lossy(&raw[..line_end]);
    let (_, code, after_version) = parse_status_line(status_line.trim_end_matches('\r'))?;

    if code != i64::from(Status::OK.code()) {
        return Err(Error::ServerStatus {
            code,
            message: after_version,
        });
    }

    let head_end = find_head_end(&raw)
        .ok_or_else(|| Error::Incomplete("response head has no terminator".to_string()))?;

    let head = String::from_utf8_lossy(&raw[..head_end]);
    let headers = parse_header_lines(head.lines().skip(1));

    let mut body = raw.slice(head_end + HEAD_TERMINATOR.len()..);
    if let Some(declared) = headers.content_length() {
        if body.len() < declared {
            return Err(Error::Incomplete(format!(
                "expected {} body bytes, got {}",
                declared,
                body.len()
            )));
        }
        body.truncate(declared);
    }

    let reason = after_version
        .split_once(' ')
        .map(|(_, reason)| reason.to_string())
        .unwrap_or_else(|| Status::OK.reason_phrase().to_string());

    Ok(HttpResponse::from_parts(Status::OK, reason, headers, body))
}
