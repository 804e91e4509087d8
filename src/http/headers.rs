//! HTTP header fields
//!
//! Headers are kept in arrival order. Name lookups ignore ASCII case.

use super::{Error, Result, CRLF, MAX_HEADERS};

/// Ordered collection of header fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    fields: Vec<(String, String)>,
}

impl Headers {
    /// Create an empty collection
    pub fn new() -> Self {
        Headers { fields: Vec::new() }
    }

    /// Append a field. Fields past `MAX_HEADERS` are dropped.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        if self.fields.len() >= MAX_HEADERS {
            return;
        }
        self.fields.push((name.into(), value.into()));
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Declared `Content-Length`. A value that is not a plain decimal
    /// number counts as absent.
    pub fn content_length(&self) -> Option<usize> {
        self.get("Content-Length")?.parse().ok()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Append every field as `Name: value\r\n`
    pub fn write_wire(&self, buf: &mut Vec<u8>) {
        for (name, value) in self.iter() {
            buf.extend_from_slice(name.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(value.as_bytes());
            buf.extend_from_slice(CRLF.as_bytes());
        }
    }

    /// Split a `Name: value` line
    pub fn parse_line(line: &str) -> Result<(String, String)> {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| Error::InvalidHeader(format!("No colon in header: {}", line)))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidHeader("Empty header name".to_string()));
        }

        Ok((name.to_string(), value.trim().to_string()))
    }
}
