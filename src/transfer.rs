//! Moving bodies between files and the wire
//!
//! The server loads a whole file into one buffer before responding; the
//! client writes a received body to exactly one destination.

use crate::http::{Error, Result};
use crate::url::ParsedUrl;
use bytes::Bytes;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Read all of `path`, byte for byte.
pub fn read_body(path: &Path) -> Result<Bytes> {
    let file_access = |source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(file_access)?;
    let size_hint = file.metadata().map(|m| m.len() as usize).unwrap_or(0);

    let mut body = Vec::with_capacity(size_hint);
    file.read_to_end(&mut body).map_err(file_access)?;

    Ok(Bytes::from(body))
}

/// Where the client puts a received body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    /// Write to this exact file
    File(PathBuf),
    /// Write into this directory, named after the URL's last path segment
    Directory(PathBuf),
}

impl Destination {
    /// Pick the destination. A directory wins over a file; with neither,
    /// the body goes to standard output.
    pub fn select(output_file: Option<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        match (output_dir, output_file) {
            (Some(dir), _) => Destination::Directory(dir),
            (None, Some(file)) => Destination::File(file),
            (None, None) => Destination::Stdout,
        }
    }

    /// File the body will land in, or `None` for standard output
    pub fn target(&self, url: &ParsedUrl) -> Option<PathBuf> {
        match self {
            Destination::Stdout => None,
            Destination::File(path) => Some(path.clone()),
            Destination::Directory(dir) => Some(dir.join(url.file_name())),
        }
    }

    /// Write `body` to the destination, creating or truncating files.
    /// Returns where it went.
    pub fn deliver(&self, url: &ParsedUrl, body: &[u8]) -> Result<Option<PathBuf>> {
        match self.target(url) {
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(body)?;
                stdout.flush()?;
                Ok(None)
            }
            Some(path) => {
                write_file(&path, body)?;
                Ok(Some(path))
            }
        }
    }
}

fn write_file(path: &Path, body: &[u8]) -> Result<()> {
    let file_access = |source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(file_access)?;
    file.write_all(body).map_err(file_access)?;
    file.flush().map_err(file_access)
}
