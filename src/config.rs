//! Command-line configuration for both binaries
//!
//! Arguments are parsed with clap; every value is validated here so the rest
//! of the crate only sees well-formed settings.

use crate::transfer::Destination;
use crate::url::{ParsedUrl, DEFAULT_FILE_NAME};
use clap::Parser;
use std::path::PathBuf;

/// Longest accepted `-p` argument
pub const MAX_PORT_LEN: usize = 6;

/// Longest accepted `-i` argument
pub const MAX_INDEX_LEN: usize = 31;

pub const DEFAULT_CLIENT_PORT: u16 = 80;
pub const DEFAULT_SERVER_PORT: u16 = 8080;

fn parse_port(s: &str) -> Result<u16, String> {
    if s.len() > MAX_PORT_LEN {
        return Err(format!("at most {} digits", MAX_PORT_LEN));
    }
    s.parse::<u16>()
        .map_err(|_| format!("not a port number: {}", s))
}

fn parse_url(s: &str) -> Result<ParsedUrl, String> {
    ParsedUrl::parse(s).map_err(|e| e.to_string())
}

fn parse_existing_dir(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("not an existing directory: {}", s))
    }
}

fn parse_index(s: &str) -> Result<String, String> {
    if s.is_empty() || s.len() > MAX_INDEX_LEN {
        return Err(format!("must be 1 to {} characters", MAX_INDEX_LEN));
    }
    Ok(s.to_string())
}

/// Fetch a single resource over HTTP/1.1
#[derive(Parser, Debug)]
#[command(name = "client")]
pub struct ClientArgs {
    /// Port to connect to
    #[arg(short, long, value_name = "PORT", default_value = "80", value_parser = parse_port)]
    pub port: u16,

    /// Write the body to FILE
    #[arg(short = 'o', long = "output", value_name = "FILE", conflicts_with = "dir")]
    pub file: Option<PathBuf>,

    /// Write the body into DIR, named after the URL
    #[arg(short, long, value_name = "DIR", value_parser = parse_existing_dir)]
    pub dir: Option<PathBuf>,

    /// Resource to fetch, starting with http://
    #[arg(value_name = "URL", value_parser = parse_url)]
    pub url: ParsedUrl,
}

/// Validated client settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub port: u16,
    pub url: ParsedUrl,
    pub destination: Destination,
}

impl From<ClientArgs> for ClientConfig {
    fn from(args: ClientArgs) -> Self {
        ClientConfig {
            port: args.port,
            url: args.url,
            destination: Destination::select(args.file, args.dir),
        }
    }
}

/// Serve files from a document root over HTTP/1.1
#[derive(Parser, Debug)]
#[command(name = "server")]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(short, long, value_name = "PORT", default_value = "8080", value_parser = parse_port)]
    pub port: u16,

    /// File served for paths ending in '/'
    #[arg(short, long, value_name = "INDEX", default_value = DEFAULT_FILE_NAME, value_parser = parse_index)]
    pub index: String,

    /// Directory to serve
    #[arg(value_name = "DOC_ROOT", value_parser = parse_existing_dir)]
    pub doc_root: PathBuf,
}

/// Validated server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub index: String,
    pub doc_root: PathBuf,
}

impl From<ServerArgs> for ServerConfig {
    fn from(args: ServerArgs) -> Self {
        ServerConfig {
            port: args.port,
            index: args.index,
            doc_root: args.doc_root,
        }
    }
}

/// Print a clap error and exit: 0 for help/version output, 1 for usage
/// errors.
pub fn exit_with_usage(err: clap::Error) -> ! {
    let code = if err.use_stderr() { 1 } else { 0 };
    let _ = err.print();
    std::process::exit(code)
}
