//! httpxfer - minimal HTTP/1.1 file transfer
//!
//! This crate provides a single-resource HTTP/1.1 client and a static file
//! server, both running blocking I/O over plain TCP with one connection at a
//! time and no keep-alive.

pub mod config;
pub mod docroot;
pub mod fetch;
pub mod http;
pub mod logging;
pub mod net;
pub mod shutdown;
pub mod transfer;
pub mod url;
