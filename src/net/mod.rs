//! TCP connection establishment
//!
//! Blocking resolve → connect for the client and resolve → bind → listen →
//! accept for the server. Both sides stick to IPv4 stream sockets and try
//! each resolved candidate in turn, keeping the first that works.

use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, TcpListener, TcpStream, ToSocketAddrs};

/// Result type for network operations
pub type Result<T> = std::result::Result<T, Error>;

/// Connection setup errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("getaddrinfo() failed for {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("no IPv4 address for {host}:{port}")]
    NoAddress { host: String, port: u16 },

    #[error("socket() or connect() failed for {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("socket() or bind() failed on port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("listen() failed: {0}")]
    Listen(#[source] io::Error),

    #[error("accept() failed: {0}")]
    Accept(#[source] io::Error),
}

/// Only one connection is ever serviced at a time
pub const LISTEN_BACKLOG: i32 = 1;

/// Resolve `host:port` to IPv4 candidates, in resolver order
fn resolve_v4(host: &str, port: u16) -> Result<Vec<SocketAddrV4>> {
    let candidates: Vec<SocketAddrV4> = (host, port)
        .to_socket_addrs()
        .map_err(|source| Error::Resolve {
            host: host.to_string(),
            port,
            source,
        })?
        .filter_map(|addr| match addr {
            SocketAddr::V4(v4) => Some(v4),
            SocketAddr::V6(_) => None,
        })
        .collect();

    if candidates.is_empty() {
        return Err(Error::NoAddress {
            host: host.to_string(),
            port,
        });
    }

    Ok(candidates)
}

/// Connect to `host:port`.
///
/// Each candidate gets a fresh socket; the first successful connect wins.
/// If all fail, the last failure is reported.
pub fn connect(host: &str, port: u16) -> Result<TcpStream> {
    let mut last_err = None;

    for addr in resolve_v4(host, port)? {
        let attempt = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))
            .and_then(|socket| socket.connect(&SockAddr::from(addr)).map(|_| socket));

        match attempt {
            Ok(socket) => {
                tracing::debug!(%addr, "connected");
                return Ok(socket.into());
            }
            Err(e) => {
                tracing::debug!(%addr, error = %e, "connect attempt failed");
                last_err = Some(e);
            }
        }
    }

    Err(Error::Connect {
        host: host.to_string(),
        port,
        source: last_err.unwrap_or_else(|| io::Error::from(io::ErrorKind::AddrNotAvailable)),
    })
}

/// Listening socket with a backlog of one
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Bind every interface on `port`, with address reuse enabled, and
    /// start listening.
    pub fn bind(port: u16) -> Result<Self> {
        Self::bind_addr(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port))
    }

    /// Bind a specific local address. Port 0 picks a free port.
    pub fn bind_addr(addr: SocketAddrV4) -> Result<Self> {
        let bind_err = |source| Error::Bind {
            port: addr.port(),
            source,
        };

        let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP)).map_err(bind_err)?;
        socket.set_reuse_address(true).map_err(bind_err)?;
        socket.bind(&SockAddr::from(addr)).map_err(bind_err)?;
        socket.listen(LISTEN_BACKLOG).map_err(Error::Listen)?;

        Ok(Listener {
            inner: socket.into(),
        })
    }

    /// Block until a peer connects
    pub fn accept(&self) -> Result<(TcpStream, SocketAddr)> {
        self.inner.accept().map_err(Error::Accept)
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }
}
