//! Session operations abstraction
//!
//! The HTTP drivers never touch a socket directly. They go through
//! `SessionOps`, which keeps the byte-level transport swappable (and lets
//! tests substitute an in-memory one).

use super::{Error, Result};
use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::os::fd::AsRawFd;

/// Byte-level operations on a connected transport
pub trait SessionOps {
    /// Block until the session is ready for `events`
    fn poll(&self, events: PollEvents) -> Result<()>;

    /// Read available bytes. `Ok(0)` means the peer closed its side.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Write some of `buf`, returning how much was accepted
    fn write(&mut self, buf: &[u8]) -> Result<usize>;

    fn close(&mut self) -> Result<()>;
}

/// Poll events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEvents {
    Read,
    Write,
}

/// Session driving a `SessionOps` implementation
///
/// There is no timeout: a silent peer blocks until it sends or closes.
pub struct HttpSession<S: SessionOps> {
    session: S,
}

impl<S: SessionOps> HttpSession<S> {
    pub fn new(session: S) -> Self {
        HttpSession { session }
    }

    /// Read once, waiting for readability first
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.session.poll(PollEvents::Read)?;
        self.session.read(buf)
    }

    /// Write all of `buf`. A short write is followed up until everything
    /// is out; a write that makes no progress means the peer is gone.
    pub fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        let mut written = 0;

        while written < buf.len() {
            self.session.poll(PollEvents::Write)?;

            let n = self.session.write(&buf[written..])?;
            if n == 0 {
                return Err(Error::ConnectionClosed);
            }
            written += n;
        }

        Ok(())
    }

    pub fn close(&mut self) -> Result<()> {
        self.session.close()
    }
}

/// Plain TCP session operations
pub struct FdSessionOps {
    stream: TcpStream,
}

impl FdSessionOps {
    pub fn new(stream: TcpStream) -> Self {
        FdSessionOps { stream }
    }

}

impl SessionOps for FdSessionOps {
    fn poll(&self, events: PollEvents) -> Result<()> {
        use libc::{poll, pollfd, POLLIN, POLLOUT};

        let mut pfd = pollfd {
            fd: self.stream.as_raw_fd(),
            events: match events {
                PollEvents::Read => POLLIN,
                PollEvents::Write => POLLOUT,
            },
            revents: 0,
        };

        // Signals interrupt poll even with SA_RESTART; keep waiting
        loop {
            let result = unsafe { poll(&mut pfd as *mut pollfd, 1, -1) };

            if result >= 0 {
                return Ok(());
            }

            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(Error::Io(err));
            }
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.stream.read(buf).map_err(Error::Receive)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.stream.write(buf).map_err(Error::Send)
    }

    fn close(&mut self) -> Result<()> {
        match self.stream.shutdown(Shutdown::Both) {
            // Peer already gone; nothing left to tear down
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other.map_err(Error::from),
        }
    }
}
