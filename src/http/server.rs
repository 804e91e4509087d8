//! HTTP server side of a transfer
//!
//! Receives one request head per connection and answers it with one
//! response.

use super::{
    parser, Error, HttpRequest, HttpResponse, HttpSession, Result, SessionOps, HEAD_TERMINATOR,
    MAX_REQUEST_HEAD, RECV_CHUNK,
};
use bytes::BytesMut;

/// HTTP server
pub struct HttpServer<S: SessionOps> {
    session: HttpSession<S>,
}

impl<S: SessionOps> HttpServer<S> {
    pub fn new(session: S) -> Self {
        HttpServer {
            session: HttpSession::new(session),
        }
    }

    /// Read a request head.
    ///
    /// Reads stop at the blank line, at end of stream, or once
    /// `MAX_REQUEST_HEAD` bytes have arrived without a blank line. A peer
    /// that closes before sending anything yields `ConnectionClosed`.
    pub fn receive_request(&mut self) -> Result<HttpRequest> {
        let mut buffer = BytesMut::with_capacity(RECV_CHUNK);
        let mut chunk = [0u8; RECV_CHUNK];
        let mut scanned = 0;

        loop {
            let n = self.session.read(&mut chunk)?;
            if n == 0 {
                if buffer.is_empty() {
                    return Err(Error::ConnectionClosed);
                }
                break;
            }
            buffer.extend_from_slice(&chunk[..n]);

            // The terminator may straddle two reads
            if parser::find_head_end(&buffer[scanned..]).is_some() {
                break;
            }
            if buffer.len() > MAX_REQUEST_HEAD {
                return Err(Error::MessageTooLarge {
                    limit: MAX_REQUEST_HEAD,
                });
            }
            scanned = buffer.len().saturating_sub(HEAD_TERMINATOR.len() - 1);
        }

        parser::parse_request_head(&buffer)
    }

    /// Send the status line and headers, then the body as a second write
    pub fn send_response(&mut self, response: &HttpResponse) -> Result<()> {
        self.session.write_all(&response.head_to_wire())?;

        if !response.body().is_empty() {
            self.session.write_all(response.body())?;
        }

        Ok(())
    }

    pub fn close(&mut self) -> Result<()> {
        self.session.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::session::FdSessionOps;
    use crate::http::{Method, Status};
    use bytes::Bytes;
    use std::io::{Read, Write};
    use std::net::{Shutdown, TcpListener, TcpStream};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_receive_request() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream
                .write_all(b"GET /test.html HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
                .unwrap();

            let mut response = Vec::new();
            stream.read_to_end(&mut response).unwrap();
            response
        });

        let (stream, _) = listener.accept().unwrap();
        let mut server = HttpServer::new(FdSessionOps::new(stream));

        let request = server.receive_request().unwrap();
        assert_eq!(request.method(), &Method::Get);
        assert_eq!(request.target(), "/test.html");
        assert_eq!(request.headers().get("Host"), Some("localhost"));

        server
            .send_response(&HttpResponse::file(Bytes::from_static(b"hi"), "Thu, 01 Jan 70 00:00:00 UTC"))
            .unwrap();
        server.close().unwrap();

        let response = handle.join().unwrap();
        assert_eq!(
            response,
            b"HTTP/1.1 200 OK\r\nDate: Thu, 01 Jan 70 00:00:00 UTC\r\nContent-Length: 2\r\nConnection: Close\r\n\r\nhi"
        );
    }

    #[test]
    fn test_request_head_split_across_reads() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream.write_all(b"GET /slow HTTP/1.1\r\nHost: x\r").unwrap();
            thread::sleep(Duration::from_millis(50));
            stream.write_all(b"\n\r\n").unwrap();
            thread::sleep(Duration::from_millis(200));
        });

        let (stream, _) = listener.accept().unwrap();
        let mut server = HttpServer::new(FdSessionOps::new(stream));
        let request = server.receive_request().unwrap();
        assert_eq!(request.target(), "/slow");

        handle.join().unwrap();
    }

    #[test]
    fn test_request_ended_by_half_close() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream.write_all(b"POST /x.html HTTP/1.1").unwrap();
            stream.shutdown(Shutdown::Write).unwrap();
        });

        let (stream, _) = listener.accept().unwrap();
        let mut server = HttpServer::new(FdSessionOps::new(stream));
        let request = server.receive_request().unwrap();
        assert_eq!(request.method(), &Method::Other("POST".to_string()));

        handle.join().unwrap();
    }

    #[test]
    fn test_empty_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            drop(TcpStream::connect(addr).unwrap());
        });

        let (stream, _) = listener.accept().unwrap();
        let mut server = HttpServer::new(FdSessionOps::new(stream));
        assert!(matches!(server.receive_request(), Err(Error::ConnectionClosed)));

        handle.join().unwrap();
    }

    #[test]
    fn test_oversized_head() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            let mut head = b"GET / HTTP/1.1\r\n".to_vec();
            while head.len() <= MAX_REQUEST_HEAD {
                head.extend_from_slice(b"X-Filler: aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\r\n");
            }
            // The server may stop reading and close before all of this lands
            let _ = stream.write_all(&head);
            let mut sink = Vec::new();
            let _ = stream.read_to_end(&mut sink);
        });

        let (stream, _) = listener.accept().unwrap();
        let mut server = HttpServer::new(FdSessionOps::new(stream));
        assert!(matches!(
            server.receive_request(),
            Err(Error::MessageTooLarge { .. })
        ));
        server
            .send_response(&HttpResponse::refusal(Status::BAD_REQUEST))
            .unwrap();
        drop(server);

        handle.join().unwrap();
    }

    #[test]
    fn test_refusal_has_no_body() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream.write_all(b"GET /missing.html HTTP/1.1\r\n\r\n").unwrap();
            let mut response = Vec::new();
            stream.read_to_end(&mut response).unwrap();
            response
        });

        let (stream, _) = listener.accept().unwrap();
        let mut server = HttpServer::new(FdSessionOps::new(stream));
        server.receive_request().unwrap();
        server
            .send_response(&HttpResponse::refusal(Status::NOT_FOUND))
            .unwrap();
        server.close().unwrap();

        assert_eq!(
            handle.join().unwrap(),
            b"HTTP/1.1 404 Not Found\r\nConnection: close\r\n\r\n"
        );
    }
}
