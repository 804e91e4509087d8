//! HTTP client side of a transfer
//!
//! One request, one response, then the server closes the connection.

use super::{parser, HttpRequest, HttpResponse, HttpSession, Result, SessionOps, RECV_CHUNK};
use bytes::BytesMut;

/// HTTP client
pub struct HttpClient<S: SessionOps> {
    session: HttpSession<S>,
}

impl<S: SessionOps> HttpClient<S> {
    pub fn new(session: S) -> Self {
        HttpClient {
            session: HttpSession::new(session),
        }
    }

    /// Send the request as a single unit
    pub fn send_request(&mut self, request: &HttpRequest) -> Result<()> {
        self.session.write_all(&request.to_wire())
    }

    /// Read until the server closes the connection, then parse what arrived.
    pub fn receive_response(&mut self) -> Result<HttpResponse> {
        let mut buffer = BytesMut::with_capacity(RECV_CHUNK);
        let mut chunk = [0u8; RECV_CHUNK];

        loop {
            let n = self.session.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..n]);
        }

        tracing::debug!(bytes = buffer.len(), "response received");
        parser::parse_response(buffer.freeze())
    }

    pub fn close(&mut self) -> Result<()> {
        self.session.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::session::FdSessionOps;
    use crate::http::Error;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    /// Serve `reply` to one connection and hand back the request bytes
    fn one_shot(reply: Vec<u8>) -> (std::net::SocketAddr, thread::JoinHandle<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = vec![0u8; 1024];
            let n = stream.read(&mut buf).unwrap();
            stream.write_all(&reply).unwrap();
            buf.truncate(n);
            buf
        });

        (addr, handle)
    }

    #[test]
    fn test_send_request() {
        let (addr, handle) = one_shot(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nOK".to_vec());

        let mut client = HttpClient::new(FdSessionOps::new(TcpStream::connect(addr).unwrap()));
        client
            .send_request(&HttpRequest::get("localhost", "/a.txt"))
            .unwrap();

        let request = handle.join().unwrap();
        assert_eq!(
            request,
            b"GET /a.txt HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"
        );
    }

    #[test]
    fn test_receive_response_reads_until_close() {
        // Bigger than one read chunk
        let body = "0123456789".repeat(400);
        let reply = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: Close\r\n\r\n{}",
            body.len(),
            body
        );
        let (addr, handle) = one_shot(reply.into_bytes());

        let mut client = HttpClient::new(FdSessionOps::new(TcpStream::connect(addr).unwrap()));
        client
            .send_request(&HttpRequest::get("localhost", "/big"))
            .unwrap();
        let response = client.receive_response().unwrap();

        assert_eq!(response.status().code(), 200);
        assert_eq!(response.body().as_ref(), body.as_bytes());

        handle.join().unwrap();
    }

    #[test]
    fn test_non_200_surfaces_status() {
        let (addr, handle) = one_shot(b"HTTP/1.1 501 Not Implemented\r\nConnection: close\r\n\r\n".to_vec());

        let mut client = HttpClient::new(FdSessionOps::new(TcpStream::connect(addr).unwrap()));
        client.send_request(&HttpRequest::get("localhost", "/")).unwrap();
        let err = client.receive_response().unwrap_err();

        assert!(matches!(err, Error::ServerStatus { code: 501, .. }));
        assert_eq!(err.to_string(), "501 Not Implemented");

        handle.join().unwrap();
    }
}
