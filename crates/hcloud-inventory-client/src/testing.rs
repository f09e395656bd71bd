//! In-process stand-in for the Hetzner Cloud API
//!
//! Only built with the `test-util` feature.

use std::io::{self, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// Minimal HTTP/1.1 server answering each connection with the next canned
/// response and recording the raw request head
pub struct MockApi {
    endpoint: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockApi {
    /// Serve `responses` in order, one per connection, then stop accepting
    ///
    /// # Errors
    /// Returns an error if no local port can be bound.
    pub fn start(responses: Vec<(u16, String)>) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let endpoint = format!("http://{}/v1", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        thread::spawn(move || {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };

                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                if let Ok(mut requests) = recorded.lock() {
                    requests.push(String::from_utf8_lossy(&head).to_string());
                }

                let response = format!(
                    "HTTP/1.1 {status} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        Ok(Self { endpoint, requests })
    }

    /// Serve a single response
    ///
    /// # Errors
    /// Returns an error if no local port can be bound.
    pub fn single(status: u16, body: impl Into<String>) -> io::Result<Self> {
        Self::start(vec![(status, body.into())])
    }

    /// Base URL to pass as the client endpoint
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Raw request heads received so far
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// First line of each request, e.g. `GET /v1/servers?page=1&per_page=50 HTTP/1.1`
    #[must_use]
    pub fn request_lines(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.lines().next().unwrap_or_default().to_string())
            .collect()
    }
}
