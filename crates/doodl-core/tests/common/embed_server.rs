//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves canned responses by path prefix and records every request target
//! and header set. Responses can be cut short (truncated then closed) or
//! stalled mid-body to exercise the fetcher's failure and cancellation paths.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    /// Omit Content-Length; the body is delimited by connection close.
    pub omit_length: bool,
    /// Declare the full length but close after this many body bytes.
    pub truncate_at: Option<usize>,
    /// Send this many body bytes then hold the connection open.
    pub stall_after: Option<usize>,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            omit_length: false,
            truncate_at: None,
            stall_after: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub target: String,
    /// Lower-cased header names.
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct TestServer {
    /// e.g. "http://127.0.0.1:12345" (no trailing slash).
    pub base: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl TestServer {
    /// Starts a server. `routes` receives the base URL so responses can point back at the server.
    pub fn start<F>(routes: F) -> Self
    where
        F: FnOnce(&str) -> Vec<(&'static str, Route)>,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let base = format!("http://127.0.0.1:{}", port);
        let routes: Arc<Vec<(&'static str, Route)>> = Arc::new(routes(&base));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                thread::spawn(move || handle(stream, &routes, &recorded));
            }
        });
        Self { base, requests }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self, prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.target.starts_with(prefix))
            .count()
    }
}

fn handle(
    mut stream: TcpStream,
    routes: &[(&'static str, Route)],
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];
    while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => raw.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&raw).to_string();
    let req = parse_request(&request);
    let target = req.target.clone();
    recorded.lock().unwrap().push(req);

    let route = routes
        .iter()
        .find(|(prefix, _)| target.starts_with(prefix))
        .map(|(_, r)| r.clone())
        .unwrap_or_else(|| Route::status(404, "not found"));

    let mut head = format!("HTTP/1.1 {} X\r\nConnection: close\r\n", route.status);
    if !route.omit_length {
        head.push_str(&format!("Content-Length: {}\r\n", route.body.len()));
    }
    head.push_str("\r\n");
    if stream.write_all(head.as_bytes()).is_err() {
        return;
    }

    if let Some(n) = route.stall_after {
        let _ = stream.write_all(&route.body[..n.min(route.body.len())]);
        let _ = stream.flush();
        thread::sleep(Duration::from_secs(5));
        return;
    }
    let end = route
        .truncate_at
        .map_or(route.body.len(), |n| n.min(route.body.len()));
    let _ = stream.write_all(&route.body[..end]);
    let _ = stream.flush();
}

fn parse_request(request: &str) -> RecordedRequest {
    let mut lines = request.lines();
    let target = lines
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string();
    let headers = lines
        .take_while(|l| !l.trim().is_empty())
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();
    RecordedRequest { target, headers }
}
