//! A one-shot HTTP stub standing in for the IntelX API in tests.

use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub struct StubResponse {
    status: u16,
    body: String,
}

impl StubResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        StubResponse::status(200, body)
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        StubResponse {
            status,
            body: body.into(),
        }
    }
}

pub struct StubServer {
    pub base_url: String,
    handle: JoinHandle<Vec<String>>,
}

impl StubServer {
    /// Wait until every queued response was served and return the raw
    /// requests in arrival order.
    pub async fn requests(self) -> Vec<String> {
        self.handle.await.unwrap()
    }
}

/// Serve `responses` in order, one connection each.
pub async fn serve(responses: Vec<StubResponse>) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut seen = Vec::new();
        for response in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            seen.push(read_request(&mut stream).await);

            let reason = StatusCode::from_u16(response.status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown");
            let raw = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response.status,
                reason,
                response.body.len(),
                response.body
            );
            stream.write_all(raw.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        }
        seen
    });

    StubServer { base_url, handle }
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]);
            if buf.len() >= end + 4 + content_length(&head) {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}
