//! Common test utilities: a minimal canned-response HTTP server.
//!
//! The update flow only ever issues plain GETs, so the server speaks just
//! enough HTTP/1.1 to satisfy a real client: read the request head, match the
//! path against a route table, write a canned response, close the connection.
//! A route may advertise a Content-Length larger than its body and close
//! early, which a client sees as a transport failure mid-download. Every
//! answered request is recorded so tests can assert on what reached the wire.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    /// Advertised instead of the real body length when set; the connection
    /// still closes after `body`, so a larger value truncates the transfer.
    pub declared_len: Option<usize>,
    /// Written as a `Location` header when set.
    pub location: Option<String>,
}

impl Canned {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.as_bytes().to_vec(),
            declared_len: None,
            location: None,
        }
    }

    pub fn bytes(status: u16, body: &[u8]) -> Self {
        Self {
            status,
            content_type: "application/octet-stream",
            body: body.to_vec(),
            declared_len: None,
            location: None,
        }
    }

    /// A 302 pointing at `location`, with an empty body.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            status: 302,
            content_type: "text/plain",
            body: Vec::new(),
            declared_len: None,
            location: Some(location.into()),
        }
    }

    /// A response that dies mid-body: `declared_len` bytes promised, only
    /// `partial` delivered before the socket closes.
    pub fn truncated(partial: &[u8], declared_len: usize) -> Self {
        assert!(declared_len > partial.len(), "declared_len must exceed the delivered bytes");
        Self {
            status: 200,
            content_type: "application/octet-stream",
            body: partial.to_vec(),
            declared_len: Some(declared_len),
            location: None,
        }
    }
}

pub struct Route {
    pub path: String,
    pub response: Canned,
}

impl Route {
    pub fn new(path: impl Into<String>, response: Canned) -> Self {
        Self { path: path.into(), response }
    }
}

/// One request the server answered: the path asked for and the client string
/// that came with it.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub user_agent: Option<String>,
}

/// Serves canned responses on a local port until dropped.
///
/// Unknown paths get the release feed's own 404 shape, a JSON body with a
/// `message` field.
pub struct TestServer {
    port: u16,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Bind an ephemeral local port and serve `routes`. The builder closure
    /// receives the port so routes can point back at the server itself.
    pub async fn start(build_routes: impl FnOnce(u16) -> Vec<Route>) -> Self {
        let listener = TcpListener::bind(("127.0.0.1", 0))
            .await
            .expect("failed to bind test HTTP listener");
        let port = listener.local_addr().expect("failed to read test listener address").port();
        let routes = Arc::new(build_routes(port));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn({
            let seen = seen.clone();
            async move {
                loop {
                    tokio::select! {
                        _ = &mut shutdown_rx => break,
                        incoming = listener.accept() => {
                            let Ok((stream, _peer_addr)) = incoming else {
                                break;
                            };

                            let routes = routes.clone();
                            let seen = seen.clone();
                            tokio::spawn(async move {
                                let _ = serve_connection(stream, &routes, &seen).await;
                            });
                        }
                    }
                }
            }
        });

        Self { port, seen, shutdown_tx: Some(shutdown_tx), handle }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Base url for requests against this server.
    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Requests answered so far, in arrival order.
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().expect("request log poisoned").clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
        self.handle.abort();
    }
}

async fn serve_connection(
    mut stream: TcpStream,
    routes: &[Route],
    seen: &Mutex<Vec<SeenRequest>>,
) -> std::io::Result<()> {
    let request_head = read_request_head(&mut stream).await?;
    let request_line = request_head.lines().next().unwrap_or_default();
    // "GET /path HTTP/1.1"
    let path = request_line.split_whitespace().nth(1).unwrap_or_default().to_string();

    seen.lock().expect("request log poisoned").push(SeenRequest {
        path: path.clone(),
        user_agent: header_value(&request_head, "User-Agent").map(str::to_string),
    });

    let not_found = Canned::json(404, r#"{"message": "Not Found"}"#);
    let response = routes
        .iter()
        .find(|route| route.path == path)
        .map(|route| &route.response)
        .unwrap_or(&not_found);

    let content_length = response.declared_len.unwrap_or(response.body.len());
    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n",
        response.status,
        reason_phrase(response.status),
        response.content_type,
        content_length,
    );
    if let Some(location) = &response.location {
        head.push_str(&format!("Location: {location}\r\n"));
    }
    head.push_str("Connection: close\r\n\r\n");

    stream.write_all(head.as_bytes()).await?;
    stream.write_all(&response.body).await?;
    stream.flush().await?;
    stream.shutdown().await?;
    Ok(())
}

/// Read the raw request head, through the blank line that ends it.
async fn read_request_head(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut head = Vec::new();
    let mut byte = [0u8; 1];

    // Byte-wise is plenty here; request heads are tiny.
    while !head.ends_with(b"\r\n\r\n") {
        let n = stream.read(&mut byte).await?;
        if n == 0 || head.len() > 64 * 1024 {
            break;
        }
        head.push(byte[0]);
    }

    Ok(String::from_utf8_lossy(&head).into_owned())
}

/// Value of the first header named `name`, case-insensitively.
fn header_value<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().skip(1).find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.eq_ignore_ascii_case(name) { Some(value.trim()) } else { None }
    })
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        302 => "Found",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "",
    }
}
