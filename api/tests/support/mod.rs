//! In-process HTTP stub used by the client tests.

use std::io::Read;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use tiny_http::{Header, Response, Server, StatusCode};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

#[derive(Debug, Clone)]
pub struct Canned {
    method: &'static str,
    path: &'static str,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Canned {
    pub fn json(method: &'static str, path: &'static str, status: u16, body: serde_json::Value) -> Self {
        Self {
            method,
            path,
            status,
            content_type: "application/json",
            body: body.to_string().into_bytes(),
        }
    }

    pub fn text(method: &'static str, path: &'static str, status: u16, body: &str) -> Self {
        Self {
            method,
            path,
            status,
            content_type: "text/plain",
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn bytes(method: &'static str, path: &'static str, status: u16, body: Vec<u8>) -> Self {
        Self {
            method,
            path,
            status,
            content_type: "image/png",
            body,
        }
    }
}

pub struct MockServer {
    pub base_url: String,
    server: Arc<Server>,
    requests: Receiver<Recorded>,
}

impl MockServer {
    pub fn start(routes: Vec<Canned>) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind stub server"));
        let addr = server
            .server_addr()
            .to_ip()
            .expect("stub server listens on an IP address");
        let (tx, rx) = mpsc::channel();

        let worker = Arc::clone(&server);
        thread::spawn(move || {
            for mut request in worker.incoming_requests() {
                let mut body = Vec::new();
                let _ = request.as_reader().read_to_end(&mut body);
                let recorded = Recorded {
                    method: request.method().as_str().to_string(),
                    path: request.url().to_string(),
                    headers: request
                        .headers()
                        .iter()
                        .map(|h| (h.field.to_string(), h.value.to_string()))
                        .collect(),
                    body,
                };

                let canned = routes
                    .iter()
                    .find(|c| c.method == recorded.method && c.path == recorded.path)
                    .cloned();
                let _ = tx.send(recorded);

                let response = match canned {
                    Some(canned) => {
                        let header =
                            Header::from_bytes(&b"Content-Type"[..], canned.content_type.as_bytes())
                                .expect("valid header");
                        Response::from_data(canned.body)
                            .with_status_code(StatusCode(canned.status))
                            .with_header(header)
                    }
                    None => Response::from_data(Vec::new()).with_status_code(StatusCode(404)),
                };
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            server,
            requests: rx,
        }
    }

    /// Requests received so far, in arrival order.
    pub fn received(&self) -> Vec<Recorded> {
        self.requests.try_iter().collect()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.server.unblock();
    }
}

/// Base URL nobody listens on, for transport failures.
pub const UNREACHABLE: &str = "http://127.0.0.1:9";
