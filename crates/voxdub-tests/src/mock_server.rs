//! A scripted stand-in for the speech service's REST API.
//!
//! A `tiny_http` server on an ephemeral localhost port answers requests with
//! the scripted responses, in order, recording each request it receives.

use std::io::{self, Read};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use serde_json::{json, Value};
use tiny_http::{Header, Request, Response, Server};

/// One canned HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl MockResponse {
    /// A response with an arbitrary status and body.
    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A `generateContent` answer with a single text part.
    pub fn text(text: &str) -> Self {
        Self::raw(
            200,
            json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": text }] },
                    "finishReason": "STOP"
                }]
            })
            .to_string(),
        )
    }

    /// A `generateContent` answer carrying base64 PCM as inline data.
    pub fn audio(base64: &str) -> Self {
        Self::raw(
            200,
            json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{
                            "inlineData": {
                                "mimeType": "audio/L16;codec=pcm;rate=24000",
                                "data": base64
                            }
                        }]
                    },
                    "finishReason": "STOP"
                }]
            })
            .to_string(),
        )
    }

    /// A Google-style error envelope.
    pub fn error(status: u16, message: &str) -> Self {
        Self::raw(
            status,
            json!({ "error": { "code": status, "message": message, "status": "INVALID_ARGUMENT" } })
                .to_string(),
        )
    }
}

/// A request as the server saw it.
#[derive(Debug, Clone, Default)]
pub struct RecordedRequest {
    /// Request method.
    pub method: String,
    /// Request target (path and query).
    pub path: String,
    /// Headers with lowercased names, in arrival order.
    pub headers: Vec<(String, String)>,
    /// Decoded request body.
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// First value of a header, by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Body parsed as JSON (`Value::Null` if it is not JSON).
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

/// Local HTTP server answering from a script.
pub struct MockServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockServer {
    /// Starts serving `responses`, one per request.
    ///
    /// The serving thread exits once the script is used up.
    pub fn start(responses: Vec<MockResponse>) -> io::Result<Self> {
        let server = Server::http("127.0.0.1:0").map_err(io::Error::other)?;
        let addr = server
            .server_addr()
            .to_ip()
            .ok_or_else(|| io::Error::other("mock server is not listening on TCP"))?;
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for response in responses {
                let Ok(request) = server.recv() else {
                    return;
                };
                if let Err(e) = serve(request, &response, &recorded) {
                    eprintln!("mock server: {e}");
                }
            }
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            requests,
        })
    }

    /// Base URL to point the client at.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn serve(
    mut request: Request,
    response: &MockResponse,
    recorded: &Mutex<Vec<RecordedRequest>>,
) -> io::Result<()> {
    let mut body = Vec::new();
    request.as_reader().read_to_end(&mut body)?;
    recorded
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedRequest {
            method: request.method().to_string(),
            path: request.url().to_string(),
            headers: request
                .headers()
                .iter()
                .map(|h| (h.field.to_string().to_ascii_lowercase(), h.value.to_string()))
                .collect(),
            body,
        });

    let content_type = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .map_err(|()| io::Error::other("invalid Content-Type header"))?;
    request.respond(
        Response::from_string(response.body.as_str())
            .with_status_code(response.status)
            .with_header(content_type),
    )
}
