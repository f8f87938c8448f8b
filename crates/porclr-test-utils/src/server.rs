//! [`FakePortainer`], a minimal Portainer REST API double.
//!
//! Serves `POST /api/auth`, `GET /api/stacks` and `GET /api/stacks/{id}/file`
//! from a background thread on `127.0.0.1`, one request per connection.
//! Every request is recorded so tests can assert on what was (or was not)
//! fetched.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use serde_json::{Value, json};
use url::Url;

/// A request received by the fake server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    /// Request target up to, not including, any `?`
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
struct FakeStack {
    id: Value,
    name: String,
    content: Option<String>,
}

#[derive(Debug)]
struct State {
    username: String,
    password: String,
    stacks: Vec<FakeStack>,
    requests: Vec<RecordedRequest>,
    auth_override: Option<(u16, String)>,
    stack_list_status: Option<u16>,
}

/// In-process Portainer API double.
///
/// The server shuts down when dropped.
///
/// # Example
///
/// ```rust,no_run
/// use porclr_test_utils::FakePortainer;
///
/// let server = FakePortainer::start();
/// server.add_stack(1, "network-stack", "services: {}\n");
/// let base_url = server.url();
/// ```
pub struct FakePortainer {
    addr: SocketAddr,
    state: Arc<Mutex<State>>,
    shutdown: Arc<AtomicBool>,
}

impl FakePortainer {
    /// Username accepted by [`FakePortainer::start`].
    pub const USERNAME: &'static str = "admin";
    /// Password accepted by [`FakePortainer::start`].
    pub const PASSWORD: &'static str = "correct-horse";
    /// JWT handed out on successful authentication.
    pub const TOKEN: &'static str = "fake-jwt-token";

    /// Start a server accepting the default credentials.
    pub fn start() -> Self {
        Self::with_credentials(Self::USERNAME, Self::PASSWORD)
    }

    /// Start a server accepting only `username`/`password`.
    ///
    /// # Panics
    /// Panics if no local port can be bound.
    pub fn with_credentials(username: &str, password: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .unwrap_or_else(|e| panic!("FakePortainer: failed to bind: {e}"));
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(Mutex::new(State {
            username: username.to_string(),
            password: password.to_string(),
            stacks: Vec::new(),
            requests: Vec::new(),
            auth_override: None,
            stack_list_status: None,
        }));
        let shutdown = Arc::new(AtomicBool::new(false));

        let thread_state = Arc::clone(&state);
        let thread_shutdown = Arc::clone(&shutdown);
        thread::spawn(move || {
            for stream in listener.incoming() {
                if thread_shutdown.load(Ordering::SeqCst) {
                    break;
                }
                if let Ok(stream) = stream {
                    handle_connection(stream, &thread_state);
                }
            }
        });

        Self {
            addr,
            state,
            shutdown,
        }
    }

    /// Base URL including the scheme, e.g. `http://127.0.0.1:41234`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Bare `host:port`, the form operators usually type.
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    /// Register a stack. `id` may be a number or a string.
    pub fn add_stack(&self, id: impl Into<Value>, name: &str, content: &str) {
        self.lock().stacks.push(FakeStack {
            id: id.into(),
            name: name.to_string(),
            content: Some(content.to_string()),
        });
    }

    /// Register a stack whose file endpoint omits `StackFileContent`.
    pub fn add_stack_without_content(&self, id: impl Into<Value>, name: &str) {
        self.lock().stacks.push(FakeStack {
            id: id.into(),
            name: name.to_string(),
            content: None,
        });
    }

    /// Answer every `POST /api/auth` with `status` and a raw `body`.
    pub fn respond_to_auth_with(&self, status: u16, body: &str) {
        self.lock().auth_override = Some((status, body.to_string()));
    }

    /// Make `GET /api/stacks` fail with `status`.
    pub fn fail_stack_list(&self, status: u16) {
        self.lock().stack_list_status = Some(status);
    }

    /// All requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests received for `method` and `path`.
    pub fn count_requests(&self, method: &str, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for FakePortainer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        // Wake the accept loop so it can observe the flag.
        let _ = TcpStream::connect(self.addr);
    }
}

fn handle_connection(stream: TcpStream, state: &Mutex<State>) {
    let Some(request) = read_request(&stream) else {
        return;
    };

    let mut state = state.lock().unwrap_or_else(|e| e.into_inner());
    state.requests.push(request.clone());
    let (status, body) = route(&request, &state);
    drop(state);

    write_response(stream, status, &body);
}

fn read_request(stream: &TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?;
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (target.to_string(), None),
    };

    let mut content_length = 0usize;
    let mut authorization = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.parse().unwrap_or(0),
                "authorization" => authorization = Some(value.to_string()),
                _ => {}
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;

    Some(RecordedRequest {
        method,
        path,
        query,
        authorization,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn route(request: &RecordedRequest, state: &State) -> (u16, String) {
    let segments: Vec<&str> = request
        .path
        .trim_start_matches('/')
        .split('/')
        .collect();

    match (request.method.as_str(), segments.as_slice()) {
        ("POST", ["api", "auth"]) => authenticate(request, state),
        ("GET", ["api", "stacks"]) => {
            if !is_authorized(request) {
                return unauthorized();
            }
            if let Some(status) = state.stack_list_status {
                return (status, error_body("Unable to retrieve stacks"));
            }
            let stacks: Vec<Value> = state
                .stacks
                .iter()
                .map(|s| json!({ "Id": s.id, "Name": s.name, "Type": 2, "EndpointId": 1 }))
                .collect();
            (200, Value::Array(stacks).to_string())
        }
        ("GET", ["api", "stacks", id, "file"]) => {
            if !is_authorized(request) {
                return unauthorized();
            }
            let stack = state.stacks.iter().find(|s| id_matches(&s.id, id));
            match stack {
                Some(FakeStack {
                    content: Some(content),
                    ..
                }) => (200, json!({ "StackFileContent": content }).to_string()),
                Some(_) => (200, json!({}).to_string()),
                None => (404, error_body("Unable to find a stack with the specified identifier")),
            }
        }
        _ => (404, error_body("Not found")),
    }
}

fn authenticate(request: &RecordedRequest, state: &State) -> (u16, String) {
    if let Some((status, body)) = &state.auth_override {
        return (*status, body.clone());
    }

    let payload: Value = serde_json::from_str(&request.body).unwrap_or(Value::Null);
    let username = payload.get("username").and_then(Value::as_str);
    let password = payload.get("password").and_then(Value::as_str);

    if username == Some(state.username.as_str()) && password == Some(state.password.as_str()) {
        (200, json!({ "jwt": FakePortainer::TOKEN }).to_string())
    } else {
        (422, json!({ "message": "Invalid credentials", "details": "Unauthorized" }).to_string())
    }
}

fn is_authorized(request: &RecordedRequest) -> bool {
    request.authorization.as_deref() == Some(format!("Bearer {}", FakePortainer::TOKEN).as_str())
}

fn unauthorized() -> (u16, String) {
    (401, error_body("Unauthorized"))
}

fn error_body(message: &str) -> String {
    json!({ "message": message, "details": message }).to_string()
}

/// Compare a stack id with a raw, still percent-encoded path segment.
fn id_matches(id: &Value, segment: &str) -> bool {
    let id = match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    encode_segment(&id) == segment
}

fn encode_segment(segment: &str) -> String {
    let mut url = Url::parse("http://fake.invalid/").unwrap_or_else(|e| panic!("{e}"));
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().push(segment);
    }
    url.path().trim_start_matches('/').to_string()
}

fn write_response(mut stream: TcpStream, status: u16, body: &str) {
    let reason = match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
