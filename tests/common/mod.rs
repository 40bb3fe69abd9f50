//! Shared test utilities: a local HTTP server plus a real blocking
//! transport, so the integration tests exercise the full pipeline over the
//! wire instead of a canned mock.
//!
//! The server implements just the endpoints the suite needs; `/echo/*`
//! reflects the observed request back as JSON so tests can assert on what
//! actually arrived.

use std::io::Read;
use std::thread;

use fetchkit::{Error, Request, Response, Transport};
use once_cell::sync::OnceCell;
use serde_json::json;
use tiny_http::{Header, ListenAddr, Server, StatusCode};

#[derive(Debug)]
pub struct TestServer {
    base: String,
    // Keep the thread alive for the duration of the tests.
    _thread: thread::JoinHandle<()>,
}

/// Base URL of the local test server, with a trailing slash so it can be
/// used directly as a fetcher `base`.
pub fn server_base() -> String {
    format!("{}/", test_server().base)
}

/// Build a full URL against the local test server.
pub fn server_uri(path: &str) -> String {
    format!("{}/{}", test_server().base, path.trim_start_matches('/'))
}

fn test_server() -> &'static TestServer {
    static INSTANCE: OnceCell<TestServer> = OnceCell::new();
    INSTANCE.get_or_init(TestServer::start)
}

impl TestServer {
    fn start() -> Self {
        let server = Server::http("127.0.0.1:0").expect("start test server");
        let addr: ListenAddr = server.server_addr();
        let base = format!("http://{addr}");
        let thread = thread::spawn(move || run_server(&server));

        Self {
            base,
            _thread: thread,
        }
    }
}

fn run_server(server: &Server) {
    for mut request in server.incoming_requests() {
        let response = handle_request(&mut request);
        let _ = request.respond(response);
    }
}

type HttpResponse = tiny_http::Response<std::io::Cursor<Vec<u8>>>;

fn handle_request(request: &mut tiny_http::Request) -> HttpResponse {
    let url = request.url().to_string();
    let (path, query) = url
        .split_once('?')
        .map_or((url.as_str(), ""), |(path, query)| (path, query));

    if path.starts_with("/echo") {
        return echo_response(request, path, query);
    }

    match path {
        "/json" => json_response(StatusCode(200), r#"["apple","bat","cat"]"#),
        "/string" => text_response(StatusCode(200), "some plain text"),
        "/error" => json_response(
            StatusCode(400),
            r#"{"code":"bad_input","message":"that was not ok"}"#,
        ),
        _ => {
            if let Some(code) = path.strip_prefix("/status/") {
                let status = code.parse::<u16>().unwrap_or(400);
                return text_response(StatusCode(status), format!("status {status}"));
            }
            text_response(StatusCode(404), format!("no route for {path}"))
        }
    }
}

/// Reflect the request back as JSON: method, path, query, selected headers,
/// and the raw body text.
fn echo_response(request: &mut tiny_http::Request, path: &str, query: &str) -> HttpResponse {
    let mut headers = serde_json::Map::new();
    for header in request.headers() {
        let name = header.field.to_string().to_ascii_lowercase();
        if name == "content-type" || name == "authorization" || name.starts_with("x-") {
            headers.insert(
                name,
                json!(String::from_utf8_lossy(header.value.as_ref()).into_owned()),
            );
        }
    }

    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);

    let reflected = json!({
        "method": request.method().to_string(),
        "path": path,
        "query": query,
        "headers": headers,
        "body": body,
    });

    json_response(StatusCode(200), reflected.to_string())
}

fn json_response(status: StatusCode, body: impl Into<String>) -> HttpResponse {
    let content_type = Header::from_bytes("Content-Type", "application/json").unwrap();
    tiny_http::Response::from_string(body.into())
        .with_status_code(status)
        .with_header(content_type)
}

fn text_response(status: StatusCode, body: impl Into<String>) -> HttpResponse {
    tiny_http::Response::from_string(body.into()).with_status_code(status)
}

/// A real transport for the integration tests: a blocking ureq agent with
/// status-as-error disabled, so non-2xx responses come back as data and the
/// fetcher's own resolution rules are what gets tested.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    fn round_trip(&self, request: Request) -> Result<Response, Error> {
        let url = request.url.clone();
        let body = request.body.clone().into_bytes();

        let outcome = match request.method.as_str() {
            "GET" => apply_headers(self.agent.get(&url), &request).call(),
            "DELETE" => apply_headers(self.agent.delete(&url), &request).call(),
            "POST" => apply_headers(self.agent.post(&url), &request).send(&body[..]),
            "PUT" => apply_headers(self.agent.put(&url), &request).send(&body[..]),
            "PATCH" => apply_headers(self.agent.patch(&url), &request).send(&body[..]),
            other => panic!("test transport does not dispatch {other}"),
        };

        let mut response = outcome.map_err(Error::transport)?;
        let status = response.status();
        let headers = response.headers().clone();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(Error::transport)?;

        Ok(Response {
            status,
            headers,
            body: text.into_bytes(),
            reason: None,
        })
    }
}

fn apply_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    request: &Request,
) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.to_str().expect("ascii header"));
    }
    builder
}

impl Transport for UreqTransport {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response, Error>> + Send {
        let outcome = self.round_trip(request);
        async move { outcome }
    }
}
