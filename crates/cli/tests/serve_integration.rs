//! Integration tests for the `sustainiq serve` HTTP API.
//!
//! Each test starts the server as a child process on a unique port with its
//! own store file, makes HTTP requests, and verifies the responses.

use std::io::Read;
use std::net::TcpStream;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use tempfile::TempDir;

/// Atomic port counter to avoid port conflicts between parallel tests.
/// Base port is derived from process ID so separate test binaries don't
/// collide on the same port range.
static NEXT_PORT: AtomicU16 = AtomicU16::new(0);
static PORT_INIT: std::sync::Once = std::sync::Once::new();

fn next_port() -> u16 {
    PORT_INIT.call_once(|| {
        let base = 20000 + (std::process::id() as u16 % 20000);
        NEXT_PORT.store(base, Ordering::SeqCst);
    });
    NEXT_PORT.fetch_add(1, Ordering::SeqCst)
}

/// Kills the server when a test finishes, even on assertion failure.
struct Server(Child);

impl Drop for Server {
    fn drop(&mut self) {
        self.0.kill().ok();
        self.0.wait().ok();
    }
}

fn wait_for_port(port: u16) {
    for _ in 0..50 {
        if TcpStream::connect(format!("127.0.0.1:{}", port)).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(100));
    }
}

/// Helper: start `sustainiq serve` on the given port, storing to `db`.
fn start_server(port: u16, db: &Path) -> Server {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sustainiq"));
    cmd.arg("serve")
        .arg("--port")
        .arg(port.to_string())
        .arg("--db")
        .arg(db);
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::null());

    let child = cmd.spawn().expect("failed to start sustainiq serve");
    wait_for_port(port);
    Server(child)
}

/// Helper: send a raw HTTP request and return (status, headers, body).
fn http_request(port: u16, request: &str) -> (u16, String, String) {
    let mut stream = TcpStream::connect(format!("127.0.0.1:{}", port)).expect("failed to connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(10)))
        .unwrap();
    std::io::Write::write_all(&mut stream, request.as_bytes()).expect("failed to write");

    let mut response = String::new();
    let _ = stream.read_to_string(&mut response);

    parse_http_response(&response)
}

fn http_get(port: u16, path: &str) -> (u16, String) {
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: localhost:{}\r\nConnection: close\r\n\r\n",
        path, port
    );
    let (status, _, body) = http_request(port, &request);
    (status, body)
}

fn http_post(port: u16, path: &str, body: &str) -> (u16, String) {
    let request = format!(
        "POST {} HTTP/1.1\r\nHost: localhost:{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        path, port, body.len(), body
    );
    let (status, _, body) = http_request(port, &request);
    (status, body)
}

/// Parse an HTTP response into (status_code, headers, body).
fn parse_http_response(response: &str) -> (u16, String, String) {
    let (headers, body) = response.split_once("\r\n\r\n").unwrap_or((response, ""));

    let status = headers
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(0);

    let body = if headers.to_lowercase().contains("transfer-encoding: chunked") {
        decode_chunked(body)
    } else {
        body.to_string()
    };

    (status, headers.to_string(), body)
}

/// Decode chunked transfer encoding.
fn decode_chunked(mut remaining: &str) -> String {
    let mut result = String::new();
    while let Some(line_end) = remaining.find("\r\n") {
        let Ok(size) = usize::from_str_radix(remaining[..line_end].trim(), 16) else {
            break;
        };
        if size == 0 {
            break;
        }
        let start = line_end + 2;
        let end = (start + size).min(remaining.len());
        result.push_str(&remaining[start..end]);
        remaining = remaining.get(end + 2..).unwrap_or("");
    }
    result
}

fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("invalid JSON ({e}): {body}"))
}

#[test]
fn health_reports_service() {
    let dir = TempDir::new().unwrap();
    let port = next_port();
    let _server = start_server(port, &dir.path().join("db.json"));

    let (status, body) = http_get(port, "/api/health");
    assert_eq!(status, 200);
    let health = json(&body);
    assert_eq!(health["ok"], true);
    assert_eq!(health["service"], "SustainIQ");
    assert!(health["time"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn snapshot_returns_scored_result() {
    let dir = TempDir::new().unwrap();
    let port = next_port();
    let _server = start_server(port, &dir.path().join("db.json"));

    let payload = r#"{"industry":"Retail","companySize":"51–200","trackMetrics":"Somewhat","challenge":"Compliance / reporting"}"#;
    let (status, body) = http_post(port, "/api/snapshot", payload);
    assert_eq!(status, 200, "body: {body}");

    let result = json(&body);
    assert_eq!(result["score"], 55);
    assert_eq!(result["stage"], 2);
    assert_eq!(result["title"], "Build Momentum");
    assert_eq!(
        result["engagement"],
        "ESG Ops Pack (data workflows + KPI tracking + review cadence)."
    );
    assert_eq!(result["nextSteps"].as_array().unwrap().len(), 4);
}

#[test]
fn missing_company_size_is_rejected() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("db.json");
    let port = next_port();
    let _server = start_server(port, &db);

    let payload = r#"{"trackMetrics":"Yes","challenge":"Data collection"}"#;
    let (status, body) = http_post(port, "/api/snapshot", payload);
    assert_eq!(status, 400);

    let error = json(&body);
    assert_eq!(error["error"], "Missing required fields");
    assert_eq!(error["missing"], serde_json::json!(["companySize"]));
    assert!(!db.exists(), "rejected submissions must not be recorded");
}

#[test]
fn empty_body_reports_every_required_field() {
    let dir = TempDir::new().unwrap();
    let port = next_port();
    let _server = start_server(port, &dir.path().join("db.json"));

    let (status, body) = http_post(port, "/api/snapshot", "");
    assert_eq!(status, 400);
    assert_eq!(
        json(&body)["missing"],
        serde_json::json!(["companySize", "trackMetrics", "challenge"])
    );
}

#[test]
fn malformed_json_is_a_bad_request() {
    let dir = TempDir::new().unwrap();
    let port = next_port();
    let _server = start_server(port, &dir.path().join("db.json"));

    let (status, body) = http_post(port, "/api/snapshot", "{\"companySize\":");
    assert_eq!(status, 400);
    assert!(json(&body)["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid JSON body"));
}

#[test]
fn history_is_newest_first_and_persisted() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("db.json");
    let port = next_port();
    let _server = start_server(port, &db);

    let first = r#"{"companySize":"1–50","trackMetrics":"No","challenge":"Cost / operations"}"#;
    let second = r#"{"companySize":"201+","trackMetrics":"Yes","challenge":"Targets / strategy","utm":"ad"}"#;
    assert_eq!(http_post(port, "/api/snapshot", first).0, 200);
    std::thread::sleep(Duration::from_millis(5));
    assert_eq!(http_post(port, "/api/snapshot", second).0, 200);

    let (status, body) = http_get(port, "/api/snapshots");
    assert_eq!(status, 200);
    let history = json(&body);
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["result"]["score"], 75);
    assert_eq!(entries[0]["input"]["utm"], "ad");
    assert_eq!(entries[1]["result"]["score"], 30);
    assert!(entries[0]["id"].as_str().unwrap().parse::<u64>().is_ok());
    assert!(entries[0]["createdAt"].is_string());

    let on_disk = std::fs::read_to_string(&db).unwrap();
    assert!(on_disk.starts_with("{\n  \"submissions\": ["));
    assert_eq!(json(&on_disk)["submissions"], history);
}

#[test]
fn corrupt_store_is_served_as_empty() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("db.json");
    std::fs::write(&db, "this is not json").unwrap();
    let port = next_port();
    let _server = start_server(port, &db);

    let (status, body) = http_get(port, "/api/snapshots");
    assert_eq!(status, 200);
    assert_eq!(json(&body), serde_json::json!([]));
}

#[test]
fn non_json_content_type_is_not_parsed() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("db.json");
    let port = next_port();
    let _server = start_server(port, &db);

    let body = r#"{"companySize":"1–50","trackMetrics":"No","challenge":"Cost / operations"}"#;
    let request = format!(
        "POST /api/snapshot HTTP/1.1\r\nHost: localhost:{}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        port,
        body.len(),
        body
    );
    let (status, _, response) = http_request(port, &request);
    assert_eq!(status, 400);
    assert_eq!(
        json(&response)["missing"],
        serde_json::json!(["companySize", "trackMetrics", "challenge"])
    );
    assert!(!db.exists(), "rejected submissions must not be recorded");
}

#[test]
fn foreign_entries_survive_a_new_submission() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("db.json");
    let foreign = serde_json::json!({
        "id": "1700000000000",
        "createdAt": "2023-11-14T22:13:20.000Z",
        "input": { "companySize": "1–50" },
        "result": { "score": 30, "stage": 1 },
    });
    let seeded = serde_json::json!({ "submissions": [foreign.clone()] });
    std::fs::write(&db, serde_json::to_string_pretty(&seeded).unwrap()).unwrap();
    let port = next_port();
    let _server = start_server(port, &db);

    let body = r#"{"companySize":"51–200","trackMetrics":"Somewhat","challenge":"Data collection"}"#;
    assert_eq!(http_post(port, "/api/snapshot", body).0, 200);

    let (status, listed) = http_get(port, "/api/snapshots");
    assert_eq!(status, 200);
    let history = json(&listed);
    assert_eq!(history.as_array().unwrap().len(), 2);
    assert_eq!(history[1], foreign);
    assert_eq!(json(&std::fs::read_to_string(&db).unwrap())["submissions"], history);
}

#[test]
fn unknown_route_is_json_404() {
    let dir = TempDir::new().unwrap();
    let port = next_port();
    let _server = start_server(port, &dir.path().join("db.json"));

    let (status, body) = http_get(port, "/api/unknown");
    assert_eq!(status, 404);
    assert_eq!(json(&body)["error"], "not found");
}

#[test]
fn cors_preflight_is_allowed() {
    let dir = TempDir::new().unwrap();
    let port = next_port();
    let _server = start_server(port, &dir.path().join("db.json"));

    let request = format!(
        "OPTIONS /api/snapshot HTTP/1.1\r\nHost: localhost:{}\r\nOrigin: http://example.com\r\nAccess-Control-Request-Method: POST\r\nAccess-Control-Request-Headers: content-type\r\nConnection: close\r\n\r\n",
        port
    );
    let (status, headers, _) = http_request(port, &request);
    assert_eq!(status, 200);
    assert!(headers
        .to_lowercase()
        .contains("access-control-allow-origin: *"));
}

#[test]
fn port_falls_back_to_environment() {
    let dir = TempDir::new().unwrap();
    let port = next_port();

    let child = Command::new(env!("CARGO_BIN_EXE_sustainiq"))
        .arg("serve")
        .arg("--db")
        .arg(dir.path().join("db.json"))
        .env("PORT", port.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start sustainiq serve");
    let _server = Server(child);
    wait_for_port(port);

    let (status, _) = http_get(port, "/api/health");
    assert_eq!(status, 200);
}
