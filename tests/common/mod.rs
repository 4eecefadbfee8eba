#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

/// Minimal AnkiConnect stand-in. Answers one connection per canned
/// response, in order, and hands back the JSON bodies it received.
pub struct StubServer {
    pub url: String,
    handle: JoinHandle<Vec<serde_json::Value>>,
}

impl StubServer {
    pub fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
        let url = format!("http://{}", listener.local_addr().expect("addr"));
        let handle = thread::spawn(move || {
            let mut bodies = Vec::new();
            for (status, body) in responses {
                let (stream, _) = listener.accept().expect("accept");
                bodies.push(handle_one(stream, status, &body));
            }
            bodies
        });
        StubServer { url, handle }
    }

    /// Shorthand for a 200 reply with the given result and null error.
    pub fn ok(result: serde_json::Value) -> (u16, String) {
        (200, serde_json::json!({ "result": result, "error": null }).to_string())
    }

    pub fn api_error(msg: &str) -> (u16, String) {
        (200, serde_json::json!({ "result": null, "error": msg }).to_string())
    }

    pub fn requests(self) -> Vec<serde_json::Value> {
        self.handle.join().expect("stub thread")
    }
}

fn handle_one(stream: TcpStream, status: u16, body: &str) -> serde_json::Value {
    let mut reader = BufReader::new(stream.try_clone().expect("clone"));
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("read header");
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().expect("content-length");
            }
        }
    }
    let mut buf = vec![0u8; content_length];
    reader.read_exact(&mut buf).expect("read body");

    let reason = if status == 200 { "OK" } else { "Internal Server Error" };
    let reply = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let mut stream = stream;
    stream.write_all(reply.as_bytes()).expect("write reply");
    stream.flush().ok();

    serde_json::from_slice(&buf).unwrap_or(serde_json::Value::Null)
}

/// An address nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}
