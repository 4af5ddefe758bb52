use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;
use tempfile::{NamedTempFile, TempPath};

pub fn create_file(contents: &str) -> TempPath {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", contents).unwrap();
    file.into_temp_path()
}

/// Answers one request with `200` headers and `head` at once, then `tail`
/// after `delay`. Returns the server's base url.
pub fn serve_slow_body(head: &'static str, tail: &'static str, delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = vec![];
        let mut buffer = [0; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            match stream.read(&mut buffer) {
                Ok(0) | Err(_) => return,
                Ok(read) => request.extend_from_slice(&buffer[..read]),
            }
        }

        let headers = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n",
            head.len() + tail.len()
        );
        let _ = stream.write_all(headers.as_bytes());
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.flush();
        thread::sleep(delay);
        let _ = stream.write_all(tail.as_bytes());
        let _ = stream.flush();
    });

    format!("http://{}", address)
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct PostIn {
    #[serde(rename = "DummyField")]
    pub dummy_field: String,
}

impl PostIn {
    pub fn new(dummy_field: &str) -> Self {
        PostIn {
            dummy_field: String::from(dummy_field),
        }
    }
}
