//! Tests de integración para el servidor HTTP
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en un puerto efímero y le habla
//! con clientes TCP crudos.

use adhoc_http::config::Config;
use adhoc_http::server::Server;
use std::fs;
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Helper: levanta un servidor en 127.0.0.1:0 y retorna su dirección
fn start_server(directory: Option<PathBuf>) -> SocketAddr {
    let mut config = Config::default();
    config.host = "127.0.0.1".to_string();
    config.port = 0;
    config.directory = directory;

    let mut server = Server::new(config);
    let addr = server.bind().expect("bind");

    thread::spawn(move || {
        server.run().expect("run");
    });

    addr
}

/// Helper: envía bytes crudos y retorna la response completa
fn send_raw(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.set_write_timeout(Some(Duration::from_secs(5))).unwrap();

    stream.write_all(raw).unwrap();
    stream.flush().unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).expect("read response");
    response
}

fn send_request(addr: SocketAddr, path: &str, headers: &[(&str, &str)]) -> String {
    let mut request = format!("GET {} HTTP/1.1\r\nHost: localhost\r\n", path);
    for (name, value) in headers {
        request.push_str(&format!("{}: {}\r\n", name, value));
    }
    request.push_str("\r\n");

    String::from_utf8(send_raw(addr, request.as_bytes())).expect("utf-8 response")
}

/// Helper: separa la response en (cabecera, body)
fn split_response(response: &str) -> (&str, &str) {
    response.split_once("\r\n\r\n").expect("header terminator")
}

fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|l| l.strip_prefix("Content-Length: "))
        .expect("Content-Length header")
        .parse()
        .unwrap()
}

/// Directorio temporal único por test
fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("adhoc_http_it_{}_{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_root_endpoint() {
    let addr = start_server(None);
    let response = send_request(addr, "/", &[]);

    let (head, body) = split_response(&response);
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"), "got: {}", response);
    assert_eq!(content_length(head), 0);
    assert!(body.is_empty());
}

#[test]
fn test_echo_endpoint() {
    let addr = start_server(None);

    for text in ["abc", "hello%20world", "a/b", "x"] {
        let response = send_request(addr, &format!("/echo/{}", text), &[]);
        let (head, body) = split_response(&response);

        assert!(head.starts_with("HTTP/1.1 200 OK"));
        assert!(head.contains("Content-Type: text/plain"));
        assert_eq!(body, text);
        assert_eq!(content_length(head), text.len());
    }
}

#[test]
fn test_echo_returns_raw_path_bytes() {
    let addr = start_server(None);
    let response = send_raw(addr, b"GET /echo/\xff\xfe HTTP/1.1\r\nUser-Agent: caf\xe9\r\n\r\n");

    assert!(response.starts_with(b"HTTP/1.1 200 OK\r\n"));
    assert!(response.windows(19).any(|w| w == b"Content-Length: 2\r\n"));
    assert!(response.ends_with(b"Connection: close\r\n\r\n\xff\xfe"));
}

#[test]
fn test_request_with_unread_body_gets_full_response() {
    let addr = start_server(None);
    let mut raw = b"POST /echo/done HTTP/1.1\r\nContent-Length: 50000\r\n\r\n".to_vec();
    raw.extend(std::iter::repeat(b'b').take(50000));

    let response = String::from_utf8(send_raw(addr, &raw)).expect("utf-8 response");
    let (head, body) = split_response(&response);

    assert!(head.starts_with("HTTP/1.1 200 OK"));
    assert_eq!(body, "done");
}

#[test]
fn test_user_agent_endpoint() {
    let addr = start_server(None);

    let response = send_request(addr, "/user-agent", &[("User-Agent", "foobar/1.2.3")]);
    let (_, body) = split_response(&response);
    assert_eq!(body, "foobar/1.2.3");

    let response = send_request(addr, "/user-agent", &[]);
    let (head, body) = split_response(&response);
    assert!(head.starts_with("HTTP/1.1 200 OK"));
    assert!(body.is_empty());
}

#[test]
fn test_not_found() {
    let addr = start_server(None);
    let response = send_request(addr, "/does-not-exist", &[]);

    let (head, body) = split_response(&response);
    assert!(head.starts_with("HTTP/1.1 404 Not Found"));
    assert!(body.is_empty());
}

#[test]
fn test_every_response_identifies_server() {
    let addr = start_server(None);

    for path in ["/", "/echo/x", "/user-agent", "/files/x", "/missing"] {
        let response = send_request(addr, path, &[]);
        assert!(response.contains("\r\nServer: adhoc-http/"), "{}: {}", path, response);
    }
}

#[test]
fn test_files_endpoint() {
    let dir = temp_dir("files");
    let data: Vec<u8> = (0..=255u8).rev().collect();
    fs::write(dir.join("blob.bin"), &data).unwrap();

    let addr = start_server(Some(dir.clone()));

    let response = send_raw(addr, b"GET /files/blob.bin HTTP/1.1\r\n\r\n");
    let split = response.windows(4).position(|w| w == b"\r\n\r\n").unwrap();
    let head = String::from_utf8(response[..split].to_vec()).unwrap();
    let body = &response[split + 4..];

    assert!(head.starts_with("HTTP/1.1 200 OK"));
    assert!(head.contains("Content-Type: application/octet-stream"));
    assert_eq!(content_length(&head), data.len());
    assert_eq!(body, &data[..]);

    let response = send_request(addr, "/files/non_existent_file", &[]);
    assert!(response.starts_with("HTTP/1.1 404 Not Found"));

    let response = send_request(addr, "/files/../../etc/passwd", &[]);
    assert!(response.starts_with("HTTP/1.1 404 Not Found"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_files_disabled_without_directory() {
    let addr = start_server(None);
    let response = send_request(addr, "/files/anything", &[]);
    assert!(response.starts_with("HTTP/1.1 404 Not Found"));
}

#[test]
fn test_malformed_start_line_is_400() {
    let addr = start_server(None);

    let response = String::from_utf8(send_raw(addr, b"GET /\r\n\r\n")).unwrap();
    assert!(response.starts_with("HTTP/1.1 400 Bad Request"));

    // El servidor sigue vivo después del error
    let response = send_request(addr, "/", &[]);
    assert!(response.starts_with("HTTP/1.1 200 OK"));
}

#[test]
fn test_truncated_request_gets_no_response() {
    let addr = start_server(None);

    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.write_all(b"GET / HTTP/1.1\r\nHost: x\r\n").unwrap();
    stream.shutdown(Shutdown::Write).unwrap();

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).unwrap();
    assert!(buf.is_empty());
}

#[test]
fn test_slow_clients_do_not_block_others() {
    let addr = start_server(None);

    // Dos clientes que mandan media request y se quedan callados
    let mut slow = Vec::new();
    for _ in 0..2 {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(b"GET /echo/slow HTTP/1.1\r\nHost: ").unwrap();
        slow.push(stream);
    }

    // Un tercer cliente tiene que recibir su respuesta igual
    let response = send_request(addr, "/echo/fast", &[]);
    let (head, body) = split_response(&response);
    assert!(head.starts_with("HTTP/1.1 200 OK"));
    assert_eq!(body, "fast");

    // Los lentos terminan su request y también reciben respuesta
    for mut stream in slow {
        stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        stream.write_all(b"localhost\r\n\r\n").unwrap();

        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().ends_with("\r\n\r\nslow"));
    }
}

#[test]
fn test_multiple_requests_sequentially() {
    let addr = start_server(None);

    for i in 0..5 {
        let response = send_request(addr, &format!("/echo/{}", i), &[]);
        let (_, body) = split_response(&response);
        assert_eq!(body, i.to_string(), "Request {} failed", i);
    }
}
