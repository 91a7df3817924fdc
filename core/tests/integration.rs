//! Live exchanges against the mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the executor and
//! the `Fetcher` surface over real HTTP: header pass-through, body echo,
//! status passthrough, refused connections, and timeout expiry.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use fetch_core::{execute, FetchError, Fetcher, RequestSpec};

/// Start the mock server on an ephemeral port and return its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn get_returns_status_body_and_headers_unchanged() {
    let addr = start_server();

    let spec = RequestSpec::get(&format!("http://{addr}/ping"), HashMap::new(), 5.0);
    let response = execute(&spec).unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"pong");
    assert_eq!(response.headers.get("x-mock-server").map(String::as_str), Some("1"));
}

#[test]
fn request_headers_are_applied_verbatim() {
    let addr = start_server();

    let mut headers = HashMap::new();
    headers.insert("x-custom-token".to_string(), "AbC-123".to_string());
    let spec = RequestSpec::get(&format!("http://{addr}/headers"), headers, 5.0);
    let response = execute(&spec).unwrap();

    assert_eq!(response.status, 200);
    let seen: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(seen["x-custom-token"], "AbC-123");
}

#[test]
fn post_echoes_the_payload_with_json_content_type() {
    let addr = start_server();

    let payload = br#"{"hello":"world","n":7}"#.to_vec();
    let spec = RequestSpec::post(
        &format!("http://{addr}/echo"),
        payload.clone(),
        HashMap::new(),
        5.0,
    );
    let response = execute(&spec).unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, payload);
    // The server reports the content type it actually received.
    assert_eq!(
        response.headers.get("x-received-content-type").map(String::as_str),
        Some("application/json")
    );
}

#[test]
fn non_success_statuses_are_data_not_errors() {
    let addr = start_server();

    for code in [404u16, 500] {
        let spec = RequestSpec::get(&format!("http://{addr}/status/{code}"), HashMap::new(), 5.0);
        let response = execute(&spec).unwrap();
        assert_eq!(response.status, code);
    }
}

#[test]
fn connection_refused_is_a_transport_error() {
    // Bind and immediately drop to find a port with no listener.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let spec = RequestSpec::get(&format!("http://127.0.0.1:{port}/"), HashMap::new(), 2.0);
    assert!(matches!(execute(&spec), Err(FetchError::Transport(_))));
}

#[test]
fn timeout_expiry_surfaces_as_transport_error() {
    let addr = start_server();

    let spec = RequestSpec::get(&format!("http://{addr}/slow"), HashMap::new(), 0.5);
    let started = Instant::now();
    let result = execute(&spec);
    let elapsed = started.elapsed();

    assert!(matches!(result, Err(FetchError::Transport(_))));
    // The handler would take 5 s; expiry must cut the call well short.
    assert!(elapsed < Duration::from_secs(4), "took {elapsed:?}");
}

#[test]
fn fetcher_resolves_through_blocking_wait() {
    let addr = start_server();

    let fetcher = Fetcher::new();
    let response = fetcher
        .get(&format!("http://{addr}/ping"), HashMap::new(), 5.0)
        .wait()
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"pong");
}

#[tokio::test]
async fn fetcher_resolves_through_async_join() {
    let addr = start_server();

    let fetcher = Fetcher::new();
    let payload = b"[1,2,3]".to_vec();
    let response = fetcher
        .post(
            &format!("http://{addr}/echo"),
            payload.clone(),
            HashMap::new(),
            5.0,
        )
        .join()
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, payload);
}

#[test]
fn concurrent_requests_are_independent() {
    let addr = start_server();

    let fetcher = Fetcher::new();
    let handles: Vec<_> = (0..4)
        .map(|_| fetcher.get(&format!("http://{addr}/ping"), HashMap::new(), 5.0))
        .collect();
    for handle in handles {
        assert_eq!(handle.wait().unwrap().status, 200);
    }
}
