//! Imports whose token is a URL: fetched over HTTP from a local server.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};

use import_trust::token::MAX_TOKEN_BYTES;
use import_trust::{
    AccountKeyPair, ActivationBuilder, HttpFetcher, Import, ImportType, Resolution, TokenResolver,
    ValidationResults,
};

/// Serve a single HTTP response on an ephemeral port and return its URL.
fn serve_once(status: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes());
    });

    format!("http://{addr}/activation.jwt")
}

fn resolver() -> TokenResolver {
    TokenResolver::new(HttpFetcher::with_timeout(Duration::from_secs(2)))
}

#[test]
fn url_token_is_fetched_and_validated() {
    let exporter = AccountKeyPair::generate();
    let importer = AccountKeyPair::generate();
    let token = ActivationBuilder::new(importer.account_id())
        .subject("orders.>")
        .import_type(ImportType::Stream)
        .sign(&exporter)
        .unwrap();

    // Trailing newline as a static file server would add.
    let url = serve_once("200 OK", format!("{token}\n"));
    let import = Import::stream("orders.eu", exporter.account_id()).with_token(url);

    let mut vr = ValidationResults::new();
    import.validate_with(Some(&importer.account_id()), &resolver(), &mut vr);
    assert!(vr.is_empty(), "unexpected issues:\n{vr}");
}

#[test]
fn url_token_for_wrong_recipient_blocks() {
    let exporter = AccountKeyPair::generate();
    let importer = AccountKeyPair::generate();
    let token = ActivationBuilder::new(AccountKeyPair::generate().account_id())
        .subject("orders.>")
        .import_type(ImportType::Stream)
        .sign(&exporter)
        .unwrap();

    let url = serve_once("200 OK", token);
    let import = Import::stream("orders.eu", exporter.account_id()).with_token(url);

    let mut vr = ValidationResults::new();
    import.validate_with(Some(&importer.account_id()), &resolver(), &mut vr);
    assert!(vr.is_blocking(false));
}

#[test]
fn url_serving_garbage_warns() {
    let url = serve_once("200 OK", "<html>not a token</html>".to_string());
    let import = Import::stream("orders.eu", AccountKeyPair::generate().account_id())
        .with_token(url);

    let mut vr = ValidationResults::new();
    import.validate_with(
        Some(&AccountKeyPair::generate().account_id()),
        &resolver(),
        &mut vr,
    );
    assert_eq!(vr.len(), 1);
    assert!(!vr.is_blocking(true));
}

#[test]
fn url_error_status_warns() {
    let url = serve_once("400 Bad Request", "nope".to_string());
    match resolver().resolve(&url) {
        Resolution::Failed(reason) => assert!(reason.contains("400"), "reason: {reason}"),
        other => panic!("expected failure, got {other:?}"),
    }

    let url = serve_once("400 Bad Request", "nope".to_string());
    let import = Import::service("jobs.run", AccountKeyPair::generate().account_id())
        .with_token(url);
    let mut vr = ValidationResults::new();
    import.validate_with(None, &resolver(), &mut vr);
    assert_eq!(vr.len(), 1);
    assert!(!vr.is_blocking(true));
}

#[test]
fn url_oversized_body_is_rejected() {
    let url = serve_once("200 OK", "a".repeat(MAX_TOKEN_BYTES + 10));
    assert!(matches!(resolver().resolve(&url), Resolution::Failed(_)));
}

#[test]
fn hanging_endpoint_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        // Accept and hold the connection without ever answering.
        if let Ok((_stream, _)) = listener.accept() {
            thread::sleep(Duration::from_secs(5));
        }
    });

    let resolver = TokenResolver::new(HttpFetcher::with_timeout(Duration::from_millis(300)));
    let started = Instant::now();
    let resolution = resolver.resolve(&format!("http://{addr}/slow.jwt"));
    let elapsed = started.elapsed();

    assert!(
        matches!(resolution, Resolution::Failed(_)),
        "expected failure, got {resolution:?}"
    );
    assert!(elapsed < Duration::from_secs(3), "took {elapsed:?}");

    let import = Import::stream("orders.eu", AccountKeyPair::generate().account_id())
        .with_token(format!("http://{addr}/slow.jwt"));
    let mut vr = ValidationResults::new();
    import.validate_with(None, &resolver, &mut vr);
    assert_eq!(vr.len(), 1);
    assert!(!vr.is_blocking(true));
}

#[test]
fn unreachable_url_warns() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let import = Import::stream("orders.eu", AccountKeyPair::generate().account_id())
        .with_token(format!("http://{addr}/gone"));
    let mut vr = ValidationResults::new();
    import.validate_with(None, &resolver(), &mut vr);
    assert_eq!(vr.len(), 1);
    assert!(!vr.is_blocking(true));
}

#[test]
fn malformed_url_warns_without_fetching() {
    for token in ["ftp://example.com/token", "http://[::1"] {
        let import = Import::stream("orders.eu", AccountKeyPair::generate().account_id())
            .with_token(token);
        let mut vr = ValidationResults::new();
        import.validate_with(None, &resolver(), &mut vr);
        assert_eq!(vr.len(), 1, "token {token}: {vr}");
        assert!(!vr.is_blocking(true));
    }
}
