//! Tests for the HTTP report dispatcher
//!
//! A one-shot HTTP server on a loopback socket stands in for the mailing
//! endpoint. These tests verify:
//! - The posted body uses the backend's field names
//! - 2xx JSON responses are acknowledgements
//! - Rejections surface the server's error message
//! - Transport failures are reported, not panicked on

use maxterra_savings::catalog::Catalog;
use maxterra_savings::dispatch::{
    DEFAULT_FAILURE_MESSAGE, DispatchError, HttpDispatcher, RETRY_NOTICE, ReportDispatcher,
    ReportRecord,
};
use maxterra_savings::engine::{ProjectSelection, compute_savings};
use maxterra_savings::types::{BuildingType, ProjectCategory};
use maxterra_savings::wizard::ContactRecord;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Serve one request with the given status line and body; return the request body.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/api/send-report-email", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);

        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).unwrap();

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        String::from_utf8(request_body).unwrap()
    });
    (url, handle)
}

fn record() -> ReportRecord {
    let selection = ProjectSelection::new(ProjectCategory::FullSubfloor, 10_000.0)
        .with_building_type(BuildingType::MultiFamily)
        .with_comparator("exacor");
    let result = compute_savings(&selection, &Catalog::standard()).unwrap();
    let contact = ContactRecord {
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        email: "grace@example.com".into(),
    };
    ReportRecord::new(&contact, selection.building_type, &result)
}

fn dispatcher(url: &str) -> HttpDispatcher {
    HttpDispatcher::new(url, Duration::from_secs(5)).unwrap()
}

#[test]
fn test_success_returns_acknowledgement() {
    let (url, server) = serve_once("200 OK", r#"{"message":"Email sent successfully"}"#);
    let ack = dispatcher(&url).send_report(&record()).unwrap();
    assert_eq!(ack.0["message"], "Email sent successfully");

    let posted: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
    assert_eq!(posted["First Name"], "Grace");
    assert_eq!(posted["Building Type"], "Multi-family Residential");
    assert_eq!(posted["Project Type"], "Entire Subfloor System");
    assert_eq!(posted["Savings Amount ($)"], 13700);
    assert_eq!(posted["Current System Cost ($)"], 43200);
    assert_eq!(posted["MAXTERRA System Cost ($)"], 29500);
    assert_eq!(posted["Competitor"], "EXACOR");
    assert_eq!(posted["Project Size (sq ft)"], 10000);
    assert!(posted["Project Size (sq ft)"].is_u64());
}

#[test]
fn test_rejection_carries_server_message() {
    let (url, server) = serve_once("400 Bad Request", r#"{"error":"Missing required fields"}"#);
    let err = dispatcher(&url).send_report(&record()).unwrap_err();
    server.join().unwrap();

    assert_eq!(
        err,
        DispatchError::Rejected {
            status: 400,
            message: "Missing required fields".into()
        }
    );
    assert_eq!(err.user_message(), RETRY_NOTICE);
}

#[test]
fn test_rejection_without_error_body_uses_default_message() {
    let (url, server) = serve_once("500 Internal Server Error", "oops");
    let err = dispatcher(&url).send_report(&record()).unwrap_err();
    server.join().unwrap();

    assert_eq!(
        err,
        DispatchError::Rejected {
            status: 500,
            message: DEFAULT_FAILURE_MESSAGE.into()
        }
    );
}

#[test]
fn test_success_with_non_json_body_is_invalid() {
    let (url, server) = serve_once("200 OK", "sent!");
    let err = dispatcher(&url).send_report(&record()).unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, DispatchError::InvalidResponse(_)));
}

#[test]
fn test_unreachable_endpoint_is_transport_error() {
    // Bind then drop to get a port with nothing listening
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let url = format!("http://127.0.0.1:{}/api/send-report-email", port);

    let err = dispatcher(&url).send_report(&record()).unwrap_err();
    assert!(matches!(err, DispatchError::Transport(_)));
    assert!(err.user_message().contains("try again"));
}
