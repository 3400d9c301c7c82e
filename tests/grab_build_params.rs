//! Integration tests for the fetch-and-print flow.
//!
//! These tests use a local HTTP server in place of the Jenkins host and check
//! the exact text written to the output sink.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use grab_build_params::ci_client::CiClient;
use grab_build_params::grab_build_params;

/// Start a minimal HTTP server that answers one request with `status` and
/// `body`. The request line is sent back over the returned channel.
fn spawn_json_server(status: u16, body: &str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind");
    let addr = listener.local_addr().unwrap();
    let url = format!("http://{addr}");
    let (tx, rx) = mpsc::channel();

    let body = body.to_string();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("failed to accept");
        let mut buf = [0u8; 4096];
        let n = stream.read(&mut buf).unwrap_or(0);
        let request = String::from_utf8_lossy(&buf[..n]).to_string();
        let request_line = request.lines().next().unwrap_or("").to_string();
        let _ = tx.send(request_line);

        let response = format!(
            "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();
    });

    (url, rx)
}

fn run(url: &str, build_number: &str, platform: &str) -> (anyhow::Result<()>, String) {
    let client = CiClient::new(url).unwrap();
    let mut out = Vec::new();
    let result = grab_build_params(&client, build_number, platform, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn prints_parameters_between_header_and_footer() {
    let (url, rx) = spawn_json_server(
        200,
        r#"{"actions":[{"parameters":[{"name":"FOO","value":"bar"},{"name":"BAZ","value":"1"}]}]}"#,
    );

    let (result, out) = run(&url, "123", "precise");
    result.unwrap();

    assert_eq!(
        out,
        "# grabbing build env for build # 123 for platform precise\n\
         FOO=bar\n\
         BAZ=1\n\
         # paste the above in your terminal to re-test\n"
    );
    assert_eq!(
        rx.recv().unwrap(),
        "GET /job/gate-nova-matrix/BUILD_TYPE=mini-ha,INSTANCE_IMAGE=jenkins-precise-v2,label=nova/123/api/json HTTP/1.1"
    );
}

#[test]
fn platform_selects_instance_image() {
    let (url, rx) = spawn_json_server(200, r#"{"actions":[{"parameters":[]}]}"#);

    let (result, _) = run(&url, "123", "trusty");
    result.unwrap();

    let request_line = rx.recv().unwrap();
    assert!(
        request_line.contains("/BUILD_TYPE=mini-ha,INSTANCE_IMAGE=jenkins-trusty-v2,label=nova/123/api/json"),
        "got: {request_line}"
    );
}

#[test]
fn empty_parameters_prints_only_header_and_footer() {
    let (url, _rx) = spawn_json_server(200, r#"{"actions":[{"parameters":[]}]}"#);

    let (result, out) = run(&url, "9", "precise");
    result.unwrap();

    assert_eq!(
        out,
        "# grabbing build env for build # 9 for platform precise\n\
         # paste the above in your terminal to re-test\n"
    );
}

#[test]
fn non_string_values_are_rendered_as_json_text() {
    let (url, _rx) = spawn_json_server(
        200,
        r#"{"actions":[{"parameters":[
            {"name":"DEBUG","value":true},
            {"name":"RETRIES","value":3},
            {"name":"EMPTY","value":null}
        ]}]}"#,
    );

    let (result, out) = run(&url, "5", "precise");
    result.unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(&lines[1..4], &["DEBUG=true", "RETRIES=3", "EMPTY="]);
}

#[test]
fn missing_actions_is_fatal() {
    let (url, _rx) = spawn_json_server(200, r#"{"number":123,"result":"SUCCESS"}"#);

    let (result, out) = run(&url, "123", "precise");
    let err = result.unwrap_err();

    assert!(
        format!("{err:#}").contains("actions"),
        "error should name the missing field, got: {err:#}"
    );
    assert_eq!(
        out,
        "# grabbing build env for build # 123 for platform precise\n",
        "only the header may be printed on failure"
    );
}

#[test]
fn empty_actions_is_fatal() {
    let (url, _rx) = spawn_json_server(200, r#"{"actions":[]}"#);

    let (result, out) = run(&url, "123", "precise");
    assert!(result.is_err());
    assert!(!out.contains("# paste the above"));
}

#[test]
fn not_found_is_fatal() {
    let (url, _rx) = spawn_json_server(404, "");

    let (result, out) = run(&url, "999999", "precise");
    let err = result.unwrap_err();

    assert!(err.to_string().contains("Build not found"), "got: {err}");
    assert_eq!(out.lines().count(), 1);
}

#[test]
fn unreachable_server_is_fatal() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let (result, out) = run(&format!("http://127.0.0.1:{port}"), "1", "precise");
    let err = result.unwrap_err();

    assert!(
        err.to_string().contains("failed to connect to CI server"),
        "got: {err}"
    );
    assert!(out.starts_with("# grabbing build env for build # 1"));
}
