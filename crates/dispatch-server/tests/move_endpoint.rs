//! Drives the real TCP server with an HTTP client.

use std::net::SocketAddr;
use std::sync::Arc;

use dispatch_runtime::Dispatcher;
use dispatch_server::{DispatchServer, MOVE_PATH, MoveHandler};
use dispatch_source::StaticRobotSource;
use dispatch_types::{Point, Robot};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

async fn spawn(source: StaticRobotSource) -> SocketAddr {
    let server = DispatchServer::new(MoveHandler::new(Dispatcher::new(Arc::new(source))))
        .with_port(0);
    let listener = server.bind().await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    tokio::spawn(server.serve(listener));
    SocketAddr::from(([127, 0, 0, 1], port))
}

fn scenario() -> StaticRobotSource {
    StaticRobotSource::new(vec![
        Robot::new("A", 50, Point::new(0.0, 3.0)),
        Robot::new("B", 90, Point::new(0.0, 4.0)),
    ])
}

fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{addr}{path}")
}

#[tokio::test]
async fn post_selects_highest_battery_in_range() {
    let addr = spawn(scenario()).await;
    let resp = reqwest::Client::new()
        .post(url(addr, MOVE_PATH))
        .json(&json!({"loadId": "231", "x": 0, "y": 0, "withinDistance": 5}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["robotId"], "B");
    assert_eq!(body["loadId"], "231");
}

#[tokio::test]
async fn post_with_tight_threshold_picks_closest() {
    let addr = spawn(scenario()).await;
    let resp = reqwest::Client::new()
        .post(url(addr, MOVE_PATH))
        .json(&json!({"loadId": "231", "x": 0, "y": 0, "withinDistance": 3.5}))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["robotId"], "A");
}

#[tokio::test]
async fn no_robot_in_range_is_no_content() {
    let addr = spawn(scenario()).await;
    let resp = reqwest::Client::new()
        .post(url(addr, MOVE_PATH))
        .json(&json!({"loadId": "231", "x": 0, "y": 0, "withinDistance": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 204);
    assert!(resp.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_parameters_is_bad_request() {
    let addr = spawn(scenario()).await;
    let resp = reqwest::Client::new()
        .post(url(addr, MOVE_PATH))
        .json(&json!({"x": 0, "y": 0}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
}

#[tokio::test]
async fn get_is_method_not_allowed() {
    let addr = spawn(scenario()).await;
    let resp = reqwest::get(url(addr, MOVE_PATH)).await.unwrap();
    assert_eq!(resp.status().as_u16(), 405);
    assert_eq!(resp.headers()["allow"], "POST");
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let addr = spawn(scenario()).await;
    let resp = reqwest::Client::new()
        .post(url(addr, "/v2/move"))
        .json(&json!({"loadId": "1", "x": 0, "y": 0}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn builtin_fixture_end_to_end() {
    let addr = spawn(StaticRobotSource::builtin().unwrap()).await;
    let resp = reqwest::Client::new()
        .post(url(addr, MOVE_PATH))
        .json(&json!({"loadId": "77", "x": 48, "y": 92, "withinDistance": 0}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["robotId"], "1");
    assert_eq!(body["distance"], 0.0);
}

#[tokio::test]
async fn chunked_post_is_accepted() {
    let addr = spawn(scenario()).await;
    let body = r#"{"loadId": "231", "x": 0, "y": 0, "withinDistance": 5}"#;
    let (first, rest) = body.split_at(10);
    let request = format!(
        "POST {MOVE_PATH} HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\n\
         Transfer-Encoding: chunked\r\nConnection: close\r\n\r\n\
         {:x}\r\n{first}\r\n{:x}\r\n{rest}\r\n0\r\n\r\n",
        first.len(),
        rest.len(),
    );

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();

    assert!(raw.starts_with("HTTP/1.1 200"), "{raw}");
    assert!(raw.contains("\"robotId\":\"B\""), "{raw}");
}

#[tokio::test]
async fn expect_continue_post_is_accepted() {
    let addr = spawn(scenario()).await;
    let body = r#"{"loadId": "231", "x": 0, "y": 0, "withinDistance": 3.5}"#;
    let head = format!(
        "POST {MOVE_PATH} HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\n\
         Content-Length: {}\r\nExpect: 100-continue\r\nConnection: close\r\n\r\n",
        body.len(),
    );

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(head.as_bytes()).await.unwrap();
    let mut interim = [0u8; 25];
    stream.read_exact(&mut interim).await.unwrap();
    assert!(interim.starts_with(b"HTTP/1.1 100 Continue"));

    stream.write_all(body.as_bytes()).await.unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();
    assert!(raw.contains("HTTP/1.1 200"), "{raw}");
    assert!(raw.contains("\"robotId\":\"A\""), "{raw}");
}
