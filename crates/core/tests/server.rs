//! End-to-end tests against a live server using real HTTP and WebSocket clients.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use debugger::{Dispatcher, Driver, Error, FakeNetwork, Request, Response, Target};
use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

const TIMEOUT: Duration = Duration::from_secs(5);

type WsStream = tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

struct TestDriver {
	targets: Mutex<Vec<Target>>,
	fail_list: bool,
	network: FakeNetwork,
	dispatcher: Dispatcher<TestDriver>,
}

impl TestDriver {
	fn new(ids: &[&str]) -> Self {
		let targets = ids
			.iter()
			.map(|id| {
				let mut target = Target {
					title: format!("target {id}"),
					kind: "page".to_string(),
					..Default::default()
				};
				target.init("http://localhost:9222", *id);
				target
			})
			.collect();
		Self {
			targets: Mutex::new(targets),
			fail_list: false,
			network: FakeNetwork,
			dispatcher: Dispatcher::standard(),
		}
	}

	fn failing() -> Self {
		Self {
			fail_list: true,
			..Self::new(&[])
		}
	}

	fn remove_all(&self) {
		self.targets.lock().unwrap().clear();
	}
}

impl Driver for TestDriver {
	type Network = FakeNetwork;

	fn name(&self) -> &str {
		"TestDriver"
	}

	fn list(&self) -> debugger::Result<Vec<Target>> {
		if self.fail_list {
			return Err(Error::Driver("backend unavailable".to_string()));
		}
		Ok(self.targets.lock().unwrap().clone())
	}

	fn network(&self) -> &FakeNetwork {
		&self.network
	}

	fn dispatch(&self, request: &Request) -> Response {
		self.dispatcher.dispatch(self, request)
	}
}

async fn boot(driver: Arc<TestDriver>) -> SocketAddr {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(debugger::server::serve_listener(listener, driver));
	addr
}

async fn connect(addr: SocketAddr, id: &str) -> WsStream {
	let (ws, _) = timeout(TIMEOUT, connect_async(format!("ws://{addr}/{id}")))
		.await
		.expect("connect timed out")
		.expect("connect failed");
	ws
}

async fn roundtrip(ws: &mut WsStream, request: Value) -> Value {
	ws.send(Message::Text(request.to_string().into())).await.unwrap();
	read_json(ws).await
}

async fn read_json(ws: &mut WsStream) -> Value {
	loop {
		let message = timeout(TIMEOUT, ws.next())
			.await
			.expect("read timed out")
			.expect("stream ended")
			.expect("read failed");
		if let Message::Text(text) = message {
			return serde_json::from_str(text.as_str()).unwrap();
		}
	}
}

#[tokio::test]
async fn listing_returns_driver_targets() {
	let addr = boot(Arc::new(TestDriver::new(&["T1"]))).await;

	for path in ["/json", "/json/", "/json/list", "/json/list/"] {
		let response = reqwest::get(format!("http://{addr}{path}")).await.unwrap();
		assert_eq!(response.status(), 200, "path {path}");
		let body: Value = response.json().await.unwrap();
		let targets = body.as_array().expect("array body");
		assert_eq!(targets.len(), 1, "path {path}");
		assert_eq!(targets[0]["id"], "T1");
		assert_eq!(targets[0]["webSocketDebuggerUrl"], "ws://localhost:9222/T1");
	}
}

#[tokio::test]
async fn version_reports_driver_name() {
	let addr = boot(Arc::new(TestDriver::new(&["T1"]))).await;
	let body: Value = reqwest::get(format!("http://{addr}/json/version"))
		.await
		.unwrap()
		.json()
		.await
		.unwrap();
	assert_eq!(body, json!({"Browser": "TestDriver", "Protocol-Version": "1.1"}));
}

#[tokio::test]
async fn non_get_requests_are_rejected() {
	let addr = boot(Arc::new(TestDriver::new(&["T1"]))).await;
	let client = reqwest::Client::new();
	let response = client.post(format!("http://{addr}/json")).send().await.unwrap();
	assert_eq!(response.status(), 405);
}

#[tokio::test]
async fn unknown_paths_fall_through_empty() {
	let addr = boot(Arc::new(TestDriver::new(&["T1"]))).await;
	let response = reqwest::get(format!("http://{addr}/T2")).await.unwrap();
	assert_eq!(response.status(), 200);
	assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn listing_failure_is_a_server_error() {
	let addr = boot(Arc::new(TestDriver::failing())).await;
	let response = reqwest::get(format!("http://{addr}/json")).await.unwrap();
	assert_eq!(response.status(), 500);
	assert!(response.text().await.unwrap().contains("backend unavailable"));
}

#[tokio::test]
async fn session_answers_requests() {
	let addr = boot(Arc::new(TestDriver::new(&["T1"]))).await;
	let mut ws = connect(addr, "T1").await;

	let response = roundtrip(&mut ws, json!({"id": 1, "method": "Network.enable"})).await;
	assert_eq!(response, json!({"id": 1, "result": {}}));

	let response = roundtrip(&mut ws, json!({"id": 2, "method": "Foo.bar"})).await;
	assert_eq!(response, json!({"id": 2}));
}

#[tokio::test]
async fn responses_never_carry_request_fields() {
	let addr = boot(Arc::new(TestDriver::new(&["T1"]))).await;
	let mut ws = connect(addr, "T1").await;

	let response = roundtrip(
		&mut ws,
		json!({"id": 3, "method": "Network.setCacheDisabled", "params": {"cacheDisabled": true}}),
	)
	.await;
	let object = response.as_object().unwrap();
	assert!(object.get("method").is_none());
	assert!(object.get("params").is_none());
	assert_eq!(response, json!({"id": 3, "result": {}}));
}

#[tokio::test]
async fn dispatch_errors_keep_session_open() {
	let addr = boot(Arc::new(TestDriver::new(&["T1"]))).await;
	let mut ws = connect(addr, "T1").await;

	let response = roundtrip(
		&mut ws,
		json!({"id": 4, "method": "Network.getResponseBody", "params": {"requestId": 7}}),
	)
	.await;
	assert_eq!(response["id"], 4);
	assert_eq!(response["error"]["code"], -1);
	assert!(response.get("result").is_none());

	let response = roundtrip(&mut ws, json!({"id": 5, "method": "network.ENABLE"})).await;
	assert_eq!(response, json!({"id": 5, "result": {}}));
}

#[tokio::test]
async fn responses_follow_request_order() {
	let addr = boot(Arc::new(TestDriver::new(&["T1"]))).await;
	let mut ws = connect(addr, "T1").await;

	for id in 10..15 {
		let request = json!({"id": id, "method": "Network.getAllCookies"});
		ws.send(Message::Text(request.to_string().into())).await.unwrap();
	}
	for id in 10..15 {
		let response = read_json(&mut ws).await;
		assert_eq!(response["id"], id);
	}
}

#[tokio::test]
async fn invalid_frame_ends_session() {
	let addr = boot(Arc::new(TestDriver::new(&["T1"]))).await;
	let mut ws = connect(addr, "T1").await;

	ws.send(Message::Text("not json".into())).await.unwrap();
	let next = timeout(TIMEOUT, ws.next()).await.expect("read timed out");
	match next {
		None | Some(Err(_)) | Some(Ok(Message::Close(_))) => {}
		Some(Ok(other)) => panic!("expected the session to close, got {other:?}"),
	}
}

#[tokio::test]
async fn binary_frame_ends_session() {
	let addr = boot(Arc::new(TestDriver::new(&["T1"]))).await;
	let mut ws = connect(addr, "T1").await;

	let request = json!({"id": 1, "method": "Network.enable"}).to_string();
	ws.send(Message::Binary(request.into_bytes().into())).await.unwrap();
	let next = timeout(TIMEOUT, ws.next()).await.expect("read timed out");
	match next {
		None | Some(Err(_)) | Some(Ok(Message::Close(_))) => {}
		Some(Ok(other)) => panic!("expected the session to close, got {other:?}"),
	}
}

#[tokio::test]
async fn targets_are_polled_on_every_request() {
	let driver = Arc::new(TestDriver::new(&["T1"]));
	let addr = boot(Arc::clone(&driver)).await;
	let _ws = connect(addr, "T1").await;

	driver.remove_all();

	let body: Value = reqwest::get(format!("http://{addr}/json")).await.unwrap().json().await.unwrap();
	assert_eq!(body, json!([]));

	let result = timeout(TIMEOUT, connect_async(format!("ws://{addr}/T1")))
		.await
		.expect("connect timed out");
	assert!(result.is_err(), "upgrade should be refused once the target is gone");
}

#[tokio::test]
async fn multiple_sessions_run_concurrently() {
	let addr = boot(Arc::new(TestDriver::new(&["T1", "T2"]))).await;
	let mut first = connect(addr, "T1").await;
	let mut second = connect(addr, "T2").await;

	let a = roundtrip(&mut first, json!({"id": 1, "method": "Network.enable"}));
	let b = roundtrip(&mut second, json!({"id": 2, "method": "Network.disable"}));
	let (a, b) = tokio::join!(a, b);
	assert_eq!(a, json!({"id": 1, "result": {}}));
	assert_eq!(b, json!({"id": 2, "result": {}}));
}
