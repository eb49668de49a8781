//! HTTP front end and per-connection WebSocket session loop.
//!
//! Endpoints (GET only, anything else gets 405):
//!
//! - `/json/version`: driver name and protocol version
//! - `/json`, `/json/`, `/json/list`, `/json/list/`: the driver's targets
//! - `/{id}`: upgrades to a debug session for target `id`
//!
//! A session reads one request frame, dispatches it, writes the response and
//! repeats until either side fails.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use debugger_protocol::{Request, Version};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::driver::Driver;
use crate::error::{Error, Result};

const LISTING_PATHS: [&str; 4] = ["/json", "/json/", "/json/list", "/json/list/"];

/// Where the debugger server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
	/// Socket address to bind, for example `127.0.0.1:8222`.
	pub listen: String,

	/// Address clients use to reach the server, used to derive target URLs.
	/// Defaults to `http://{listen}`.
	pub public_url: Option<String>,
}

impl ServerConfig {
	pub fn new(listen: impl Into<String>) -> Self {
		Self {
			listen: listen.into(),
			public_url: None,
		}
	}

	pub fn public_url(&self) -> String {
		match &self.public_url {
			Some(url) => url.clone(),
			None => format!("http://{}", self.listen),
		}
	}
}

/// Builds the router serving `driver`.
pub fn router<D: Driver>(driver: Arc<D>) -> Router {
	Router::new().fallback(handle::<D>).with_state(driver)
}

/// Binds `config.listen` and serves `driver` until the listener fails.
pub async fn serve<D: Driver>(config: &ServerConfig, driver: Arc<D>) -> Result<()> {
	let listener = TcpListener::bind(&config.listen)
		.await
		.map_err(|source| Error::Bind {
			addr: config.listen.clone(),
			source,
		})?;
	serve_listener(listener, driver).await
}

/// Serves `driver` on an already bound listener.
pub async fn serve_listener<D: Driver>(listener: TcpListener, driver: Arc<D>) -> Result<()> {
	let addr = listener.local_addr()?;
	info!(target = "debugger.server", %addr, driver = driver.name(), "debugger server listening");
	axum::serve(listener, router(driver)).await?;
	Ok(())
}

async fn handle<D: Driver>(
	State(driver): State<Arc<D>>,
	method: Method,
	uri: Uri,
	upgrade: std::result::Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
	let path = uri.path();
	debug!(target = "debugger.server", %method, path, "got request");

	if method != Method::GET {
		return (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response();
	}

	if path == "/json/version" {
		return axum::Json(Version::new(driver.name())).into_response();
	}

	let targets = match driver.list() {
		Ok(targets) => targets,
		Err(err) => {
			warn!(target = "debugger.server", error = %err, "listing targets failed");
			return (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response();
		}
	};

	if LISTING_PATHS.contains(&path) {
		return axum::Json(targets).into_response();
	}

	let Some(target) = targets.into_iter().find(|target| target.path() == path) else {
		return StatusCode::OK.into_response();
	};

	let upgrade = match upgrade {
		Ok(upgrade) => upgrade,
		Err(rejection) => {
			warn!(target = "debugger.server", id = %target.id, error = %rejection, "websocket upgrade failed");
			return rejection.into_response();
		}
	};

	info!(target = "debugger.server", id = %target.id, "new debug session");
	let id = target.id;
	upgrade
		.on_failed_upgrade(|err| warn!(target = "debugger.server", error = %err, "websocket upgrade failed"))
		.on_upgrade(move |socket| run_session(socket, driver, id))
}

async fn run_session<D: Driver>(mut socket: WebSocket, driver: Arc<D>, id: String) {
	let err = loop {
		let request = match read_request(&mut socket).await {
			Ok(request) => request,
			Err(err) => break err,
		};
		debug!(
			target = "debugger.server",
			session = %id,
			request = request.id,
			method = %request.method,
			"got message"
		);

		let response = driver.dispatch(&request);
		if response.is_error() {
			debug!(target = "debugger.server", session = %id, request = request.id, "request failed");
		}
		let frame = match serde_json::to_string(&response) {
			Ok(frame) => frame,
			Err(err) => break Error::Json(err),
		};
		if let Err(err) = socket.send(Message::Text(frame.into())).await {
			break Error::Transport(err.to_string());
		}
	};

	if err.is_closed() {
		info!(target = "debugger.server", session = %id, "debug session closed");
	} else {
		warn!(target = "debugger.server", session = %id, error = %err, "debug session ended");
	}

	let close = CloseFrame {
		code: close_code::ERROR,
		reason: "session ended".into(),
	};
	let _ = socket.send(Message::Close(Some(close))).await;
}

/// Reads the next request frame, skipping control frames.
async fn read_request(socket: &mut WebSocket) -> Result<Request> {
	loop {
		let message = match socket.recv().await {
			Some(Ok(message)) => message,
			Some(Err(err)) => return Err(Error::Transport(err.to_string())),
			None => return Err(Error::Closed),
		};
		match message {
			Message::Text(text) => return Ok(serde_json::from_str(text.as_str())?),
			Message::Binary(_) => return Err(Error::BinaryFrame),
			Message::Close(_) => return Err(Error::Closed),
			Message::Ping(_) | Message::Pong(_) => continue,
		}
	}
}
