//! Logging relay between DevTools clients and a remote DevTools endpoint.
//!
//! Listing requests (`/`, `/json`, `/json/...`) are reverse proxied to the
//! remote as is. Any other path names a target: the relay checks that the
//! remote answers `/json/version`, dials the same path on the remote, upgrades
//! the client and then pumps frames both ways, logging each one.

pub mod frame;
pub mod log;
pub mod pump;
pub mod upstream;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use self::frame::{client_sink, client_source, upstream_sink, upstream_source};
use self::log::SessionLog;
use self::pump::{Direction, pump};
use self::upstream::UpstreamSocket;

/// Where the relay listens, where it forwards to and how it logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
	pub listen: String,
	pub remote: String,
	/// Log file template (`%s` is the target id). `None` logs to stdout only.
	pub log: Option<String>,
}

struct RelayState {
	config: RelayConfig,
	http: reqwest::Client,
}

/// Binds `config.listen` and relays until the listener fails.
pub async fn run_relay_server(config: &RelayConfig) -> Result<()> {
	let listener = TcpListener::bind(&config.listen)
		.await
		.with_context(|| format!("Failed to bind relay server to {}", config.listen))?;
	serve_listener(listener, config.clone()).await
}

/// Relays on an already bound listener.
pub async fn serve_listener(listener: TcpListener, config: RelayConfig) -> Result<()> {
	let addr = listener.local_addr()?;
	info!(target = "debugger.relay", %addr, remote = %config.remote, "starting DevTools relay");

	let app = router(config).into_make_service_with_connect_info::<SocketAddr>();
	axum::serve(listener, app).await.context("Relay server error")
}

/// Builds the relay router. It must be served with connect info so peer
/// addresses can be logged; [`serve_listener`] does that.
pub(crate) fn router(config: RelayConfig) -> Router {
	let state = Arc::new(RelayState {
		config,
		http: reqwest::Client::new(),
	});
	Router::new().fallback(handle).with_state(state)
}

async fn handle(
	State(state): State<Arc<RelayState>>,
	ConnectInfo(peer): ConnectInfo<SocketAddr>,
	upgrade: std::result::Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
	request: Request,
) -> Response {
	let path = request.uri().path().to_owned();
	debug!(target = "debugger.relay", %peer, method = %request.method(), path, "got request");

	let Some(id) = upstream::target_id(&path).map(str::to_owned) else {
		return match upstream::forward(&state.http, &state.config.remote, request).await {
			Ok(response) => response,
			Err(err) => {
				warn!(target = "debugger.relay", path, error = %format!("{err:#}"), "forwarding failed");
				(StatusCode::BAD_GATEWAY, format!("{err:#}")).into_response()
			}
		};
	};

	open_session(state, peer, &id, &path, upgrade).await
}

async fn open_session(
	state: Arc<RelayState>,
	peer: SocketAddr,
	id: &str,
	path: &str,
	upgrade: std::result::Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
	let log = match SessionLog::open(state.config.log.as_deref(), id) {
		Ok(log) => Arc::new(log),
		Err(err) => {
			warn!(target = "debugger.relay", id, error = %err, "could not open session log");
			return (StatusCode::INTERNAL_SERVER_ERROR, format!("could not open session log, got: {err}"))
				.into_response();
		}
	};
	log.line(format_args!("---------- connection from {peer} ----------"));

	let remote = &state.config.remote;
	let version = match upstream::check_version(&state.http, remote).await {
		Ok(version) => version,
		Err(err) => return refuse(&log, format!("version error, got: {err:#}")),
	};
	log.line(format_args!("endpoint {remote} reported: {version}"));

	let endpoint = upstream::endpoint(remote, path);
	log.line(format_args!("connecting to {endpoint}"));
	let mut outbound = match upstream::dial(&endpoint).await {
		Ok(socket) => socket,
		Err(err) => return refuse(&log, format!("could not connect to {endpoint}, got: {err:#}")),
	};
	log.line(format_args!("connected to {endpoint}"));

	log.line(format_args!("upgrading connection on {peer}"));
	let upgrade = match upgrade {
		Ok(upgrade) => upgrade,
		Err(rejection) => {
			let _ = outbound.close(None).await;
			return refuse(&log, format!("could not upgrade websocket from {peer}, got: {rejection}"));
		}
	};

	info!(target = "debugger.relay", %peer, %endpoint, "relay session starting");
	upgrade
		.on_failed_upgrade(move |err| warn!(target = "debugger.relay", %peer, error = %err, "websocket upgrade failed"))
		.on_upgrade(move |inbound| async move {
			log.line(format_args!("upgraded connection on {peer}"));
			run_session(inbound, outbound, Arc::clone(&log)).await;
			log.line(format_args!("---------- closing {peer} ----------"));
			info!(target = "debugger.relay", %peer, "relay session closed");
		})
}

fn refuse(log: &SessionLog, message: String) -> Response {
	log.line(format_args!("{message}"));
	warn!(target = "debugger.relay", error = %message, "relay session refused");
	(StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}

/// Pumps frames both ways until either side stops, then winds down the other.
async fn run_session(inbound: WebSocket, outbound: UpstreamSocket, log: Arc<SessionLog>) {
	let (client_tx, client_rx) = inbound.split();
	let (upstream_tx, upstream_rx) = outbound.split();
	let cancel = CancellationToken::new();

	let mut pumps = JoinSet::new();
	pumps.spawn(pump(
		Direction::ClientToUpstream,
		client_source(client_rx),
		upstream_sink(upstream_tx),
		Arc::clone(&log),
		cancel.clone(),
	));
	pumps.spawn(pump(
		Direction::UpstreamToClient,
		upstream_source(upstream_rx),
		client_sink(client_tx),
		log,
		cancel.clone(),
	));

	if let Some(first) = pumps.join_next().await {
		match first {
			Ok(Ok(())) => debug!(target = "debugger.relay", "relay pump finished"),
			Ok(Err(err)) => debug!(target = "debugger.relay", error = %err, "relay pump stopped"),
			Err(err) => warn!(target = "debugger.relay", error = %err, "relay pump panicked"),
		}
	}

	cancel.cancel();
	while let Some(rest) = pumps.join_next().await {
		if let Err(err) = rest {
			warn!(target = "debugger.relay", error = %err, "relay pump panicked");
		}
	}
}
