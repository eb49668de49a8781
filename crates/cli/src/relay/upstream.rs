//! Talking to the remote DevTools endpoint.

use anyhow::{Context, Result, anyhow, bail};
use axum::body::{self, Body};
use axum::extract::Request;
use axum::http::HeaderMap;
use axum::http::header::{self, HeaderName};
use axum::response::Response;
use serde_json::{Map, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

/// Outbound WebSocket connection to the remote endpoint.
pub type UpstreamSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const HOP_BY_HOP: [HeaderName; 8] = [
	header::CONNECTION,
	HeaderName::from_static("keep-alive"),
	header::PROXY_AUTHENTICATE,
	header::PROXY_AUTHORIZATION,
	header::TE,
	header::TRAILER,
	header::TRANSFER_ENCODING,
	header::UPGRADE,
];

/// Returns the target id a request path addresses, if any.
///
/// `/`, `/json` and everything under `/json/` address the listing endpoints
/// and yield `None`. Otherwise the id is the last non-empty path segment.
pub fn target_id(path: &str) -> Option<&str> {
	if path == "/json" || path.starts_with("/json/") {
		return None;
	}
	path.rsplit('/').find(|segment| !segment.is_empty())
}

/// WebSocket URL on `remote` for an inbound request `path`.
pub fn endpoint(remote: &str, path: &str) -> String {
	let path = path.trim_end_matches('/');
	format!("ws://{remote}{path}")
}

/// Fetches `http://{remote}/json/version` and returns the raw body.
///
/// Fails on connection errors, non-success status codes and bodies that are
/// not a JSON object.
pub async fn check_version(client: &reqwest::Client, remote: &str) -> Result<String> {
	let url = format!("http://{remote}/json/version");
	let response = client
		.get(&url)
		.send()
		.await
		.with_context(|| format!("GET {url}"))?;

	let status = response.status();
	if !status.is_success() {
		bail!("GET {url} returned {status}");
	}

	let body = response.text().await.context("reading version body")?;
	serde_json::from_str::<Map<String, Value>>(&body).map_err(|_| anyhow!("expected json result"))?;
	Ok(body)
}

/// Opens the outbound WebSocket.
pub async fn dial(endpoint: &str) -> Result<UpstreamSocket> {
	let (socket, _) = tokio_tungstenite::connect_async(endpoint).await?;
	Ok(socket)
}

/// Forwards a plain HTTP request to `remote` and relays the answer back.
pub async fn forward(client: &reqwest::Client, remote: &str, request: Request) -> Result<Response> {
	let (parts, body) = request.into_parts();
	let path_and_query = parts.uri.path_and_query().map_or("/", |pq| pq.as_str());
	let url = format!("http://{remote}{path_and_query}");

	let body = body::to_bytes(body, usize::MAX)
		.await
		.context("reading request body")?;

	let mut headers = parts.headers;
	strip_hop_by_hop(&mut headers);
	headers.remove(header::HOST);

	let upstream = client
		.request(parts.method, &url)
		.headers(headers)
		.body(body)
		.send()
		.await
		.with_context(|| format!("forwarding to {url}"))?;

	let status = upstream.status();
	let mut headers = upstream.headers().clone();
	strip_hop_by_hop(&mut headers);
	let body = upstream.bytes().await.context("reading upstream body")?;

	let mut response = Response::new(Body::from(body));
	*response.status_mut() = status;
	*response.headers_mut() = headers;
	Ok(response)
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
	let listed: Vec<HeaderName> = headers
		.get_all(header::CONNECTION)
		.iter()
		.filter_map(|value| value.to_str().ok())
		.flat_map(|value| value.split(','))
		.filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
		.collect();

	for name in HOP_BY_HOP.iter().chain(&listed) {
		headers.remove(name);
	}
}

#[cfg(test)]
mod tests {
	use axum::http::HeaderValue;

	use super::*;

	#[test]
	fn listing_paths_have_no_target() {
		assert_eq!(target_id("/"), None);
		assert_eq!(target_id(""), None);
		assert_eq!(target_id("/json"), None);
		assert_eq!(target_id("/json/"), None);
		assert_eq!(target_id("/json/version"), None);
		assert_eq!(target_id("/json/list"), None);
	}

	#[test]
	fn target_is_last_segment() {
		assert_eq!(target_id("/devtools/page/E4F1"), Some("E4F1"));
		assert_eq!(target_id("/devtools/browser/abc-123/"), Some("abc-123"));
		assert_eq!(target_id("/FakeID"), Some("FakeID"));
		assert_eq!(target_id("/jsonp"), Some("jsonp"));
	}

	#[test]
	fn endpoint_keeps_path() {
		assert_eq!(
			endpoint("localhost:9222", "/devtools/page/E4F1"),
			"ws://localhost:9222/devtools/page/E4F1"
		);
		assert_eq!(endpoint("10.0.0.2:9222", "/FakeID/"), "ws://10.0.0.2:9222/FakeID");
	}

	#[test]
	fn hop_by_hop_headers_are_removed() {
		let mut headers = HeaderMap::new();
		headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive, x-session"));
		headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
		headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
		headers.insert("x-session", HeaderValue::from_static("1"));
		headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

		strip_hop_by_hop(&mut headers);

		assert_eq!(headers.len(), 1);
		assert_eq!(headers[header::ACCEPT], "application/json");
	}

	#[tokio::test]
	async fn version_check_fails_without_remote() {
		let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
		let remote = listener.local_addr().unwrap().to_string();
		drop(listener);

		let client = reqwest::Client::new();
		assert!(check_version(&client, &remote).await.is_err());
	}
}
