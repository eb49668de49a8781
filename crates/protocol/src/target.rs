//! Target listing types served over HTTP.

use serde::{Deserialize, Serialize};

/// Protocol version reported by `/json/version`.
pub const PROTOCOL_VERSION: &str = "1.1";

const FRONTEND_APP: &str = "chrome-devtools://devtools/bundled/js_app.html?experiments=true&v8only=true&";
const FRONTEND_COMPAT: &str = "chrome-devtools://devtools/bundled/inspector.html?experiments=true&v8only=true&";

/// A debuggable endpoint advertised by a driver.
///
/// Drivers fill in the descriptive fields and then call [`init`](Self::init),
/// which stamps in the id and every URL derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
	pub id: String,

	#[serde(rename = "devtoolsFrontendUrl")]
	pub frontend_url: String,

	#[serde(rename = "devtoolsFrontendUrlCompat")]
	pub frontend_url_compat: String,

	#[serde(rename = "webSocketDebuggerUrl")]
	pub debugger_url: String,

	pub description: String,

	#[serde(rename = "faviconUrl")]
	pub favicon_url: String,

	pub title: String,

	#[serde(rename = "type")]
	pub kind: String,

	pub url: String,
}

impl Target {
	/// Sets the id and derives the WebSocket and front end URLs.
	///
	/// `http_prefix` is the address clients use to reach the server, for
	/// example `http://localhost:9222`. `http` maps to `ws` and `https` to
	/// `wss`; a trailing `/` is ignored.
	pub fn init(&mut self, http_prefix: &str, id: impl Into<String>) {
		let id = id.into();
		let prefix = http_prefix.trim_end_matches('/');
		let (scheme, host) = match prefix.split_once("://") {
			Some(("https", host)) => ("wss", host),
			Some((_, host)) => ("ws", host),
			None => ("ws", prefix),
		};

		self.frontend_url = format!("{FRONTEND_APP}{scheme}={host}/{id}");
		self.frontend_url_compat = format!("{FRONTEND_COMPAT}{scheme}={host}/{id}");
		self.debugger_url = format!("{scheme}://{host}/{id}");
		self.id = id;
	}

	/// Request path that upgrades to a debug session for this target.
	pub fn path(&self) -> String {
		format!("/{}", self.id)
	}
}

/// Body of `/json/version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
	#[serde(rename = "Browser")]
	pub browser: String,

	#[serde(rename = "Protocol-Version")]
	pub protocol_version: String,
}

impl Version {
	pub fn new(browser: impl Into<String>) -> Self {
		Self {
			browser: browser.into(),
			protocol_version: PROTOCOL_VERSION.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn fake_target() -> Target {
		let mut target = Target {
			description: "Fake Debugger Description".into(),
			title: "Fake Debugger Title".into(),
			kind: "Fake Type".into(),
			url: "http://example.com/fakeUrl".into(),
			..Default::default()
		};
		target.init("http://localhost:8222", "FakeID");
		target
	}

	#[test]
	fn init_derives_debugger_url() {
		let target = fake_target();
		assert_eq!(target.id, "FakeID");
		assert_eq!(target.debugger_url, "ws://localhost:8222/FakeID");
		assert_eq!(target.path(), "/FakeID");
	}

	#[test]
	fn init_derives_frontend_urls() {
		let target = fake_target();
		assert_eq!(
			target.frontend_url,
			"chrome-devtools://devtools/bundled/js_app.html?experiments=true&v8only=true&ws=localhost:8222/FakeID"
		);
		assert_eq!(
			target.frontend_url_compat,
			"chrome-devtools://devtools/bundled/inspector.html?experiments=true&v8only=true&ws=localhost:8222/FakeID"
		);
	}

	#[test]
	fn init_maps_https_to_wss_and_trims_slash() {
		let mut target = Target::default();
		target.init("https://debug.example.com/", "abc");
		assert_eq!(target.debugger_url, "wss://debug.example.com/abc");
	}

	#[test]
	fn init_is_deterministic() {
		assert_eq!(fake_target(), fake_target());
	}

	#[test]
	fn target_serializes_with_devtools_field_names() {
		let json = serde_json::to_value(fake_target()).unwrap();
		assert_eq!(json["id"], "FakeID");
		assert_eq!(json["webSocketDebuggerUrl"], "ws://localhost:8222/FakeID");
		assert_eq!(json["type"], "Fake Type");
		assert_eq!(json["faviconUrl"], "");
		assert!(json.get("devtoolsFrontendUrl").is_some());
		assert!(json.get("devtoolsFrontendUrlCompat").is_some());
	}

	#[test]
	fn version_serializes_header_style_keys() {
		let json = serde_json::to_value(Version::new("FakeServer")).unwrap();
		assert_eq!(json, json!({"Browser": "FakeServer", "Protocol-Version": "1.1"}));
	}
}
