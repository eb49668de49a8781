//! Request and response envelopes.
//!
//! Every WebSocket frame carries exactly one JSON object. Clients send a
//! [`Request`]; the server answers each one with a [`Response`] echoing the
//! request id:
//!
//! ```text
//! Request:  {"id": 1, "method": "Network.enable", "params": {...}}
//! Response: {"id": 1, "result": {...}}
//!           {"id": 1, "error": {"code": -1, "message": "..."}}
//! ```
//!
//! The two envelopes are separate types so that request-only fields can never
//! leak into a response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error code used for every failure reported in a [`Response`].
pub const GENERIC_ERROR_CODE: i64 = -1;

/// A method call sent by a debugger client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
	/// Correlation id echoed in the response.
	pub id: u64,

	/// Method name in `Domain.action` form.
	pub method: String,

	/// Method parameters, absent for parameterless calls.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub params: Option<Value>,
}

impl Request {
	pub fn new(id: u64, method: impl Into<String>) -> Self {
		Self {
			id,
			method: method.into(),
			params: None,
		}
	}

	pub fn with_params(mut self, params: Value) -> Self {
		self.params = Some(params);
		self
	}

	/// Splits the method on its first `.` into `(domain, action)`.
	///
	/// Returns [`None`] when there is no separator or either side is empty.
	pub fn domain_action(&self) -> Option<(&str, &str)> {
		let (domain, action) = self.method.split_once('.')?;
		if domain.is_empty() || action.is_empty() {
			return None;
		}
		Some((domain, action))
	}

	/// Parameters, treating JSON `null` the same as absent.
	pub fn params(&self) -> Option<&Value> {
		self.params.as_ref().filter(|params| !params.is_null())
	}
}

/// Server reply to a single [`Request`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
	pub id: u64,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub result: Option<Value>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<ErrorObject>,
}

impl Response {
	/// A reply carrying neither result nor error.
	pub fn empty(id: u64) -> Self {
		Self {
			id,
			result: None,
			error: None,
		}
	}

	pub fn result(id: u64, result: Value) -> Self {
		Self {
			id,
			result: Some(result),
			error: None,
		}
	}

	pub fn error(id: u64, error: ErrorObject) -> Self {
		Self {
			id,
			result: None,
			error: Some(error),
		}
	}

	pub fn is_error(&self) -> bool {
		self.error.is_some()
	}
}

/// Failure payload of a [`Response`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
	pub code: i64,
	pub message: String,
}

impl ErrorObject {
	/// An error with [`GENERIC_ERROR_CODE`].
	pub fn generic(message: impl Into<String>) -> Self {
		Self {
			code: GENERIC_ERROR_CODE,
			message: message.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn request_without_params_deserializes() {
		let request: Request = serde_json::from_str(r#"{"id":1,"method":"Network.enable"}"#).unwrap();
		assert_eq!(request.id, 1);
		assert_eq!(request.method, "Network.enable");
		assert!(request.params.is_none());
	}

	#[test]
	fn domain_action_splits_on_first_dot() {
		let request = Request::new(1, "Network.getCookies");
		assert_eq!(request.domain_action(), Some(("Network", "getCookies")));

		let nested = Request::new(2, "Network.get.Cookies");
		assert_eq!(nested.domain_action(), Some(("Network", "get.Cookies")));
	}

	#[test]
	fn domain_action_rejects_malformed_methods() {
		assert_eq!(Request::new(1, "enable").domain_action(), None);
		assert_eq!(Request::new(1, ".enable").domain_action(), None);
		assert_eq!(Request::new(1, "Network.").domain_action(), None);
		assert_eq!(Request::new(1, "").domain_action(), None);
	}

	#[test]
	fn null_params_count_as_absent() {
		let request: Request = serde_json::from_str(r#"{"id":3,"method":"A.b","params":null}"#).unwrap();
		assert!(request.params().is_none());

		let request = Request::new(4, "A.b").with_params(json!({"x": 1}));
		assert_eq!(request.params(), Some(&json!({"x": 1})));
	}

	#[test]
	fn empty_response_serializes_id_only() {
		let json = serde_json::to_value(Response::empty(2)).unwrap();
		assert_eq!(json, json!({"id": 2}));
	}

	#[test]
	fn error_response_uses_generic_code() {
		let response = Response::error(5, ErrorObject::generic("boom"));
		assert!(response.is_error());
		let json = serde_json::to_value(response).unwrap();
		assert_eq!(json, json!({"id": 5, "error": {"code": -1, "message": "boom"}}));
	}
}
