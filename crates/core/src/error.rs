//! Error types for drivers and the debugger server.

use thiserror::Error;

/// Result type alias for driver and server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by drivers, capability operations and the session transport.
#[derive(Debug, Error)]
pub enum Error {
	/// The driver could not produce its target listing.
	#[error("Driver error: {0}")]
	Driver(String),

	/// A capability operation failed. Reported to the client as a protocol error.
	#[error("{0}")]
	Operation(String),

	/// WebSocket transport failure on a debug session.
	#[error("Transport error: {0}")]
	Transport(String),

	/// The client closed the debug session.
	#[error("Connection closed by client")]
	Closed,

	/// The client sent a binary frame where a JSON text frame was expected.
	#[error("Unexpected binary frame")]
	BinaryFrame,

	/// Failed to bind the server listener.
	#[error("Failed to bind {addr}: {source}")]
	Bind {
		addr: String,
		#[source]
		source: std::io::Error,
	},

	/// I/O error.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl Error {
	/// Shorthand for a failed capability operation.
	pub fn operation(message: impl Into<String>) -> Self {
		Self::Operation(message.into())
	}

	/// Whether this error ended a session because the peer went away.
	pub fn is_closed(&self) -> bool {
		matches!(self, Self::Closed)
	}
}
