use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	/// A relay socket failed while reading or writing a frame.
	#[error("websocket error: {0}")]
	WebSocket(String),

	#[error(transparent)]
	Debugger(#[from] debugger::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Anyhow(#[from] anyhow::Error),
}

impl CliError {
	pub fn websocket(err: impl std::fmt::Display) -> Self {
		Self::WebSocket(err.to_string())
	}
}
