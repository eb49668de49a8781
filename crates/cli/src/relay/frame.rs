//! Frames crossing the relay, independent of which WebSocket library carried them.

use std::borrow::Cow;
use std::future::{self, Ready};

use axum::extract::ws::Message as ClientMessage;
use bytes::Bytes;
use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio_tungstenite::tungstenite::Message as UpstreamMessage;

use crate::error::{CliError, Result};

/// A data frame, or the peer's request to close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
	Text(String),
	Binary(Bytes),
	Close,
}

impl Frame {
	/// Payload as logged. Binary payloads are decoded lossily.
	pub fn payload(&self) -> Cow<'_, str> {
		match self {
			Self::Text(text) => Cow::Borrowed(text),
			Self::Binary(data) => String::from_utf8_lossy(data),
			Self::Close => Cow::Borrowed(""),
		}
	}

	/// Converts a message read from the inbound client. Control frames yield `None`.
	pub fn from_client(message: ClientMessage) -> Option<Self> {
		match message {
			ClientMessage::Text(text) => Some(Self::Text(text.as_str().to_owned())),
			ClientMessage::Binary(data) => Some(Self::Binary(data)),
			ClientMessage::Close(_) => Some(Self::Close),
			ClientMessage::Ping(_) | ClientMessage::Pong(_) => None,
		}
	}

	/// Converts a message read from the upstream server. Control frames yield `None`.
	pub fn from_upstream(message: UpstreamMessage) -> Option<Self> {
		match message {
			UpstreamMessage::Text(text) => Some(Self::Text(text.as_str().to_owned())),
			UpstreamMessage::Binary(data) => Some(Self::Binary(data)),
			UpstreamMessage::Close(_) => Some(Self::Close),
			UpstreamMessage::Ping(_) | UpstreamMessage::Pong(_) | UpstreamMessage::Frame(_) => None,
		}
	}

	pub fn into_client(self) -> ClientMessage {
		match self {
			Self::Text(text) => ClientMessage::Text(text.into()),
			Self::Binary(data) => ClientMessage::Binary(data),
			Self::Close => ClientMessage::Close(None),
		}
	}

	pub fn into_upstream(self) -> UpstreamMessage {
		match self {
			Self::Text(text) => UpstreamMessage::Text(text.into()),
			Self::Binary(data) => UpstreamMessage::Binary(data),
			Self::Close => UpstreamMessage::Close(None),
		}
	}
}

/// Adapts the client half of a socket into a stream of frames.
pub fn client_source<S, E>(stream: S) -> impl Stream<Item = Result<Frame>> + Send + Unpin
where
	S: Stream<Item = std::result::Result<ClientMessage, E>> + Send + Unpin,
	E: std::fmt::Display,
{
	stream.filter_map(|message| {
		future::ready(match message {
			Ok(message) => Frame::from_client(message).map(Ok),
			Err(err) => Some(Err(CliError::websocket(err))),
		})
	})
}

/// Adapts the upstream half of a socket into a stream of frames.
pub fn upstream_source<S, E>(stream: S) -> impl Stream<Item = Result<Frame>> + Send + Unpin
where
	S: Stream<Item = std::result::Result<UpstreamMessage, E>> + Send + Unpin,
	E: std::fmt::Display,
{
	stream.filter_map(|message| {
		future::ready(match message {
			Ok(message) => Frame::from_upstream(message).map(Ok),
			Err(err) => Some(Err(CliError::websocket(err))),
		})
	})
}

/// Adapts the client half of a socket into a sink of frames.
pub fn client_sink<K>(sink: K) -> impl Sink<Frame, Error = CliError> + Send + Unpin
where
	K: Sink<ClientMessage> + Send + Unpin,
	K::Error: std::fmt::Display,
{
	sink.sink_map_err(CliError::websocket)
		.with(|frame: Frame| -> Ready<Result<ClientMessage>> { future::ready(Ok(frame.into_client())) })
}

/// Adapts the upstream half of a socket into a sink of frames.
pub fn upstream_sink<K>(sink: K) -> impl Sink<Frame, Error = CliError> + Send + Unpin
where
	K: Sink<UpstreamMessage> + Send + Unpin,
	K::Error: std::fmt::Display,
{
	sink.sink_map_err(CliError::websocket)
		.with(|frame: Frame| -> Ready<Result<UpstreamMessage>> { future::ready(Ok(frame.into_upstream())) })
}

#[cfg(test)]
mod tests {
	use futures::stream;

	use super::*;

	#[test]
	fn text_survives_both_directions() {
		let frame = Frame::Text(r#"{"id":1,"method":"Page.enable"}"#.to_string());
		let upstream = frame.clone().into_upstream();
		assert_eq!(Frame::from_upstream(upstream), Some(frame.clone()));
		assert_eq!(Frame::from_client(frame.clone().into_client()), Some(frame));
	}

	#[test]
	fn binary_stays_binary() {
		let frame = Frame::Binary(Bytes::from_static(&[0, 159, 146, 150]));
		assert!(matches!(frame.clone().into_upstream(), UpstreamMessage::Binary(_)));
		assert!(matches!(frame.clone().into_client(), ClientMessage::Binary(_)));
		assert_eq!(frame.payload(), "\u{0}\u{FFFD}\u{FFFD}\u{FFFD}");
	}

	#[test]
	fn control_frames_are_skipped() {
		assert_eq!(Frame::from_client(ClientMessage::Ping(Bytes::new())), None);
		assert_eq!(Frame::from_upstream(UpstreamMessage::Pong(Bytes::new())), None);
		assert_eq!(Frame::from_upstream(UpstreamMessage::Close(None)), Some(Frame::Close));
	}

	#[tokio::test]
	async fn sources_skip_control_and_surface_errors() {
		let messages: Vec<std::result::Result<UpstreamMessage, String>> = vec![
			Ok(UpstreamMessage::Ping(Bytes::new())),
			Ok(UpstreamMessage::Text("ping".into())),
			Err("reset by peer".to_string()),
		];
		let frames: Vec<_> = upstream_source(stream::iter(messages)).collect().await;
		assert_eq!(frames.len(), 2);
		assert_eq!(frames[0].as_ref().unwrap(), &Frame::Text("ping".to_string()));
		assert!(frames[1].as_ref().unwrap_err().to_string().contains("reset by peer"));
	}
}
