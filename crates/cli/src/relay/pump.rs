use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use super::frame::Frame;
use super::log::SessionLog;
use crate::error::Result;

/// How long a pump waits for its sink to close before giving up on it.
pub const CLOSE_GRACE: Duration = Duration::from_secs(1);

/// Which way a pump moves frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	ClientToUpstream,
	UpstreamToClient,
}

impl Direction {
	/// Marker written in front of every logged frame.
	pub fn marker(self) -> &'static str {
		match self {
			Self::ClientToUpstream => "<-",
			Self::UpstreamToClient => "->",
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.marker())
	}
}

/// Copies frames from `source` to `sink` until a read or write fails, the
/// source closes, or `cancel` fires. Each frame is logged before it is written.
/// The sink is closed on the way out, waiting at most [`CLOSE_GRACE`].
///
/// `cancel` also interrupts a write that the peer never accepts.
pub async fn pump<S, K>(
	direction: Direction,
	mut source: S,
	mut sink: K,
	log: Arc<SessionLog>,
	cancel: CancellationToken,
) -> Result<()>
where
	S: Stream<Item = Result<Frame>> + Unpin,
	K: Sink<Frame, Error = crate::error::CliError> + Unpin,
{
	let result = loop {
		let next = tokio::select! {
			_ = cancel.cancelled() => break Ok(()),
			next = source.next() => next,
		};
		let frame = match next {
			None | Some(Ok(Frame::Close)) => break Ok(()),
			Some(Ok(frame)) => frame,
			Some(Err(err)) => break Err(err),
		};

		log.line(format_args!("{direction} {}", frame.payload()));

		let sent = tokio::select! {
			_ = cancel.cancelled() => break Ok(()),
			sent = sink.send(frame) => sent,
		};
		if let Err(err) = sent {
			break Err(err);
		}
	};

	let _ = tokio::time::timeout(CLOSE_GRACE, sink.close()).await;
	result
}
