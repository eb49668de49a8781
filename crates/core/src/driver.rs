//! The backend contract served by the debugger.

use debugger_protocol::{Request, Response, Target};

use crate::error::Result;
use crate::network::Network;

/// A debuggable backend.
///
/// Each zero-argument accessor (today [`network`](Self::network)) returns a
/// capability object whose operations are reachable as `Domain.action`
/// methods. The usual way to implement [`dispatch`](Self::dispatch) is to
/// hold a [`Dispatcher`](crate::Dispatcher) built with
/// [`Dispatcher::standard`](crate::Dispatcher::standard) and forward to it.
///
/// The driver is shared by every session, so capability operations may be
/// called concurrently. Any serialization they need is the driver's job.
pub trait Driver: Send + Sync + 'static {
	/// Capability object behind the `Network` domain.
	type Network: Network;

	/// Name reported as `Browser` by `/json/version`.
	fn name(&self) -> &str;

	/// Targets currently available for debugging.
	///
	/// Polled on every listing request and every upgrade decision; nothing
	/// is cached between calls.
	fn list(&self) -> Result<Vec<Target>>;

	fn network(&self) -> &Self::Network;

	/// Answers one request. Failures belong in the returned [`Response`].
	fn dispatch(&self, request: &Request) -> Response;
}
