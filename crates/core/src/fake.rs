//! A stand-in driver exposing one target and a no-op `Network` domain.
//!
//! Point Chrome at it through `chrome://inspect/#devices` ("Open dedicated
//! DevTools for Node", then add the server address) to watch a front end
//! talk to the dispatcher.

use debugger_protocol::{Request, Response, Target};

use crate::dispatch::Dispatcher;
use crate::driver::Driver;
use crate::error::Result;
use crate::network::FakeNetwork;

/// Id of the single target listed by [`FakeDriver`].
pub const FAKE_TARGET_ID: &str = "FakeID";

pub struct FakeDriver {
	network: FakeNetwork,
	dispatcher: Dispatcher<FakeDriver>,
	target: Target,
}

impl FakeDriver {
	/// Creates the driver; `public_url` is the `http://` address clients use.
	pub fn new(public_url: &str) -> Self {
		let mut target = Target {
			description: "Fake Debugger Description".to_string(),
			title: "Fake Debugger Title".to_string(),
			kind: "Fake Type".to_string(),
			url: "http://example.com/fakeUrl".to_string(),
			..Default::default()
		};
		target.init(public_url, FAKE_TARGET_ID);

		Self {
			network: FakeNetwork,
			dispatcher: Dispatcher::standard(),
			target,
		}
	}

	pub fn target(&self) -> &Target {
		&self.target
	}
}

impl Driver for FakeDriver {
	type Network = FakeNetwork;

	fn name(&self) -> &str {
		"FakeServer"
	}

	fn list(&self) -> Result<Vec<Target>> {
		Ok(vec![self.target.clone()])
	}

	fn network(&self) -> &FakeNetwork {
		&self.network
	}

	fn dispatch(&self, request: &Request) -> Response {
		self.dispatcher.dispatch(self, request)
	}
}
