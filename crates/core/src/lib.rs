//! Serve a pluggable backend as a DevTools-compatible remote debugging endpoint.
//!
//! A backend implements [`Driver`]: it names itself, lists its [`Target`]s and
//! exposes capability objects such as [`Network`]. The [`server`] module turns
//! that driver into an HTTP/WebSocket endpoint that Chrome DevTools and other
//! protocol clients can attach to, and the [`dispatch`] module routes each
//! `Domain.action` request to the matching capability operation.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use debugger::{FakeDriver, ServerConfig};
//!
//! # async fn run() -> debugger::Result<()> {
//! let config = ServerConfig::new("127.0.0.1:8222");
//! let driver = Arc::new(FakeDriver::new(&config.public_url()));
//! debugger::server::serve(&config, driver).await
//! # }
//! ```

pub mod dispatch;
pub mod driver;
pub mod error;
pub mod fake;
pub mod network;
pub mod server;

pub use debugger_protocol as protocol;
pub use debugger_protocol::{ErrorObject, Request, Response, Target, Version};
pub use dispatch::{Dispatcher, DispatcherBuilder, DomainOps, IntoOutcome, Json, Outcome};
pub use driver::Driver;
pub use error::{Error, Result};
pub use fake::FakeDriver;
pub use network::{FakeNetwork, Network};
pub use server::ServerConfig;
