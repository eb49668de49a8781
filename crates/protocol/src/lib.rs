//! Wire types for the DevTools remote debugging protocol.
//!
//! This crate contains the serde-serializable types exchanged between a
//! debugger front end (Chrome DevTools, chromedp, ...) and a debugger server.
//! They describe the shapes of data as they appear on the wire:
//!
//! - [`message`]: request and response envelopes carried in WebSocket frames
//! - [`target`]: the target listing served from `/json` and `/json/version`
//! - [`network`]: parameter and return shapes of the `Network` domain
//!
//! Types in this crate are pure data. Resolving and invoking methods lives in
//! the `debugger-rs` crate.

pub mod message;
pub mod network;
pub mod target;

pub use message::*;
pub use target::*;
