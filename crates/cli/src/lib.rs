//! Command line front end for the debugger server and the DevTools relay.
//!
//! `debugger serve` runs the fake driver behind the debugger server;
//! `debugger proxy` bridges DevTools clients to a real browser endpoint and
//! logs every frame that passes through.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod relay;
pub mod styles;
