
use clap::{Args, Parser, Subcommand};
use debugger::ServerConfig;

use crate::relay::RelayConfig;
use crate::styles::cli_styles;

/// Default session log location; `%s` becomes the target id.
pub const DEFAULT_LOG_TEMPLATE: &str = "logs/cdp-%s.log";

#[derive(Parser, Debug)]
#[command(name = "debugger")]
#[command(about = "Serve a DevTools-compatible debugger endpoint, or relay and log a live one")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Serve the fake driver as a remote debugging endpoint.
	Serve(ServeArgs),
	/// Relay DevTools traffic to a remote endpoint, logging every frame.
	Proxy(ProxyArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
	/// Address to listen on.
	#[arg(long, value_name = "ADDR", default_value = "127.0.0.1:8222")]
	pub listen: String,

	/// Base URL advertised in target listings (defaults to http://<listen>).
	#[arg(long, value_name = "URL")]
	pub public_url: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ProxyArgs {
	/// Listen address.
	#[arg(short, long, value_name = "ADDR", default_value = "localhost:9223")]
	pub listen: String,

	/// Remote address.
	#[arg(short, long, value_name = "ADDR", default_value = "localhost:9222")]
	pub remote: String,

	/// Disable logging to file.
	#[arg(short = 'n', long)]
	pub no_log: bool,

	/// Log file template; `%s` is replaced by the target id.
	#[arg(long, value_name = "TEMPLATE", default_value = DEFAULT_LOG_TEMPLATE)]
	pub log: String,
}

impl From<&ServeArgs> for ServerConfig {
	fn from(args: &ServeArgs) -> Self {
		Self {
			listen: args.listen.clone(),
			public_url: args.public_url.clone(),
		}
	}
}

impl From<&ProxyArgs> for RelayConfig {
	fn from(args: &ProxyArgs) -> Self {
		let log = (!args.no_log && !args.log.is_empty()).then(|| args.log.clone());
		Self {
			listen: args.listen.clone(),
			remote: args.remote.clone(),
			log,
		}
	}
}
