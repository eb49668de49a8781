mod proxy;
mod serve;

use crate::cli::{Cli, Commands};
use crate::error::Result;

pub async fn dispatch(cli: Cli) -> Result<()> {
	match cli.command {
		Commands::Serve(args) => serve::execute(&args).await,
		Commands::Proxy(args) => proxy::execute(&args).await,
	}
}
