use std::sync::Arc;

use debugger::{FakeDriver, ServerConfig};
use tracing::info;

use crate::cli::ServeArgs;
use crate::error::Result;

pub async fn execute(args: &ServeArgs) -> Result<()> {
	let config = ServerConfig::from(args);
	let driver = Arc::new(FakeDriver::new(&config.public_url()));
	info!(
		target = "debugger",
		id = %driver.target().id,
		url = %driver.target().debugger_url,
		"serving fake target"
	);
	debugger::server::serve(&config, driver).await?;
	Ok(())
}
