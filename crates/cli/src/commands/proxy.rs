use crate::cli::ProxyArgs;
use crate::error::Result;
use crate::relay::{self, RelayConfig};

pub async fn execute(args: &ProxyArgs) -> Result<()> {
	relay::run_relay_server(&RelayConfig::from(args)).await?;
	Ok(())
}
