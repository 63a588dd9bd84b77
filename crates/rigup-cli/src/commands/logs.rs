use clap::Args;

use rigup_market::MarketClient;
use rigup_model::InstanceId;

#[derive(Debug, Args)]
pub struct LogsArgs {
    /// Instance whose log tail to print.
    id: InstanceId,
}

pub async fn run(client: &MarketClient, args: &LogsArgs) -> anyhow::Result<()> {
    print!("{}", client.logs(args.id).await?);
    Ok(())
}
