use clap::Args;

use rigup_market::MarketClient;
use rigup_model::InstanceId;

use super::print_instance;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Instance to inspect.
    id: InstanceId,
}

pub async fn run(client: &MarketClient, args: &StatusArgs) -> anyhow::Result<()> {
    let instance = client.instance(args.id).await?;
    print_instance(&instance);
    Ok(())
}
