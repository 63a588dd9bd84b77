use clap::Args;

use rigup_market::MarketClient;
use rigup_model::InstanceId;

#[derive(Debug, Args)]
pub struct DestroyArgs {
    /// Instance to destroy.
    id: InstanceId,
}

pub async fn run(client: &MarketClient, args: &DestroyArgs) -> anyhow::Result<()> {
    client.destroy_instance(args.id).await?;
    println!("destroyed instance {}", args.id);
    Ok(())
}
