use clap::Args;

use rigup_market::MarketClient;
use rigup_model::InstanceId;

use super::{WaitArgs, push_notebook, wait_for_running};

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Instance to receive the notebook.
    id: InstanceId,

    /// Notebook path or raw URL.
    notebook: String,

    /// Destination name inside the server; defaults to the source
    /// file name.
    #[arg(long)]
    name: Option<String>,

    #[command(flatten)]
    wait: WaitArgs,
}

pub async fn run(client: &MarketClient, args: &UploadArgs) -> anyhow::Result<()> {
    let instance = wait_for_running(client, args.id, &args.wait).await?;
    let lab_url = push_notebook(&instance, &args.notebook, args.name.as_deref()).await?;
    println!("{lab_url}");
    Ok(())
}
