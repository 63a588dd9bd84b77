use clap::Args;

use rigup_market::MarketClient;

use super::{CreateArgs, QueryArgs, WaitArgs, push_notebook, wait_for_running};

#[derive(Debug, Args)]
pub struct UpArgs {
    /// Notebook path or raw URL to push once the instance is up.
    notebook: String,

    /// Destination name inside the server; defaults to the source
    /// file name.
    #[arg(long)]
    name: Option<String>,

    /// Destroy the instance after the upload (smoke-run mode).
    #[arg(long)]
    destroy: bool,

    #[command(flatten)]
    query: QueryArgs,

    #[command(flatten)]
    create: CreateArgs,

    #[command(flatten)]
    wait: WaitArgs,
}

pub async fn run(client: &MarketClient, args: &UpArgs) -> anyhow::Result<()> {
    let best = client.best_offer(&args.query.to_query()).await?;
    println!(
        "selected offer {} ({} at ${:.3}/hr)",
        best.id,
        best.gpu_name.as_deref().unwrap_or("unknown gpu"),
        best.dph_total
    );

    let id = client.create_instance(best.id, &args.create.to_request()).await?;
    println!("created instance {id}");

    let instance = wait_for_running(client, id, &args.wait).await?;
    let lab_url = push_notebook(&instance, &args.notebook, args.name.as_deref()).await?;
    println!("{lab_url}");

    if args.destroy {
        client.destroy_instance(id).await?;
        println!("destroyed instance {id}");
    }
    Ok(())
}
