use clap::Args;
use tracing::warn;

use rigup_jupyter::JupyterServer;
use rigup_market::MarketClient;
use rigup_model::OfferId;

use super::{CreateArgs, QueryArgs, WaitArgs, print_instance, wait_for_running};

#[derive(Debug, Args)]
pub struct RentArgs {
    /// Accept this specific offer instead of the cheapest match.
    #[arg(long)]
    offer: Option<OfferId>,

    #[command(flatten)]
    query: QueryArgs,

    #[command(flatten)]
    create: CreateArgs,

    #[command(flatten)]
    wait: WaitArgs,
}

pub async fn run(client: &MarketClient, args: &RentArgs) -> anyhow::Result<()> {
    let offer = match args.offer {
        Some(id) => id,
        None => {
            let best = client.best_offer(&args.query.to_query()).await?;
            println!(
                "selected offer {} ({} at ${:.3}/hr)",
                best.id,
                best.gpu_name.as_deref().unwrap_or("unknown gpu"),
                best.dph_total
            );
            best.id
        }
    };

    let id = client.create_instance(offer, &args.create.to_request()).await?;
    // Billing starts here; print the id before waiting so an
    // interrupted run can still destroy it.
    println!("created instance {id}");

    let instance = wait_for_running(client, id, &args.wait).await?;
    print_instance(&instance);
    match JupyterServer::from_instance(&instance) {
        Ok(jupyter) => println!("jupyter: {}", jupyter.entry_url()),
        Err(err) => warn!(%err, "instance is running but jupyter is not reachable yet"),
    }
    Ok(())
}
