use clap::Args;

use rigup_market::MarketClient;

use super::{QueryArgs, print_offers};

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[command(flatten)]
    query: QueryArgs,

    /// Show at most this many offers.
    #[arg(long, default_value_t = 10)]
    limit: usize,
}

pub async fn run(client: &MarketClient, args: &SearchArgs) -> anyhow::Result<()> {
    let offers = client.search_offers(&args.query.to_query()).await?;
    if offers.is_empty() {
        println!("no offers matched the query");
        return Ok(());
    }
    print_offers(&offers[..offers.len().min(args.limit)]);
    Ok(())
}
