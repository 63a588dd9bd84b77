pub mod destroy;
pub mod logs;
pub mod rent;
pub mod search;
pub mod status;
pub mod up;
pub mod upload;

use std::time::Duration;

use anyhow::Context;
use clap::Args;
use tracing::info;

use rigup_jupyter::{JupyterServer, NotebookSource};
use rigup_market::MarketClient;
use rigup_model::{CreateRequest, Instance, InstanceId, Offer, OfferQuery};
use rigup_wait::{WaitOptions, wait_until_ready};

/// Offer-filter flags shared by `search`, `rent`, and `up`.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Minimum host reliability score (0-1).
    #[arg(long, default_value_t = 0.9)]
    min_reliability: f64,

    /// Minimum CUDA version on the host.
    #[arg(long, default_value_t = 11.7)]
    cuda: f64,

    /// Exact GPU count.
    #[arg(long, default_value_t = 1)]
    num_gpus: u32,

    /// Minimum per-GPU memory in GB.
    #[arg(long, default_value_t = 24.0)]
    min_gpu_ram: f64,

    /// Minimum download bandwidth in Mbps.
    #[arg(long, default_value_t = 700.0)]
    min_inet_down: f64,

    /// Minimum upload bandwidth in Mbps.
    #[arg(long, default_value_t = 500.0)]
    min_inet_up: f64,

    /// Minimum free disk in GB.
    #[arg(long, default_value_t = 50.0)]
    min_disk: f64,

    /// Sort column for the listing.
    #[arg(long, default_value = "dph")]
    order: String,
}

impl QueryArgs {
    pub fn to_query(&self) -> OfferQuery {
        OfferQuery::new()
            .with_min_reliability(self.min_reliability)
            .with_min_cuda(self.cuda)
            .with_num_gpus(self.num_gpus)
            .with_min_gpu_ram(self.min_gpu_ram)
            .with_min_inet_down(self.min_inet_down)
            .with_min_inet_up(self.min_inet_up)
            .with_min_disk(self.min_disk)
            .with_order(self.order.as_str())
    }
}

/// Instance-creation flags shared by `rent` and `up`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Container image to boot.
    #[arg(long, default_value = "pytorch/pytorch:2.0.1-cuda11.7-cudnn8-devel")]
    image: String,

    /// Disk allocation in GB.
    #[arg(long, default_value_t = 50.0)]
    disk: f64,

    /// Shell command to run once on boot.
    #[arg(long)]
    onstart: Option<String>,
}

impl CreateArgs {
    pub fn to_request(&self) -> CreateRequest {
        let mut request = CreateRequest::new(self.image.as_str()).with_disk_gb(self.disk);
        if let Some(cmd) = &self.onstart {
            request = request.with_onstart_cmd(cmd.as_str());
        }
        request
    }
}

/// Polling flags for commands that wait on readiness.
#[derive(Debug, Args)]
pub struct WaitArgs {
    /// Seconds between status polls.
    #[arg(long, default_value_t = 3)]
    poll_interval: u64,

    /// Give up waiting after this many seconds.
    #[arg(long)]
    timeout: Option<u64>,
}

impl WaitArgs {
    pub fn to_options(&self) -> WaitOptions {
        let mut options =
            WaitOptions::new().with_poll_interval(Duration::from_secs(self.poll_interval));
        if let Some(timeout) = self.timeout {
            options = options.with_timeout(Duration::from_secs(timeout));
        }
        options
    }
}

/// Block until the instance reports `running`, then hand back the
/// satisfying snapshot. Already-running instances return on the first
/// poll.
pub async fn wait_for_running(
    client: &MarketClient,
    id: InstanceId,
    wait: &WaitArgs,
) -> anyhow::Result<Instance> {
    info!(instance = id, "waiting for instance to become running");
    let snapshot = wait_until_ready(client, &id, Instance::is_running, &wait.to_options()).await?;
    Ok(snapshot)
}

/// Load a notebook from `notebook` (path or URL) and upload it into the
/// instance's Jupyter server. Returns the tokenized lab link.
///
/// Acts on the snapshot it is given; the caller must pass the one that
/// satisfied the readiness check.
pub async fn push_notebook(
    instance: &Instance,
    notebook: &str,
    name: Option<&str>,
) -> anyhow::Result<String> {
    let source = NotebookSource::parse(notebook);
    let name = match name {
        Some(name) => name.to_string(),
        None => source
            .file_name()
            .context("cannot infer a destination name from the source; pass --name")?,
    };
    let content = source.load().await?;

    let jupyter = JupyterServer::from_instance(instance)?;
    jupyter.upload_notebook(&name, &content).await?;
    Ok(jupyter.lab_url(&name))
}

pub fn print_offers(offers: &[Offer]) {
    println!(
        "{:>10}  {:>7}  {:<18}  {:>4}  {:>8}  {:>8}  {:>8}",
        "offer", "$/hr", "gpu", "gpus", "gpu ram", "down", "up"
    );
    for offer in offers {
        println!(
            "{:>10}  {:>7.3}  {:<18}  {:>4}  {:>8.0}  {:>8.0}  {:>8.0}",
            offer.id,
            offer.dph_total,
            offer.gpu_name.as_deref().unwrap_or("-"),
            offer.num_gpus.unwrap_or(0),
            offer.gpu_ram.unwrap_or(0.0),
            offer.inet_down.unwrap_or(0.0),
            offer.inet_up.unwrap_or(0.0),
        );
    }
}

pub fn print_instance(instance: &Instance) {
    println!(
        "instance {}  {}  gpu {}  ${:.3}/hr",
        instance.id,
        instance.state(),
        instance.gpu_name.as_deref().unwrap_or("-"),
        instance.dph_total.unwrap_or(0.0),
    );
}
