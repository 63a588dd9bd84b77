//! `rigup` — rent a GPU instance from the marketplace, wait for it to
//! boot, and push a notebook into its Jupyter server.

use clap::{Parser, Subcommand};

use rigup_market::{ConfigError, MarketClient, MarketConfig, MarketTransport};
use rigup_observe::{LoggerConfig, LoggerFormat, init_logger};

mod commands;

#[derive(Debug, Parser)]
#[command(
    name = "rigup",
    version,
    about = "Rent a GPU instance, wait for it to boot, push a notebook into its Jupyter server"
)]
struct Cli {
    /// Marketplace API key.
    #[arg(long, global = true, env = "RIGUP_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Marketplace API base URL.
    #[arg(long, global = true, env = "RIGUP_API_URL")]
    api_url: Option<url::Url>,

    /// Shell out to this marketplace CLI executable instead of the
    /// REST API.
    #[arg(long, global = true, value_name = "PROGRAM")]
    cli_program: Option<String>,

    /// Log format: text|json.
    #[arg(long, global = true, default_value = "text")]
    log_format: LoggerFormat,

    /// Log level / env-filter directive.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search rentable GPU offers.
    Search(commands::search::SearchArgs),
    /// Accept an offer, create an instance, and wait for it to boot.
    Rent(commands::rent::RentArgs),
    /// Show the current status snapshot of an instance.
    Status(commands::status::StatusArgs),
    /// Print the log tail of an instance.
    Logs(commands::logs::LogsArgs),
    /// Upload a notebook into a running instance's Jupyter server.
    Upload(commands::upload::UploadArgs),
    /// Destroy an instance and end its billing.
    Destroy(commands::destroy::DestroyArgs),
    /// End to end: search, rent, wait, upload, print the lab link.
    Up(commands::up::UpArgs),
}

impl Cli {
    /// Validated marketplace configuration, assembled once at startup.
    fn market_config(&self) -> Result<MarketConfig, ConfigError> {
        let mut config = match &self.api_key {
            Some(key) => MarketConfig::new(key.clone())?,
            None => MarketConfig::from_env()?,
        };
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url.clone());
        }
        if let Some(program) = &self.cli_program {
            config = config.with_transport(MarketTransport::Cli {
                program: program.clone(),
            });
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logger(&LoggerConfig {
        format: cli.log_format,
        level: cli.log_level.clone(),
        ..Default::default()
    })?;

    let client = MarketClient::new(cli.market_config()?)?;
    match &cli.command {
        Command::Search(args) => commands::search::run(&client, args).await,
        Command::Rent(args) => commands::rent::run(&client, args).await,
        Command::Status(args) => commands::status::run(&client, args).await,
        Command::Logs(args) => commands::logs::run(&client, args).await,
        Command::Upload(args) => commands::upload::run(&client, args).await,
        Command::Destroy(args) => commands::destroy::run(&client, args).await,
        Command::Up(args) => commands::up::run(&client, args).await,
    }
}
