//! Client for the GPU rental marketplace.
//!
//! Every lifecycle operation (search offers, create, list, logs,
//! destroy) is available over two transports: direct calls against the
//! marketplace's REST API, or the vendor's CLI executable in `--raw`
//! JSON mode. Responses cross into typed [`rigup_model`] records at
//! this boundary, and the client doubles as the status source the
//! readiness waiter polls.

mod client;
pub use client::MarketClient;

mod config;
pub use config::{ConfigError, ENV_API_KEY, ENV_API_URL, MarketConfig, MarketTransport};

mod errors;
pub use errors::MarketError;

mod cli;
mod http;
mod response;
