use thiserror::Error;

use rigup_model::InstanceId;

use crate::config::ConfigError;

/// Failures of marketplace calls.
///
/// Transport and API failures are surfaced immediately; nothing in this
/// crate retries. The readiness waiter treats a missing instance as
/// transient, so [`MarketError::InstanceNotFound`] only comes out of
/// the strict single-instance lookup.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("marketplace rejected the call: status {status}, body {body:?}")]
    Api { status: u16, body: String },

    #[error("marketplace acknowledged {0} without success")]
    Rejected(&'static str),

    #[error("failed to decode {context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to spawn marketplace CLI {program:?}: {source}")]
    CliSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("marketplace CLI exited with code {code}: {stderr}")]
    CliExit { code: i32, stderr: String },

    #[error("no offers matched the search query")]
    NoOffers,

    #[error("instance {0} not found in the account listing")]
    InstanceNotFound(InstanceId),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
