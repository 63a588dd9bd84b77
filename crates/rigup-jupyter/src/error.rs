use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JupyterError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("jupyter server rejected the call: status {status}, body {body:?}")]
    Api { status: u16, body: String },

    #[error("instance snapshot has no {0}; jupyter server not reachable yet")]
    NotReady(&'static str),

    #[error("failed to read notebook {path:?}: {source}")]
    ReadNotebook {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("notebook is not valid JSON: {source}")]
    InvalidNotebook {
        #[source]
        source: serde_json::Error,
    },
}
