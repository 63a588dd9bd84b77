//! One-shot follow-up actions against a freshly booted instance's
//! Jupyter server.
//!
//! A ready status snapshot carries everything needed to reach the
//! server: the proxy coordinates and an ephemeral access token. This
//! crate turns that snapshot into a handle and performs exactly one
//! authenticated Contents-API `PUT` to place a notebook, plus the
//! tokenized lab link to open it. Nothing here re-fetches status —
//! tokens rotate, so acting on anything but the satisfying snapshot
//! would race.

mod error;
pub use error::JupyterError;

mod notebook;
pub use notebook::NotebookSource;

mod server;
pub use server::JupyterServer;
