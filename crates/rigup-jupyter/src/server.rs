use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::info;

use rigup_model::Instance;

use crate::error::JupyterError;

/// Proxy through which marketplace instances expose their Jupyter
/// servers.
const DEFAULT_PROXY_BASE: &str = "https://jupyter.vast.ai/jm";

/// Characters percent-encoded in Contents-API paths. Unreserved
/// characters and `/` stay literal.
const PATH_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Handle to the Jupyter server of one ready instance.
///
/// Constructed from the snapshot that satisfied the readiness
/// predicate. The token is ephemeral; it lives exactly as long as this
/// handle's usefulness.
#[derive(Debug)]
pub struct JupyterServer {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl JupyterServer {
    /// Connection info from a ready snapshot, via the default proxy.
    pub fn from_instance(instance: &Instance) -> Result<Self, JupyterError> {
        Self::from_instance_via(DEFAULT_PROXY_BASE, instance)
    }

    /// Same, against a non-default proxy gateway.
    pub fn from_instance_via(
        proxy_base: &str,
        instance: &Instance,
    ) -> Result<Self, JupyterError> {
        let idx = instance
            .ssh_idx
            .as_deref()
            .ok_or(JupyterError::NotReady("ssh_idx"))?;
        let port = instance.ssh_port.ok_or(JupyterError::NotReady("ssh_port"))?;
        let token = instance
            .jupyter_token
            .clone()
            .ok_or(JupyterError::NotReady("jupyter_token"))?;

        Ok(Self {
            base_url: format!("{}/{idx}/{port}", proxy_base.trim_end_matches('/')),
            token,
            http: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Place a notebook document at `name` in the server's root.
    ///
    /// Exactly one authenticated `PUT` against the Contents API; the
    /// server creates or overwrites the file in place.
    pub async fn upload_notebook(
        &self,
        name: &str,
        content: &serde_json::Value,
    ) -> Result<(), JupyterError> {
        let dst = format!(
            "{}/api/contents/{}",
            self.base_url,
            utf8_percent_encode(name, PATH_SET)
        );
        let body = serde_json::json!({
            "content": content,
            "name": file_name(name),
            "path": name,
            "format": "json",
            "type": "notebook",
        });

        let response = self
            .http
            .put(&dst)
            .header("Authorization", format!("token {}", self.token))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JupyterError::Api {
                status: status.as_u16(),
                body,
            });
        }
        info!(name, "notebook uploaded");
        Ok(())
    }

    /// Tokenized link to the server root.
    pub fn entry_url(&self) -> String {
        format!("{}?token={}", self.base_url, self.token)
    }

    /// Tokenized link that opens `name` in JupyterLab.
    pub fn lab_url(&self, name: &str) -> String {
        format!(
            "{}/lab/tree/{}?token={}",
            self.base_url,
            utf8_percent_encode(name, PATH_SET),
            self.token
        )
    }
}

/// Final component of a destination path.
fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
