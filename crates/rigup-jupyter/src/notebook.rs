use std::path::PathBuf;

use serde_json::Value;

use crate::error::JupyterError;

/// Where a notebook document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotebookSource {
    /// Notebook file on the local filesystem.
    File(PathBuf),
    /// Raw notebook URL fetched over HTTP.
    Url(String),
}

impl NotebookSource {
    /// `http(s)://` strings are URLs, everything else is a local path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            NotebookSource::Url(raw.to_string())
        } else {
            NotebookSource::File(PathBuf::from(raw))
        }
    }

    /// Destination file name implied by the source.
    pub fn file_name(&self) -> Option<String> {
        match self {
            NotebookSource::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            NotebookSource::Url(url) => url
                .rsplit('/')
                .next()
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        }
    }

    /// Load and parse the notebook document.
    pub async fn load(&self) -> Result<Value, JupyterError> {
        match self {
            NotebookSource::File(path) => {
                let raw = tokio::fs::read_to_string(path).await.map_err(|source| {
                    JupyterError::ReadNotebook {
                        path: path.clone(),
                        source,
                    }
                })?;
                serde_json::from_str(&raw)
                    .map_err(|source| JupyterError::InvalidNotebook { source })
            }
            NotebookSource::Url(url) => {
                let response = reqwest::get(url).await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(JupyterError::Api {
                        status: status.as_u16(),
                        body: response.text().await.unwrap_or_default(),
                    });
                }
                Ok(response.json().await?)
            }
        }
    }
}
