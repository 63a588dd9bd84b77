use serde::{Deserialize, Serialize};

/// Parameters for turning an accepted offer into a running instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRequest {
    /// Container image the instance boots.
    pub image: String,
    /// Disk allocation in GB.
    pub disk_gb: f64,
    /// Shell command executed once when the instance starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onstart_cmd: Option<String>,
    /// Start a Jupyter server inside the instance.
    #[serde(default)]
    pub jupyter: bool,
    /// Serve JupyterLab instead of the classic notebook UI.
    #[serde(default)]
    pub jupyter_lab: bool,
    /// Extra environment variables for the container.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<(String, String)>,
}

impl CreateRequest {
    /// A Jupyter-enabled instance with a modest disk. Every knob has a
    /// `with_*` override.
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            disk_gb: 10.0,
            onstart_cmd: None,
            jupyter: true,
            jupyter_lab: true,
            env: Vec::new(),
        }
    }

    pub fn with_disk_gb(mut self, disk_gb: f64) -> Self {
        self.disk_gb = disk_gb;
        self
    }

    pub fn with_onstart_cmd(mut self, cmd: impl Into<String>) -> Self {
        self.onstart_cmd = Some(cmd.into());
        self
    }

    pub fn with_jupyter(mut self, jupyter: bool) -> Self {
        self.jupyter = jupyter;
        self
    }

    pub fn with_jupyter_lab(mut self, jupyter_lab: bool) -> Self {
        self.jupyter_lab = jupyter_lab;
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}
