use rigup_wait::Tracked;
use serde::{Deserialize, Serialize};

use crate::{InstanceId, InstanceStatus};

/// One status snapshot of a rented instance.
///
/// This is what the marketplace's listing endpoint returns: a fresh,
/// independent view per poll, never merged across polls. Connection
/// fields (`ssh_idx`, `ssh_port`, `jupyter_token`) appear only once the
/// instance starts booting and may rotate; follow-up actions must use
/// the same snapshot that satisfied their readiness check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub id: InstanceId,
    /// Observed lifecycle state; absent until the host first reports.
    #[serde(default)]
    pub actual_status: Option<InstanceStatus>,
    /// Proxy index of the instance's Jupyter endpoint.
    #[serde(default)]
    pub ssh_idx: Option<String>,
    #[serde(default)]
    pub ssh_port: Option<u16>,
    #[serde(default)]
    pub jupyter_token: Option<String>,
    #[serde(default)]
    pub gpu_name: Option<String>,
    #[serde(default)]
    pub dph_total: Option<f64>,
    #[serde(default)]
    pub image_uuid: Option<String>,
}

impl Instance {
    /// Readiness predicate for rent-and-upload flows.
    pub fn is_running(&self) -> bool {
        self.actual_status
            .as_ref()
            .is_some_and(InstanceStatus::is_ready)
    }

    /// Display state, `"unknown"` until the host has reported one.
    pub fn state(&self) -> &str {
        self.actual_status
            .as_ref()
            .map_or("unknown", InstanceStatus::as_str)
    }
}

impl Tracked for Instance {
    type Handle = InstanceId;

    fn handle(&self) -> InstanceId {
        self.id
    }
}
