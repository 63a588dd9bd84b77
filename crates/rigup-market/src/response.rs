use serde::Deserialize;

use rigup_model::InstanceId;

/// Acknowledgment of an instance creation.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateResponse {
    #[serde(default)]
    pub success: Option<bool>,
    pub new_contract: InstanceId,
}

/// Plain `{"success": bool}` acknowledgment.
#[derive(Debug, Deserialize)]
pub(crate) struct AckResponse {
    #[serde(default)]
    pub success: bool,
}
