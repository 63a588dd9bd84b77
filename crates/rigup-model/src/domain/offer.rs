use serde::{Deserialize, Serialize};

use crate::OfferId;

/// One rentable machine in an offer-search result.
///
/// Only the fields this toolkit selects and displays are modeled; the
/// marketplace returns dozens more, which deserialization ignores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    /// Total rental price, dollars per hour.
    pub dph_total: f64,
    #[serde(default)]
    pub gpu_name: Option<String>,
    #[serde(default)]
    pub num_gpus: Option<u32>,
    /// Per-GPU memory as reported by the marketplace.
    #[serde(default)]
    pub gpu_ram: Option<f64>,
    #[serde(default)]
    pub cpu_ram: Option<f64>,
    #[serde(default)]
    pub disk_space: Option<f64>,
    #[serde(default)]
    pub inet_up: Option<f64>,
    #[serde(default)]
    pub inet_down: Option<f64>,
    #[serde(default)]
    pub cuda_max_good: Option<f64>,
    /// Host reliability score in `[0, 1]`.
    #[serde(default, alias = "reliability2")]
    pub reliability: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_listing_with_extra_fields() {
        let json = r#"{
            "id": 5201968,
            "dph_total": 0.312,
            "gpu_name": "RTX 3090",
            "num_gpus": 1,
            "gpu_ram": 24576.0,
            "cuda_max_good": 12.2,
            "reliability2": 0.987,
            "hosting_type": 1,
            "verification": "verified"
        }"#;

        let offer: Offer = serde_json::from_str(json).unwrap();
        assert_eq!(offer.id, 5201968);
        assert_eq!(offer.gpu_name.as_deref(), Some("RTX 3090"));
        assert_eq!(offer.reliability, Some(0.987));
        assert_eq!(offer.inet_down, None);
    }

    #[test]
    fn missing_required_fields_fail_fast() {
        let json = r#"{"gpu_name": "RTX 3090"}"#;
        assert!(serde_json::from_str::<Offer>(json).is_err());
    }
}
