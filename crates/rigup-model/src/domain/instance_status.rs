use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle state the marketplace reports for a rented instance.
///
/// The wire value is a free-form lowercase string. States this toolkit
/// does not interpret round-trip through [`InstanceStatus::Unknown`]
/// instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceStatus {
    /// Image is being pulled and the instance is booting.
    Loading,
    /// Instance is up; its Jupyter server and SSH endpoint are live.
    Running,
    /// Instance stopped or was stopped by the host.
    Exited,
    /// Host machine is unreachable.
    Offline,
    /// Any other state, preserved verbatim.
    Unknown(String),
}

impl InstanceStatus {
    /// Readiness in the rent-and-upload flow: only `running` counts.
    pub fn is_ready(&self) -> bool {
        matches!(self, InstanceStatus::Running)
    }

    /// Returns `true` for states the instance won't boot out of.
    pub fn is_terminal(&self) -> bool {
        matches!(self, InstanceStatus::Exited | InstanceStatus::Offline)
    }

    pub fn as_str(&self) -> &str {
        match self {
            InstanceStatus::Loading => "loading",
            InstanceStatus::Running => "running",
            InstanceStatus::Exited => "exited",
            InstanceStatus::Offline => "offline",
            InstanceStatus::Unknown(s) => s,
        }
    }
}

impl From<&str> for InstanceStatus {
    fn from(s: &str) -> Self {
        match s {
            "loading" => InstanceStatus::Loading,
            "running" => InstanceStatus::Running,
            "exited" => InstanceStatus::Exited,
            "offline" => InstanceStatus::Offline,
            other => InstanceStatus::Unknown(other.to_string()),
        }
    }
}

impl From<String> for InstanceStatus {
    fn from(s: String) -> Self {
        InstanceStatus::from(s.as_str())
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for InstanceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InstanceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(InstanceStatus::from(String::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_and_terminal_states() {
        assert!(InstanceStatus::Running.is_ready());
        assert!(!InstanceStatus::Loading.is_ready());
        assert!(!InstanceStatus::Exited.is_ready());

        assert!(InstanceStatus::Exited.is_terminal());
        assert!(InstanceStatus::Offline.is_terminal());
        assert!(!InstanceStatus::Loading.is_terminal());
        assert!(!InstanceStatus::Running.is_terminal());
    }

    #[test]
    fn serde_roundtrip() {
        let json = serde_json::to_string(&InstanceStatus::Running).unwrap();
        assert_eq!(json, r#""running""#);

        let back: InstanceStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, InstanceStatus::Running);
    }

    #[test]
    fn unknown_state_is_preserved_verbatim() {
        let status: InstanceStatus = serde_json::from_str(r#""rebalancing""#).unwrap();
        assert_eq!(status, InstanceStatus::Unknown("rebalancing".to_string()));
        assert_eq!(status.as_str(), "rebalancing");
        assert!(!status.is_ready());
        assert!(!status.is_terminal());
    }
}
