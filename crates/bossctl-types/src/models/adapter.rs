use crate::record::{Record, declared_from_default};
use crate::value::Fields;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A running adapter replica registered with the core.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdapterInstance {
    pub id: String,
    pub vendor: String,
    #[serde(rename = "type")]
    pub adapter_type: String,
    pub endpoint: String,
    pub version: String,
    pub current_replica: i32,
    pub total_replicas: i32,
    pub last_communication: Option<DateTime<Utc>>,
}

impl Record for AdapterInstance {
    fn fields(&self) -> Fields {
        Fields::new()
            .with("Id", self.id.clone())
            .with("Vendor", self.vendor.clone())
            .with("Type", self.adapter_type.clone())
            .with("Endpoint", self.endpoint.clone())
            .with("Version", self.version.clone())
            .with("CurrentReplica", self.current_replica)
            .with("TotalReplicas", self.total_replicas)
            .with("LastCommunication", self.last_communication)
    }

    fn declared_fields() -> Option<Vec<String>> {
        Some(declared_from_default::<Self>())
    }
}
