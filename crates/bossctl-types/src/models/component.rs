use crate::record::{Record, declared_from_default};
use crate::value::Fields;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A controller component pod as reported by Kubernetes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentInstance {
    pub namespace: String,
    pub id: String,
    pub name: String,
    pub component: String,
    pub version: String,
    pub ready: String,
    pub restarts: i32,
    pub status: String,
    pub start_time: Option<DateTime<Utc>>,
}

impl Record for ComponentInstance {
    fn fields(&self) -> Fields {
        Fields::new()
            .with("Namespace", self.namespace.clone())
            .with("Id", self.id.clone())
            .with("Name", self.name.clone())
            .with("Component", self.component.clone())
            .with("Version", self.version.clone())
            .with("Ready", self.ready.clone())
            .with("Restarts", self.restarts)
            .with("Status", self.status.clone())
            .with("StartTime", self.start_time)
    }

    fn declared_fields() -> Option<Vec<String>> {
        Some(declared_from_default::<Self>())
    }
}
