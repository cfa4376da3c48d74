use crate::record::{Record, declared_from_default};
use crate::value::Fields;
use serde::Deserialize;

proto_enum! {
    pub enum PmType {
        Counter = 0 => "COUNTER",
        Gauge = 1 => "GAUGE",
        State = 2 => "STATE",
        Context = 3 => "CONTEXT",
    }
}

/// A single performance metric and its sampling settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PmConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub pm_type: PmType,
    pub enabled: bool,
    pub sample_freq: u32,
}

impl Record for PmConfig {
    fn fields(&self) -> Fields {
        Fields::new()
            .with("Name", self.name.clone())
            .with("Type", self.pm_type)
            .with("Enabled", self.enabled)
            .with("SampleFreq", self.sample_freq)
    }

    fn declared_fields() -> Option<Vec<String>> {
        Some(declared_from_default::<Self>())
    }
}

/// A named group of metrics collected together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PmGroupConfig {
    pub group_name: String,
    pub group_freq: u32,
    pub enabled: bool,
    pub metrics: Vec<PmConfig>,
}

impl Record for PmGroupConfig {
    fn fields(&self) -> Fields {
        Fields::new()
            .with("GroupName", self.group_name.clone())
            .with("GroupFreq", self.group_freq)
            .with("Enabled", self.enabled)
            .with("Metrics", metric_fields(&self.metrics))
    }

    fn declared_fields() -> Option<Vec<String>> {
        Some(declared_from_default::<Self>())
    }
}

/// The complete PM configuration of one device.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PmConfigs {
    pub id: String,
    pub default_freq: u32,
    pub grouped: bool,
    pub freq_override: bool,
    pub groups: Vec<PmGroupConfig>,
    pub metrics: Vec<PmConfig>,
}

impl Record for PmConfigs {
    fn fields(&self) -> Fields {
        Fields::new()
            .with("Id", self.id.clone())
            .with("DefaultFreq", self.default_freq)
            .with("Grouped", self.grouped)
            .with("FreqOverride", self.freq_override)
            .with(
                "Groups",
                self.groups.iter().map(Record::fields).collect::<Vec<_>>(),
            )
            .with("Metrics", metric_fields(&self.metrics))
    }

    fn declared_fields() -> Option<Vec<String>> {
        Some(declared_from_default::<Self>())
    }
}

fn metric_fields(metrics: &[PmConfig]) -> Vec<Fields> {
    metrics.iter().map(Record::fields).collect()
}
