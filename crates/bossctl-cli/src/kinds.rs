//! The result kinds `bossctl render` understands, with their built-in
//! presentation defaults.

use anyhow::{Context, Result};
use bossctl_format::{CommandDefaults, PresentationSpec, ResultPipeline};
use bossctl_types::models::{
    AdapterInstance, ComponentInstance, Device, PmConfig, PmConfigs, PmGroupConfig, Port,
};
use bossctl_types::{Data, Record, Value};
use clap::ValueEnum;
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub const DEVICE_LIST_FORMAT: &str = "table{{ .Id }}\t{{.Type}}\t{{.Root}}\t{{.ParentId}}\t{{.SerialNumber}}\t{{.AdminState}}\t{{.OperStatus}}\t{{.ConnectStatus}}\t{{.Reason}}";
pub const DEVICE_PORTS_FORMAT: &str =
    "table{{.PortNo}}\t{{.Label}}\t{{.Type}}\t{{.AdminState}}\t{{.OperStatus}}\t{{.DeviceId}}\t{{.Peers}}";
pub const DEVICE_INSPECT_FORMAT: &str = "ID: {{.Id}}
  TYPE:          {{.Type}}
  ROOT:          {{.Root}}
  PARENTID:      {{.ParentId}}
  SERIALNUMBER:  {{.SerialNumber}}
  VLAN:          {{.Vlan}}
  ADMINSTATE:    {{.AdminState}}
  OPERSTATUS:    {{.OperStatus}}
  CONNECTSTATUS: {{.ConnectStatus}}";
pub const ADAPTER_LIST_FORMAT: &str = "table{{ .Id }}\t{{ .Vendor }}\t{{ .Type }}\t{{ .Endpoint }}\t{{ .Version }}\t{{ .CurrentReplica }}\t{{ .TotalReplicas }}\t{{ gosince .LastCommunication}}";
pub const COMPONENT_LIST_FORMAT: &str = "table{{.Namespace}}\t{{.Id}}\t{{.Name}}\t{{.Component}}\t{{.Version}}\t{{.Ready}}\t{{.Restarts}}\t{{.Status}}\t{{gosince .StartTime}}";
pub const PMCONFIG_GET_FORMAT: &str = "table{{.DefaultFreq}}\t{{.Grouped}}\t{{.FreqOverride}}";
pub const PMCONFIG_METRIC_LIST_FORMAT: &str =
    "table{{.Name}}\t{{.Type}}\t{{.Enabled}}\t{{.SampleFreq}}";
pub const PMCONFIG_GROUP_LIST_FORMAT: &str = "table{{.GroupName}}\t{{.Enabled}}\t{{.GroupFreq}}";
pub const RAW_FORMAT: &str = "{{json .}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResultKind {
    DeviceList,
    DevicePorts,
    DeviceInspect,
    AdapterList,
    ComponentList,
    DevicePmconfigGet,
    DevicePmconfigMetricList,
    DevicePmconfigGroupList,
    Raw,
}

impl ResultKind {
    /// Configuration key of this kind, e.g. `device-list`.
    pub fn command_name(&self) -> &'static str {
        match self {
            ResultKind::DeviceList => "device-list",
            ResultKind::DevicePorts => "device-ports",
            ResultKind::DeviceInspect => "device-inspect",
            ResultKind::AdapterList => "adapter-list",
            ResultKind::ComponentList => "component-list",
            ResultKind::DevicePmconfigGet => "device-pmconfig-get",
            ResultKind::DevicePmconfigMetricList => "device-pmconfig-metric-list",
            ResultKind::DevicePmconfigGroupList => "device-pmconfig-group-list",
            ResultKind::Raw => "raw",
        }
    }

    /// Built-in format, order, name column and quiet column of this kind.
    pub fn defaults(&self) -> CommandDefaults {
        let name = self.command_name();
        match self {
            ResultKind::DeviceList => {
                CommandDefaults::new(name, DEVICE_LIST_FORMAT).with_name_field("Id")
            }
            ResultKind::DevicePorts => CommandDefaults::new(name, DEVICE_PORTS_FORMAT)
                .with_name_field("Label")
                .with_quiet_field("PortNo"),
            ResultKind::DeviceInspect => {
                CommandDefaults::new(name, DEVICE_INSPECT_FORMAT).with_name_field("Id")
            }
            ResultKind::AdapterList => {
                CommandDefaults::new(name, ADAPTER_LIST_FORMAT).with_name_field("Id")
            }
            ResultKind::ComponentList => {
                CommandDefaults::new(name, COMPONENT_LIST_FORMAT).with_quiet_field("Name")
            }
            ResultKind::DevicePmconfigGet => {
                CommandDefaults::new(name, PMCONFIG_GET_FORMAT).with_name_field("Id")
            }
            ResultKind::DevicePmconfigMetricList => {
                CommandDefaults::new(name, PMCONFIG_METRIC_LIST_FORMAT).with_quiet_field("Name")
            }
            ResultKind::DevicePmconfigGroupList => {
                CommandDefaults::new(name, PMCONFIG_GROUP_LIST_FORMAT)
                    .with_name_field("GroupName")
                    .with_quiet_field("GroupName")
            }
            ResultKind::Raw => CommandDefaults::new(name, RAW_FORMAT),
        }
    }

    /// Decode `input` (JSON) as this kind's result and render it.
    pub fn render(
        &self,
        input: &str,
        pipeline: &ResultPipeline,
        spec: &PresentationSpec,
    ) -> Result<String> {
        match self {
            ResultKind::DeviceList => render_list::<Device>(input, pipeline, spec),
            ResultKind::DevicePorts => render_list::<Port>(input, pipeline, spec),
            ResultKind::AdapterList => render_list::<AdapterInstance>(input, pipeline, spec),
            ResultKind::ComponentList => render_list::<ComponentInstance>(input, pipeline, spec),
            ResultKind::DeviceInspect => render_one::<Device>(input, pipeline, spec),
            ResultKind::DevicePmconfigGet => render_one::<PmConfigs>(input, pipeline, spec),
            ResultKind::DevicePmconfigMetricList => {
                let configs: PmConfigs = decode(input)?;
                Ok(pipeline.render::<PmConfig>(&Data::Many(configs.metrics), spec)?)
            }
            ResultKind::DevicePmconfigGroupList => {
                let configs: PmConfigs = decode(input)?;
                Ok(pipeline.render::<PmGroupConfig>(&Data::Many(configs.groups), spec)?)
            }
            ResultKind::Raw => Ok(pipeline.render(&raw_data(input)?, spec)?),
        }
    }
}

/// A list response: either a bare array or the `{"items": [...]}` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListInput<T> {
    Bare(Vec<T>),
    Envelope { items: Vec<T> },
}

impl<T> ListInput<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            ListInput::Bare(items) | ListInput::Envelope { items } => items,
        }
    }
}

fn decode<T: DeserializeOwned>(input: &str) -> Result<T> {
    serde_json::from_str(input).context("Failed to parse input as JSON")
}

fn render_list<R>(input: &str, pipeline: &ResultPipeline, spec: &PresentationSpec) -> Result<String>
where
    R: Record + DeserializeOwned,
{
    let items = decode::<ListInput<R>>(input)?.into_items();
    Ok(pipeline.render(&Data::Many(items), spec)?)
}

fn render_one<R>(input: &str, pipeline: &ResultPipeline, spec: &PresentationSpec) -> Result<String>
where
    R: Record + DeserializeOwned,
{
    let record = decode::<R>(input)?;
    Ok(pipeline.render(&Data::One(record), spec)?)
}

fn raw_data(input: &str) -> Result<Data<Value>> {
    let json: serde_json::Value = decode(input)?;
    Ok(match Value::from(json) {
        Value::List(items) => Data::Many(items),
        other => Data::One(other),
    })
}
