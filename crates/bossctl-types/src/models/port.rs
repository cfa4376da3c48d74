use super::{AdminState, OperStatus};
use crate::record::{Record, declared_from_default};
use crate::value::Fields;
use serde::Deserialize;

proto_enum! {
    pub enum PortType {
        Unknown = 0 => "UNKNOWN",
        EthernetNni = 1 => "ETHERNET_NNI",
        EthernetUni = 2 => "ETHERNET_UNI",
        PonOlt = 3 => "PON_OLT",
        PonOnu = 4 => "PON_ONU",
        VenetOlt = 5 => "VENET_OLT",
        VenetOnu = 6 => "VENET_ONU",
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PeerPort {
    pub device_id: String,
    pub port_no: u32,
}

impl Record for PeerPort {
    fn fields(&self) -> Fields {
        Fields::new()
            .with("DeviceId", self.device_id.clone())
            .with("PortNo", self.port_no)
    }
}

/// A logical or physical port of a device.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Port {
    pub port_no: u32,
    pub label: String,
    #[serde(rename = "type")]
    pub port_type: PortType,
    pub admin_state: AdminState,
    pub oper_status: OperStatus,
    pub device_id: String,
    pub peers: Vec<PeerPort>,
}

impl Record for Port {
    fn fields(&self) -> Fields {
        Fields::new()
            .with("PortNo", self.port_no)
            .with("Label", self.label.clone())
            .with("Type", self.port_type)
            .with("AdminState", self.admin_state)
            .with("OperStatus", self.oper_status)
            .with("DeviceId", self.device_id.clone())
            .with(
                "Peers",
                self.peers.iter().map(Record::fields).collect::<Vec<_>>(),
            )
    }

    fn declared_fields() -> Option<Vec<String>> {
        Some(declared_from_default::<Self>())
    }
}
