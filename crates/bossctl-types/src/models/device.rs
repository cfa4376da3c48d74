use crate::record::{Record, declared_from_default};
use crate::value::Fields;
use serde::Deserialize;

proto_enum! {
    /// Administrative state requested by the operator.
    pub enum AdminState {
        Unknown = 0 => "UNKNOWN",
        Preprovisioned = 1 => "PREPROVISIONED",
        Enabled = 3 => "ENABLED",
        Disabled = 2 => "DISABLED",
        DownloadingImage = 4 => "DOWNLOADING_IMAGE",
    }
}

proto_enum! {
    /// Operational state reported by the adapter.
    pub enum OperStatus {
        Unknown = 0 => "UNKNOWN",
        Discovered = 1 => "DISCOVERED",
        Activating = 2 => "ACTIVATING",
        Testing = 3 => "TESTING",
        Active = 4 => "ACTIVE",
        Failed = 5 => "FAILED",
        Reconciling = 6 => "RECONCILING",
        ReconcilingFailed = 7 => "RECONCILING_FAILED",
    }
}

proto_enum! {
    /// Reachability of the device from the core.
    pub enum ConnectStatus {
        Unknown = 0 => "UNKNOWN",
        Unreachable = 1 => "UNREACHABLE",
        Reachable = 2 => "REACHABLE",
    }
}

/// An OLT or ONU known to the controller.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    pub id: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub root: bool,
    pub parent_id: String,
    pub parent_port_no: u32,
    pub vendor: String,
    pub model: String,
    pub hardware_version: String,
    pub firmware_version: String,
    pub serial_number: String,
    pub vendor_id: String,
    pub adapter_endpoint: String,
    pub vlan: u32,
    pub mac_address: String,
    pub host_and_port: Option<String>,
    pub admin_state: AdminState,
    pub oper_status: OperStatus,
    pub reason: Option<String>,
    pub connect_status: ConnectStatus,
}

impl Record for Device {
    fn fields(&self) -> Fields {
        Fields::new()
            .with("Id", self.id.clone())
            .with("Type", self.device_type.clone())
            .with("Root", self.root)
            .with("ParentId", self.parent_id.clone())
            .with("ParentPortNo", self.parent_port_no)
            .with("Vendor", self.vendor.clone())
            .with("Model", self.model.clone())
            .with("HardwareVersion", self.hardware_version.clone())
            .with("FirmwareVersion", self.firmware_version.clone())
            .with("SerialNumber", self.serial_number.clone())
            .with("VendorId", self.vendor_id.clone())
            .with("AdapterEndpoint", self.adapter_endpoint.clone())
            .with("Vlan", self.vlan)
            .with("MacAddress", self.mac_address.clone())
            .with("HostAndPort", self.host_and_port.clone())
            .with("AdminState", self.admin_state)
            .with("OperStatus", self.oper_status)
            .with("Reason", self.reason.clone())
            .with("ConnectStatus", self.connect_status)
    }

    fn declared_fields() -> Option<Vec<String>> {
        Some(declared_from_default::<Self>())
    }
}
