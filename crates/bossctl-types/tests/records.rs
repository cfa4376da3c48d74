use bossctl_types::models::{
    AdminState, ComponentInstance, ConnectStatus, Device, OperStatus, Port, PortType,
};
use bossctl_types::{FieldPath, Record, Value};
use pretty_assertions::assert_eq;

#[test]
fn test_device_decodes_protobuf_json() {
    let device: Device = serde_json::from_str(
        r#"{
            "id": "onu-10",
            "type": "brcm_openomci_onu",
            "parentId": "olt-1",
            "parentPortNo": 536870912,
            "serialNumber": "ALPHe3d1cf57",
            "operStatus": "DISCOVERED",
            "reason": "initial-mib-downloaded"
        }"#,
    )
    .unwrap();

    assert_eq!(device.oper_status, OperStatus::Discovered);
    assert_eq!(device.oper_status.number(), 1);

    let fields = device.fields();
    assert_eq!(fields.get("Type").and_then(Value::as_str), Some("brcm_openomci_onu"));
    assert_eq!(fields.get("ParentPortNo").and_then(Value::as_f64), Some(536870912.0));
    assert_eq!(fields.get("OperStatus").map(ToString::to_string).as_deref(), Some("DISCOVERED"));
    assert_eq!(fields.get("AdminState").map(ToString::to_string).as_deref(), Some("UNKNOWN"));
    assert_eq!(fields.get("HostAndPort"), Some(&Value::Null));
}

#[test]
fn test_enums_decode_from_wire_numbers() {
    let device: Device = serde_json::from_str(
        r#"{"id": "a", "adminState": 3, "operStatus": "ACTIVE", "connectStatus": 99}"#,
    )
    .unwrap();
    assert_eq!(device.admin_state, AdminState::Enabled);
    assert_eq!(device.oper_status, OperStatus::Active);
    assert_eq!(device.connect_status, ConnectStatus::Unknown);

    let port: Port = serde_json::from_str(r#"{"portNo": 1, "type": 3, "adminState": null}"#).unwrap();
    assert_eq!(port.port_type, PortType::PonOlt);
    assert_eq!(port.admin_state, AdminState::Unknown);

    let err = serde_json::from_str::<Device>(r#"{"adminState": "SLEEPING"}"#).unwrap_err();
    assert!(err.to_string().contains("SLEEPING"), "{}", err);
}

#[test]
fn test_declared_fields_cover_unset_optionals() {
    let declared = Device::declared_fields().unwrap();
    assert_eq!(declared.first().map(String::as_str), Some("Id"));
    assert!(declared.iter().any(|f| f == "Reason"));
    assert!(declared.iter().any(|f| f == "HostAndPort"));
    assert!(!declared.iter().any(|f| f == "Colour"));
}

#[test]
fn test_port_peers_are_nested_records() {
    let port: Port = serde_json::from_str(
        r#"{"portNo": 536870912, "type": "PON_OLT", "peers": [{"deviceId": "onu-10", "portNo": 536870912}]}"#,
    )
    .unwrap();

    let value = port.to_value();
    assert_eq!(
        value.to_string(),
        "{PortNo:536870912 Label: Type:PON_OLT AdminState:UNKNOWN OperStatus:UNKNOWN DeviceId: Peers:[{DeviceId:onu-10 PortNo:536870912}]}"
    );
}

#[test]
fn test_component_start_time_is_a_timestamp() {
    let component: ComponentInstance =
        serde_json::from_str(r#"{"name": "etcd-0", "startTime": "2024-03-01T00:00:00Z"}"#).unwrap();
    let start = component.fields().get("StartTime").cloned().unwrap();
    assert!(start.as_timestamp().is_some());
    assert_eq!(start.to_string(), "2024-03-01T00:00:00Z");

    let unset: ComponentInstance = serde_json::from_str(r#"{"name": "etcd-0"}"#).unwrap();
    assert!(unset.fields().get("StartTime").unwrap().is_null());
}

#[test]
fn test_field_path_labels() {
    let path = FieldPath::parse(".ImageState.Version").unwrap();
    assert_eq!(path.segments().to_vec(), vec!["ImageState", "Version"]);
    assert_eq!(path.header_label(), "IMAGESTATE.VERSION");

    for bad in ["", ".", "A..B", "A-B"] {
        assert!(FieldPath::parse(bad).is_err(), "{:?}", bad);
    }
}
