use bossctl_format::{Error, OutputAs, PresentationSpec, ResultPipeline};
use bossctl_types::models::{AdapterInstance, AdminState, ConnectStatus, Device, OperStatus, PmConfigs};
use bossctl_types::{Data, Fields};
use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
}

fn pipeline() -> ResultPipeline {
    ResultPipeline::default().with_now(now())
}

fn device(id: &str, device_type: &str, oper: OperStatus) -> Device {
    Device {
        id: id.to_string(),
        device_type: device_type.to_string(),
        root: device_type == "openolt",
        serial_number: format!("SN-{}", id),
        admin_state: AdminState::Enabled,
        oper_status: oper,
        connect_status: ConnectStatus::Reachable,
        ..Default::default()
    }
}

fn devices() -> Data<Device> {
    Data::Many(vec![
        device("olt-2", "openolt", OperStatus::Active),
        device("onu-1", "brcm_openomci_onu", OperStatus::Discovered),
        device("olt-1", "openolt", OperStatus::Active),
    ])
}

fn table(format: &str) -> PresentationSpec {
    PresentationSpec {
        format: format.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_filter_example() {
    let data = Data::Many(vec![
        Fields::new().with("Id", "a").with("State", "ACTIVE"),
        Fields::new().with("Id", "b").with("State", "DOWN"),
    ]);
    let spec = PresentationSpec {
        filter: "State=ACTIVE".to_string(),
        output_as: OutputAs::Json,
        ..Default::default()
    };
    let out = pipeline().render(&data, &spec).unwrap();
    assert_eq!(
        out,
        r#"[
  {
    "Id": "a",
    "State": "ACTIVE"
  }
]
"#
    );
}

#[test]
fn test_device_table_filtered_and_ordered() {
    let spec = PresentationSpec {
        filter: "OperStatus=ACTIVE".to_string(),
        order_by: "Id".to_string(),
        ..table("table{{.Id}}\t{{.Type}}\t{{.Root}}\t{{.SerialNumber}}\t{{.AdminState}}\t{{.OperStatus}}")
    };
    let out = pipeline().render(&devices(), &spec).unwrap();
    insta::assert_snapshot!(out.replace('\t', " | "), @r"
    ID | TYPE | ROOT | SERIALNUMBER | ADMINSTATE | OPERSTATUS
    olt-1 | openolt | true | SN-olt-1 | ENABLED | ACTIVE
    olt-2 | openolt | true | SN-olt-2 | ENABLED | ACTIVE
    ");
}

#[test]
fn test_inspect_single_record() {
    let data = Data::One(device("olt-1", "openolt", OperStatus::Active));
    let spec = table("ID: {{.Id}}\n  TYPE:          {{.Type}}\n  OPERSTATUS:    {{.OperStatus}}");
    let out = pipeline().render(&data, &spec).unwrap();
    assert_eq!(
        out,
        "ID: olt-1\n  TYPE:          openolt\n  OPERSTATUS:    ACTIVE\n"
    );
}

#[test]
fn test_unknown_field_is_rejected_for_typed_records() {
    let err = pipeline()
        .render(&devices(), &table("table{{.Id}}\t{{.Colour}}"))
        .unwrap_err();
    assert!(matches!(err, Error::FieldResolution(_)));
    assert!(err.to_string().contains("Colour"));
}

#[test]
fn test_unknown_field_is_empty_for_untyped_records() {
    let data = Data::Many(vec![Fields::new().with("Id", "x")]);
    let out = pipeline()
        .render(&data, &table("table{{.Id}}|{{.Colour}}|"))
        .unwrap();
    assert_eq!(out, "ID\tCOLOUR\nx||\n");
}

#[test]
fn test_gosince_column_header() {
    let adapter = AdapterInstance {
        id: "openolt_1".to_string(),
        vendor: "VOLTHA OpenOLT".to_string(),
        current_replica: 1,
        total_replicas: 1,
        last_communication: Some(Utc.with_ymd_and_hms(2024, 3, 10, 11, 58, 30).unwrap()),
        ..Default::default()
    };
    let out = pipeline()
        .render(
            &Data::Many(vec![adapter]),
            &table("table{{ .Id }}\t{{ .CurrentReplica }}\t{{ gosince .LastCommunication}}"),
        )
        .unwrap();
    assert_eq!(out, "ID\tCURRENTREPLICA\tLASTCOMMUNICATION\nopenolt_1\t1\t1m30s\n");
}

#[test]
fn test_pm_metrics_range_and_first_element_traversal() {
    let configs: PmConfigs = serde_json::from_str(
        r#"{
            "id": "onu-1",
            "defaultFreq": 60,
            "grouped": false,
            "metrics": [
                {"name": "rx_bytes", "type": "COUNTER", "enabled": true, "sampleFreq": 15},
                {"name": "temperature", "type": "GAUGE", "enabled": false, "sampleFreq": 60}
            ]
        }"#,
    )
    .unwrap();
    let data = Data::One(configs);

    let out = pipeline()
        .render(
            &data,
            &table("{{.Id}} first={{.Metrics.Name}}{{range .Metrics}} {{.Name}}:{{yesno .Enabled}}{{end}}"),
        )
        .unwrap();
    assert_eq!(out, "onu-1 first=rx_bytes rx_bytes:yes temperature:no\n");
}

#[test]
fn test_name_truncation_in_table_only() {
    let data = Data::Many(vec![
        Fields::new().with("Name", "voltha-adapter-openonu-7d9c"),
        Fields::new().with("Name", "etcd-0"),
    ]);
    let spec = PresentationSpec {
        name_limit: 10,
        ..table("{{.Name}}")
    };
    let out = pipeline().render(&data, &spec).unwrap();
    assert_eq!(out, "voltha-ad…\netcd-0\n");

    let yaml = pipeline()
        .render(
            &data,
            &PresentationSpec {
                output_as: OutputAs::Yaml,
                ..spec
            },
        )
        .unwrap();
    assert!(yaml.contains("voltha-adapter-openonu-7d9c"));
}

#[test]
fn test_empty_list_structured() {
    let data: Data<Device> = Data::Many(Vec::new());
    let json = PresentationSpec {
        output_as: OutputAs::Json,
        ..Default::default()
    };
    assert_eq!(pipeline().render(&data, &json).unwrap(), "[]\n");
}
