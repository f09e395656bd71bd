use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use hcloud_inventory::render::INI_HEADER;
use hcloud_inventory::{
    Group, Inventory, InventoryCollector, InventoryError, ServerLister, ServerRecord,
};

// Mock implementations
struct MockLister {
    servers: Vec<ServerRecord>,
}

#[async_trait]
impl ServerLister for MockLister {
    async fn list_servers(&self) -> Result<Vec<ServerRecord>, InventoryError> {
        Ok(self.servers.clone())
    }

    fn lister_type(&self) -> &'static str {
        "mock"
    }
}

async fn collect(servers: Vec<ServerRecord>) -> Inventory {
    InventoryCollector::new(Arc::new(MockLister { servers }))
        .collect()
        .await
        .unwrap()
}

fn parse(inventory: &Inventory) -> Value {
    serde_json::from_str(&inventory.to_json().unwrap()).unwrap()
}

fn mixed_fleet() -> Vec<ServerRecord> {
    vec![
        ServerRecord::new("web1.example", "nbg1")
            .with_label("env", "prod")
            .with_label("role", "web"),
        ServerRecord::new("web2.example", "hel1").with_label("env", "prod"),
        ServerRecord::new("db1.example", "fsn1").with_label("role", "db"),
        ServerRecord::new("edge1.example", "ash"),
        ServerRecord::new("edge2.example", "hil"),
        ServerRecord::new("web3.example", "nbg1"),
    ]
}

#[tokio::test]
async fn test_all_children_is_fixed() {
    for servers in [Vec::new(), mixed_fleet()] {
        let value = parse(&collect(servers).await);
        let children: Vec<&str> = value["all"]["children"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(children, ["nbg1", "hel1", "fsn1", "ungrouped"]);
    }
}

#[tokio::test]
async fn test_partition_of_mixed_fleet() {
    let value = parse(&collect(mixed_fleet()).await);

    assert_eq!(
        value["nbg1"]["hosts"],
        serde_json::json!(["web1.example", "web3.example"])
    );
    assert_eq!(value["hel1"]["hosts"], serde_json::json!(["web2.example"]));
    assert_eq!(value["fsn1"]["hosts"], serde_json::json!(["db1.example"]));
    assert_eq!(
        value["ungrouped"]["hosts"],
        serde_json::json!(["edge1.example", "edge2.example"])
    );
    assert_eq!(
        value["_meta"]["hostvars"]["web1.example"],
        serde_json::json!({ "env": "prod", "role": "web" })
    );
    assert_eq!(
        value["_meta"]["hostvars"]["edge1.example"],
        serde_json::json!({})
    );
}

#[tokio::test]
async fn test_empty_fleet_renders() {
    let inventory = collect(Vec::new()).await;
    let value = parse(&inventory);

    assert_eq!(value["_meta"]["hostvars"], serde_json::json!({}));
    for group in Group::ALL {
        assert_eq!(value[group.name()]["hosts"], serde_json::json!([]));
    }

    let ini = inventory.to_ini();
    let lines: Vec<&str> = ini.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines, [INI_HEADER, "[nbg1]", "[hel1]", "[fsn1]"]);
}

#[tokio::test]
async fn test_host_lookup_scenario() {
    let inventory = collect(vec![
        ServerRecord::new("a.example", "nbg1").with_label("env", "prod"),
        ServerRecord::new("b.example", "xx"),
    ])
    .await;

    assert_eq!(inventory.host_json("b.example").unwrap().as_deref(), Some("{}"));
    assert!(inventory.host_json("missing.example").unwrap().is_none());
}
