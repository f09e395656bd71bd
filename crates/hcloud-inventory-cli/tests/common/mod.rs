use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use hcloud_inventory_client::testing::MockApi;
use tempfile::TempDir;

pub const BIN: &str = "ansible-hcloud-inventory";

/// Command with a clean environment: no token, no endpoint override and a
/// config path that does not exist.
pub fn inventory_cmd() -> Command {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.env_remove("HETZNER_CLOUD_KEY")
        .env_remove("HCLOUD_ENDPOINT")
        .env_remove("RUST_LOG")
        .env(
            "HCLOUD_INVENTORY_CONFIG",
            "/nonexistent/ansible-hcloud-inventory/config.json",
        );
    cmd
}

/// API stub serving the two-server fleet used across the CLI tests
pub fn sample_fleet_api() -> MockApi {
    MockApi::single(200, SAMPLE_FLEET).unwrap()
}

/// First request head, lowercased for header matching
#[allow(dead_code)]
pub fn first_request(api: &MockApi) -> String {
    api.requests()
        .first()
        .map(|head| head.to_lowercase())
        .unwrap_or_default()
}

pub const SAMPLE_FLEET: &str = r#"{
    "servers": [
        {
            "id": 1,
            "name": "a",
            "labels": {"env": "prod"},
            "public_net": {"ipv4": {"ip": "203.0.113.1", "dns_ptr": "a.example"}},
            "datacenter": {"name": "nbg1-dc3", "location": {"name": "nbg1"}}
        },
        {
            "id": 2,
            "name": "b",
            "labels": {},
            "public_net": {"ipv4": {"ip": "203.0.113.2", "dns_ptr": "b.example"}},
            "datacenter": {"name": "xx-dc1", "location": {"name": "xx"}}
        }
    ],
    "meta": {"pagination": {"page": 1, "per_page": 50, "next_page": null}}
}"#;

#[allow(dead_code)]
pub struct ConfigDir {
    pub root: TempDir,
}

#[allow(dead_code)]
impl ConfigDir {
    pub fn with_config(content: &str) -> Self {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("config.json"), content).unwrap();
        Self { root }
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().join("config.json")
    }
}
