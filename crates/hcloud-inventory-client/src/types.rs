//! Hetzner Cloud API response types
//!
//! Only the fields the inventory needs are modelled; everything else in the
//! server objects is ignored.

use std::collections::BTreeMap;

use hcloud_inventory::ServerRecord;
use serde::Deserialize;

/// One page of `GET /servers`
#[derive(Debug, Clone, Deserialize)]
pub struct ServersPage {
    pub servers: Vec<Server>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

impl ServersPage {
    /// Page number of the following page, if any
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        self.meta
            .as_ref()
            .and_then(|m| m.pagination.as_ref())
            .and_then(|p| p.next_page)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub previous_page: Option<u32>,
    pub next_page: Option<u32>,
    pub last_page: Option<u32>,
    pub total_entries: Option<u32>,
}

/// A cloud server
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    pub public_net: PublicNet,
    pub datacenter: Datacenter,
}

impl Server {
    /// Reverse-DNS pointer of the primary IPv4 address
    ///
    /// Empty when the server has no public IPv4 address or no pointer is set.
    #[must_use]
    pub fn dns_ptr(&self) -> &str {
        self.public_net
            .ipv4
            .as_ref()
            .and_then(|ip| ip.dns_ptr.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublicNet {
    #[serde(default)]
    pub ipv4: Option<Ipv4>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ipv4 {
    pub ip: String,
    #[serde(default)]
    pub dns_ptr: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Datacenter {
    pub name: String,
    pub location: DatacenterLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatacenterLocation {
    pub name: String,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl From<Server> for ServerRecord {
    fn from(server: Server) -> Self {
        Self {
            hostname: server.dns_ptr().to_string(),
            labels: server.labels,
            location: server.datacenter.location.name,
        }
    }
}
