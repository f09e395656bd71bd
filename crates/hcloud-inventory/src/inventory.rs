//! Grouped inventory built from a server listing

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::types::{Group, HostVars, ServerRecord};

/// Ansible inventory: host variables plus hosts bucketed by location
///
/// Built once from a server listing and not modified afterwards. Every group in
/// [`Group::ALL`] is always present, even when it holds no hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    host_vars: BTreeMap<String, HostVars>,
    groups: HashMap<Group, Vec<String>>,
}

impl Inventory {
    /// Create an inventory with all groups present and empty
    #[must_use]
    pub fn new() -> Self {
        Self {
            host_vars: BTreeMap::new(),
            groups: Group::ALL.into_iter().map(|g| (g, Vec::new())).collect(),
        }
    }

    /// Build an inventory from servers in API response order
    ///
    /// Hosts keep their input order within a group. A hostname seen twice is
    /// listed twice and its variables are taken from the later record.
    pub fn from_servers(servers: impl IntoIterator<Item = ServerRecord>) -> Self {
        let mut inventory = Self::new();

        for server in servers {
            let group = Group::for_location(&server.location);
            debug!(
                hostname = %server.hostname,
                location = %server.location,
                group = %group,
                "adding host"
            );

            inventory
                .host_vars
                .insert(server.hostname.clone(), server.labels);
            inventory
                .groups
                .entry(group)
                .or_default()
                .push(server.hostname);
        }

        inventory
    }

    /// Hosts in a group, in insertion order
    #[must_use]
    pub fn hosts(&self, group: Group) -> &[String] {
        self.groups
            .get(&group)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Variables of a single host
    #[must_use]
    pub fn host_vars(&self, hostname: &str) -> Option<&HostVars> {
        self.host_vars.get(hostname)
    }

    /// Variables of all hosts, keyed by hostname
    #[must_use]
    pub fn all_host_vars(&self) -> &BTreeMap<String, HostVars> {
        &self.host_vars
    }

    /// Names of all groups, used as the children of `all`
    #[must_use]
    pub fn all_children(&self) -> Vec<&'static str> {
        Group::ALL.iter().map(|g| g.name()).collect()
    }

    /// Number of distinct hosts
    #[must_use]
    pub fn host_count(&self) -> usize {
        self.host_vars.len()
    }

    /// Check if the inventory holds no hosts
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.host_vars.is_empty()
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<ServerRecord> for Inventory {
    fn from_iter<I: IntoIterator<Item = ServerRecord>>(iter: I) -> Self {
        Self::from_servers(iter)
    }
}
