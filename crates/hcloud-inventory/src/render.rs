//! Inventory rendering
//!
//! Two output formats are supported:
//! - the JSON document expected from an Ansible dynamic-inventory script
//!   (`--list` / `--host`)
//! - a static INI inventory

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;

use crate::error::InventoryError;
use crate::inventory::Inventory;
use crate::types::{Group, HostVars, Location};

/// First line of every rendered INI inventory
pub const INI_HEADER: &str =
    "# This file has been generated via github.com/shibumi/ansible-hcloud-inventory";

const JSON_INDENT: &[u8] = b"    ";

#[derive(Serialize)]
struct Meta<'a> {
    hostvars: &'a BTreeMap<String, HostVars>,
}

#[derive(Serialize)]
struct Children {
    children: Vec<&'static str>,
}

#[derive(Serialize)]
struct Hosts<'a> {
    hosts: &'a [String],
}

// Top-level keys are written in a fixed order: `_meta`, `all`, then every
// group in canonical order.
impl Serialize for Inventory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + Group::ALL.len()))?;
        map.serialize_entry(
            "_meta",
            &Meta {
                hostvars: self.all_host_vars(),
            },
        )?;
        map.serialize_entry(
            "all",
            &Children {
                children: self.all_children(),
            },
        )?;
        for group in Group::ALL {
            map.serialize_entry(
                group.name(),
                &Hosts {
                    hosts: self.hosts(group),
                },
            )?;
        }
        map.end()
    }
}

/// Serialize with a four-space indent
fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, InventoryError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| InventoryError::Serialize(e.to_string()))
}

impl Inventory {
    /// Render the full inventory as a dynamic-inventory JSON document
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, InventoryError> {
        to_pretty_json(self)
    }

    /// Render the variables of one host as JSON
    ///
    /// Returns `None` if the host is not part of the inventory.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn host_json(&self, hostname: &str) -> Result<Option<String>, InventoryError> {
        self.host_vars(hostname).map(to_pretty_json).transpose()
    }

    /// Render the inventory in INI format
    #[must_use]
    pub fn to_ini(&self) -> String {
        Ini(self).to_string()
    }
}

/// INI view of an inventory
///
/// Ungrouped hosts are listed first without a section, followed by one
/// `[location]` section per known location. Label values are written as-is.
struct Ini<'a>(&'a Inventory);

impl Ini<'_> {
    fn write_hosts(&self, f: &mut fmt::Formatter<'_>, group: Group) -> fmt::Result {
        for host in self.0.hosts(group) {
            f.write_str(host)?;
            if let Some(vars) = self.0.host_vars(host) {
                for (key, value) in vars {
                    write!(f, " {key}={value}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Ini<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{INI_HEADER}")?;
        self.write_hosts(f, Group::Ungrouped)?;
        for location in Location::ALL {
            writeln!(f)?;
            writeln!(f, "[{location}]")?;
            self.write_hosts(f, Group::Location(location))?;
        }
        Ok(())
    }
}
