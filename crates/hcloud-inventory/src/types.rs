//! Inventory type definitions

use std::collections::BTreeMap;

/// Per-host variables exposed to Ansible (the server's labels)
pub type HostVars = BTreeMap<String, String>;

// ============================================================================
// Servers
// ============================================================================

/// A server as reported by the cloud API, reduced to what the inventory needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRecord {
    /// Reverse-DNS pointer of the public IPv4 address, used as inventory key
    pub hostname: String,
    /// Free-form labels attached to the server
    pub labels: HostVars,
    /// Datacenter location code (`nbg1`, `hel1`, ...)
    pub location: String,
}

impl ServerRecord {
    /// Create a new record without labels
    pub fn new(hostname: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            labels: HostVars::new(),
            location: location.into(),
        }
    }

    /// Add a label
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }
}

// ============================================================================
// Groups
// ============================================================================

/// Known datacenter locations, each rendered as its own inventory group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Nuremberg
    Nbg1,
    /// Helsinki
    Hel1,
    /// Falkenstein
    Fsn1,
}

impl Location {
    /// All known locations in canonical output order
    pub const ALL: [Location; 3] = [Location::Nbg1, Location::Hel1, Location::Fsn1];

    /// Location code as used by the API and as group name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Location::Nbg1 => "nbg1",
            Location::Hel1 => "hel1",
            Location::Fsn1 => "fsn1",
        }
    }

    /// Match a location code exactly (case-sensitive)
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|loc| loc.as_str() == code)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inventory group: one per known location plus the catch-all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// Servers in a known location
    Location(Location),
    /// Servers whose location is not known
    Ungrouped,
}

impl Group {
    /// Every group in canonical output order (`ungrouped` last)
    pub const ALL: [Group; 4] = [
        Group::Location(Location::Nbg1),
        Group::Location(Location::Hel1),
        Group::Location(Location::Fsn1),
        Group::Ungrouped,
    ];

    /// Classify a location code
    #[must_use]
    pub fn for_location(code: &str) -> Self {
        Location::from_code(code).map_or(Group::Ungrouped, Group::Location)
    }

    /// Group name as emitted in the inventory
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Group::Location(loc) => loc.as_str(),
            Group::Ungrouped => "ungrouped",
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_exact_match() {
        assert_eq!(Location::from_code("nbg1"), Some(Location::Nbg1));
        assert_eq!(Location::from_code("hel1"), Some(Location::Hel1));
        assert_eq!(Location::from_code("fsn1"), Some(Location::Fsn1));
        assert_eq!(Location::from_code("NBG1"), None);
        assert_eq!(Location::from_code("ash"), None);
        assert_eq!(Location::from_code(""), None);
    }

    #[test]
    fn test_group_classification() {
        assert_eq!(Group::for_location("fsn1"), Group::Location(Location::Fsn1));
        assert_eq!(Group::for_location("xx"), Group::Ungrouped);
    }

    #[test]
    fn test_group_names_canonical_order() {
        let names: Vec<_> = Group::ALL.iter().map(|g| g.name()).collect();
        assert_eq!(names, ["nbg1", "hel1", "fsn1", "ungrouped"]);
    }

    #[test]
    fn test_server_record_builder() {
        let server = ServerRecord::new("web1.example", "nbg1").with_label("env", "prod");
        assert_eq!(server.labels.get("env").map(String::as_str), Some("prod"));
        assert_eq!(server.location, "nbg1");
    }
}
