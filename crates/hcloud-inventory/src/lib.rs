//! hcloud-inventory: Ansible inventory model for Hetzner Cloud servers
//!
//! Groups servers by datacenter location and renders the result either in the
//! Ansible dynamic-inventory JSON format or as a static INI inventory.

pub mod collector;
pub mod error;
pub mod inventory;
pub mod render;
pub mod traits;
pub mod types;

pub use collector::InventoryCollector;
pub use error::InventoryError;
pub use inventory::Inventory;
pub use traits::ServerLister;
pub use types::{Group, HostVars, Location, ServerRecord};
