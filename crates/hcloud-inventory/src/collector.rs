//! High-level inventory collection API

use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::InventoryError;
use crate::inventory::Inventory;
use crate::traits::ServerLister;

/// Inventory collector
///
/// Fetches the server listing once and builds the grouped inventory from it.
pub struct InventoryCollector {
    lister: Arc<dyn ServerLister>,
}

impl InventoryCollector {
    /// Create a new inventory collector
    pub fn new(lister: Arc<dyn ServerLister>) -> Self {
        Self { lister }
    }

    /// List servers and build the inventory
    ///
    /// # Errors
    /// Returns an error if the server listing fails. No partial inventory is
    /// produced in that case.
    #[instrument(skip(self), fields(lister = self.lister.lister_type()))]
    pub async fn collect(&self) -> Result<Inventory, InventoryError> {
        info!("listing servers");

        let servers = self.lister.list_servers().await?;
        let server_count = servers.len();
        let inventory = Inventory::from_servers(servers);

        info!(
            servers = server_count,
            hosts = inventory.host_count(),
            "inventory collection completed"
        );

        Ok(inventory)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::types::{Group, Location, ServerRecord};

    struct StaticLister(Vec<ServerRecord>);

    #[async_trait]
    impl ServerLister for StaticLister {
        async fn list_servers(&self) -> Result<Vec<ServerRecord>, InventoryError> {
            Ok(self.0.clone())
        }

        fn lister_type(&self) -> &'static str {
            "static"
        }
    }

    struct FailingLister;

    #[async_trait]
    impl ServerLister for FailingLister {
        async fn list_servers(&self) -> Result<Vec<ServerRecord>, InventoryError> {
            Err(InventoryError::ListFailed {
                source_type: "failing",
                message: "unauthorized".to_string(),
            })
        }

        fn lister_type(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_collect_builds_inventory() {
        let collector = InventoryCollector::new(Arc::new(StaticLister(vec![
            ServerRecord::new("a.example", "nbg1").with_label("env", "prod"),
            ServerRecord::new("b.example", "hel1"),
        ])));

        let inventory = collector.collect().await.unwrap();

        assert_eq!(inventory.hosts(Group::Location(Location::Nbg1)), ["a.example"]);
        assert_eq!(inventory.hosts(Group::Location(Location::Hel1)), ["b.example"]);
        assert_eq!(inventory.host_count(), 2);
    }

    #[tokio::test]
    async fn test_collect_surfaces_lister_errors() {
        let collector = InventoryCollector::new(Arc::new(FailingLister));

        let err = collector.collect().await.unwrap_err();

        assert!(matches!(err, InventoryError::ListFailed { .. }));
        assert!(err.to_string().contains("unauthorized"));
    }
}
