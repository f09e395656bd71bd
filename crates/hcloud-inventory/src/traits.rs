//! Server lister trait

use async_trait::async_trait;

use crate::error::InventoryError;
use crate::types::ServerRecord;

/// Source of the servers that make up the inventory
#[async_trait]
pub trait ServerLister: Send + Sync {
    /// List all servers, in the order the source returns them
    async fn list_servers(&self) -> Result<Vec<ServerRecord>, InventoryError>;

    /// Short name of the lister, used in logs and errors
    fn lister_type(&self) -> &'static str;
}
