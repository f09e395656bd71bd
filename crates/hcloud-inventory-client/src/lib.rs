//! hcloud-inventory-client: Hetzner Cloud API client
//!
//! Lists the servers of a Hetzner Cloud project and converts them into
//! inventory records.
//!
//! # Examples
//!
//! ```no_run
//! use hcloud_inventory_client::HcloudClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HcloudClient::new("my-api-token")?;
//!
//! for server in client.all_servers().await? {
//!     println!("{} in {}", server.name, server.datacenter.location.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod types;

#[cfg(feature = "test-util")]
pub mod testing;

pub use error::{ClientError, Result};
pub use http::{ClientOptions, DEFAULT_ENDPOINT, HcloudClient};
