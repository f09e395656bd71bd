//! hcloud-inventory-exec: local command execution
//!
//! Runs helper commands (such as a password-manager lookup for the API token)
//! and captures their output.

pub mod error;
pub mod local;
pub mod result;
pub mod traits;

pub use error::ExecError;
pub use local::LocalExecutor;
pub use result::{CommandLine, CommandResult};
pub use traits::CommandExecutor;
