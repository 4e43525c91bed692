//! Role and permission management over pluggable policy engines.

pub mod manager;
pub mod memory;
pub mod registry;

pub use manager::PermissionManager;
pub use memory::MemoryPolicyEngine;
pub use registry::EnforcerRegistry;
