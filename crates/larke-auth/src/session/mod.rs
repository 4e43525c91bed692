//! Login session enforcement: account session state, token issuance, and
//! the login-concurrency guard.

pub mod guard;
pub mod issuer;
pub mod store;

pub use guard::{GuardRejection, RejectionCode, SessionGuard};
pub use issuer::LoginIssuer;
pub use store::MemoryAccountStore;
