//! # larke-auth
//!
//! Access-control core for the Larke admin panel.
//!
//! ## Modules
//!
//! - `jwt` — access token signing keys, encoding, decoding, and claims
//! - `session` — login-concurrency guard, account session state, token issuance
//! - `permission` — permission manager façade, named guards, in-memory engine

pub mod jwt;
pub mod permission;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, JwtSigner, TokenService};
pub use permission::{EnforcerRegistry, MemoryPolicyEngine, PermissionManager};
pub use session::{GuardRejection, LoginIssuer, MemoryAccountStore, RejectionCode, SessionGuard};
