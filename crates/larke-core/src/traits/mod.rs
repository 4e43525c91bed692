//! Collaborator traits defined in `larke-core` and implemented by other crates.

pub mod account;
pub mod policy_engine;

pub use account::AccountStore;
pub use policy_engine::PolicyEngine;
