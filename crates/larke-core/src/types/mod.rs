//! Core type definitions used across the Larke workspace.

pub mod domain;
pub mod login_type;
pub mod policy;

pub use domain::DomainScope;
pub use login_type::LoginType;
pub use policy::{PolicyRule, RoleLink};
