//! # larke-core
//!
//! Core crate for the Larke admin access-control subsystem. Contains the
//! configuration schemas, the collaborator traits (account store, policy
//! engine), the shared policy types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Larke crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
