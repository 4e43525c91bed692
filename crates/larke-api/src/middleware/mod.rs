//! Axum middleware stack.

pub mod logging;
pub mod login_type;
pub mod permission;

pub use logging::request_logging;
pub use login_type::check_login_type;
pub use permission::require_route_permission;
