//! Middleware for authentication and request logging.

mod auth;
mod request_logger;

pub use auth::{auth_middleware, require_admin, require_self_or_admin, CurrentUser};
pub use request_logger::{request_logger, REQUEST_ID_HEADER};
